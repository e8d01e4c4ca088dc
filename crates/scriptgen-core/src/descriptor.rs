//! JSON project descriptors.
//!
//! A [`ProjectDescriptor`] is a declarative description of a Gradle project
//! that can be applied to any [`GradleBuildScriptBuilder`]. The same
//! descriptor produces equivalent Kotlin DSL and Groovy DSL scripts.
//!
//! ```json
//! {
//!   "gradle_version": "7.6",
//!   "plugins": [{ "id": "idea" }],
//!   "kotlin_jvm": "1.9.20",
//!   "application": { "main_class": "samples.HelloWorld" },
//!   "repositories": ["mavenCentral", { "maven": "https://repo.example.com" }],
//!   "dependencies": [
//!     { "scope": "implementation", "notation": { "kotlin": "stdlib-jdk8" } },
//!     { "scope": "testImplementation", "notation": "junit:junit:4.13.2" }
//!   ],
//!   "test_framework": "junit5",
//!   "jvm_target": "17"
//! }
//! ```

use std::io::{self, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::builder::ScriptTreeBuilder;
use crate::buildscript::{BuildScriptError, DependencyScope, GradleBuildScriptBuilder};
use crate::render::Dialect;
use crate::tree::Expression;
use crate::version::GradleVersion;

/// Errors that can occur when loading a descriptor.
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDescriptor {
    /// Preferred dialect; command-line flags take precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,

    /// Target Gradle version; command-line flags take precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradle_version: Option<GradleVersion>,

    pub imports: Vec<String>,

    /// Plugins bundled with Gradle, e.g. `java`, `application`.
    pub core_plugins: Vec<String>,

    pub plugins: Vec<PluginSpec>,

    /// Legacy `apply plugin` entries.
    pub apply_plugins: Vec<String>,

    /// Kotlin JVM plugin version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kotlin_jvm: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationSpec>,

    pub buildscript: BuildscriptSpec,

    pub repositories: Vec<Repository>,

    pub dependencies: Vec<DependencySpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_framework: Option<TestFramework>,

    /// `kotlinOptions.jvmTarget` for compile tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jvm_target: Option<String>,

    /// Raw statements appended to the test task configuration.
    pub test_task: Vec<String>,

    /// Comments emitted after every other statement.
    pub trailing_comments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSpec {
    pub main_class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildscriptSpec {
    /// Maven repository URLs; an empty string means Maven Central.
    pub repositories: Vec<String>,
    pub classpath: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Repository {
    MavenCentral,
    Jcenter,
    Google,
    Maven(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// A scope name such as `implementation`. Known scopes are adjusted to
    /// the target Gradle version; any other name is used verbatim.
    pub scope: String,
    pub notation: Notation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Notation {
    /// `group:artifact:version`
    Coordinates(String),
    /// A Kotlin library module, e.g. `{ "kotlin": "stdlib-jdk8" }`.
    Kotlin { kotlin: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    Junit4,
    Junit5,
}

impl ProjectDescriptor {
    pub fn from_file(path: &Path) -> Result<Self, DescriptorError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_stdin() -> Result<Self, DescriptorError> {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply every entry to `builder`, in descriptor field order.
    pub fn apply_to(
        &self,
        builder: &mut dyn GradleBuildScriptBuilder,
    ) -> Result<(), BuildScriptError> {
        debug!(
            dialect = %builder.dialect(),
            dependencies = self.dependencies.len(),
            "applying project descriptor"
        );
        for import in &self.imports {
            builder.add_import(import);
        }
        for url in &self.buildscript.repositories {
            builder.add_buildscript_repository(Some(url.as_str()).filter(|url| !url.is_empty()));
        }
        for notation in &self.buildscript.classpath {
            builder.add_buildscript_classpath(notation.as_str().into());
        }
        for id in &self.core_plugins {
            let node = builder.core_plugin(id);
            builder.script_mut().add_plugin(node);
        }
        if let Some(application) = &self.application {
            builder.with_application(&application.main_class);
        }
        if let Some(version) = &self.kotlin_jvm {
            builder.with_kotlin_jvm_plugin(version);
        }
        for plugin in &self.plugins {
            builder.with_plugin(&plugin.id, plugin.version.as_deref());
        }
        for id in &self.apply_plugins {
            builder.apply_plugin(id);
        }
        for repository in &self.repositories {
            match repository {
                Repository::MavenCentral => builder.with_maven_central(),
                Repository::Jcenter => builder.with_jcenter(),
                Repository::Google => builder.with_google(),
                Repository::Maven(url) => builder.with_maven_repository(url),
            }
        }
        for dependency in &self.dependencies {
            let notation = match &dependency.notation {
                Notation::Coordinates(coordinates) => Expression::string(coordinates.as_str()),
                Notation::Kotlin { kotlin } => builder.kotlin_dependency(kotlin),
            };
            match dependency.scope.parse::<DependencyScope>() {
                Ok(scope) => builder.add_scoped_dependency(scope, notation),
                Err(_) => builder.add_dependency(&dependency.scope, notation),
            }
        }
        match self.test_framework {
            Some(TestFramework::Junit4) => builder.with_junit4(),
            Some(TestFramework::Junit5) => builder.with_junit5()?,
            None => {}
        }
        if !self.test_task.is_empty() {
            let statements = self.test_task.clone();
            builder.configure_test_task(Box::new(move |t: &mut ScriptTreeBuilder| {
                for statement in &statements {
                    t.code(statement.as_str());
                }
            }));
        }
        if !self.trailing_comments.is_empty() {
            let comments = self.trailing_comments.clone();
            builder.with_postfix(Box::new(move |b: &mut ScriptTreeBuilder| {
                for comment in &comments {
                    b.comment(comment.as_str());
                }
            }));
        }
        if let Some(target) = &self.jvm_target {
            builder.with_kotlin_jvm_target(target);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildscript::{GroovyDslBuildScriptBuilder, KotlinDslBuildScriptBuilder};

    const SAMPLE: &str = r#"{
        "gradle_version": "8.5",
        "core_plugins": ["java"],
        "repositories": ["mavenCentral", { "maven": "https://repo.example.com" }],
        "dependencies": [
            { "scope": "implementation", "notation": { "kotlin": "stdlib" } },
            { "scope": "annotationProcessor", "notation": "com.google.dagger:dagger-compiler:2.48" }
        ]
    }"#;

    #[test]
    fn parses_sample() {
        let descriptor = ProjectDescriptor::from_json(SAMPLE).unwrap();
        assert_eq!(descriptor.gradle_version.unwrap().to_string(), "8.5");
        assert_eq!(
            descriptor.repositories,
            vec![Repository::MavenCentral, Repository::Maven("https://repo.example.com".into())]
        );
        assert_eq!(
            descriptor.dependencies[0].notation,
            Notation::Kotlin { kotlin: "stdlib".into() }
        );
        assert!(descriptor.application.is_none());
    }

    #[test]
    fn empty_object_is_valid() {
        assert_eq!(ProjectDescriptor::from_json("{}").unwrap(), ProjectDescriptor::default());
    }

    #[test]
    fn rejects_unknown_repository() {
        let err = ProjectDescriptor::from_json(r#"{ "repositories": ["ivy"] }"#).unwrap_err();
        assert!(matches!(err, DescriptorError::Json(_)));
    }

    #[test]
    fn unknown_scopes_are_used_verbatim() {
        let descriptor = ProjectDescriptor::from_json(SAMPLE).unwrap();
        let mut builder = KotlinDslBuildScriptBuilder::create("8.5".parse().unwrap());
        descriptor.apply_to(builder.as_mut()).unwrap();
        let script = builder.generate().unwrap();
        assert!(script.contains("    implementation(kotlin(\"stdlib\"))\n"));
        assert!(script.contains("    annotationProcessor(\"com.google.dagger:dagger-compiler:2.48\")\n"));
    }

    #[test]
    fn same_descriptor_renders_in_both_dialects() {
        let descriptor = ProjectDescriptor::from_json(SAMPLE).unwrap();

        let mut kotlin = KotlinDslBuildScriptBuilder::create("8.5".parse().unwrap());
        descriptor.apply_to(kotlin.as_mut()).unwrap();
        let mut groovy = GroovyDslBuildScriptBuilder::create("8.5".parse().unwrap());
        descriptor.apply_to(groovy.as_mut()).unwrap();

        assert_eq!(kotlin.generate_tree().len(), groovy.generate_tree().len());
        let groovy_script = groovy.generate().unwrap();
        assert!(groovy_script.contains("    id 'java'\n"));
        assert!(groovy_script.contains("    implementation 'org.jetbrains.kotlin:kotlin-stdlib'\n"));
        assert!(groovy_script.contains("        url = uri('https://repo.example.com')\n"));
    }

    #[test]
    fn junit5_on_old_gradle_is_rejected() {
        let descriptor = ProjectDescriptor::from_json(r#"{ "test_framework": "junit5" }"#).unwrap();
        let mut builder = GroovyDslBuildScriptBuilder::create("4.0".parse().unwrap());
        let err = descriptor.apply_to(builder.as_mut()).unwrap_err();
        assert!(matches!(err, BuildScriptError::Unsupported { feature: "JUnit 5", .. }));
    }

    #[test]
    fn test_task_statements_land_in_test_block() {
        let descriptor =
            ProjectDescriptor::from_json(r#"{ "test_task": ["maxParallelForks = 4"] }"#).unwrap();
        let mut builder = KotlinDslBuildScriptBuilder::create("8.5".parse().unwrap());
        descriptor.apply_to(builder.as_mut()).unwrap();
        assert_eq!(builder.generate().unwrap(), "tasks.test {\n    maxParallelForks = 4\n}\n");
    }

    #[test]
    fn multi_line_trailing_comment_stays_commented() {
        let descriptor = ProjectDescriptor::from_json(
            r#"{ "trailing_comments": ["generated\nthrow GradleException(\"x\")"] }"#,
        )
        .unwrap();
        let mut builder = GroovyDslBuildScriptBuilder::create("8.5".parse().unwrap());
        descriptor.apply_to(builder.as_mut()).unwrap();
        assert_eq!(
            builder.generate().unwrap(),
            "// generated\n// throw GradleException(\"x\")\n"
        );
    }
}
