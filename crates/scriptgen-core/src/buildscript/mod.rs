//! Gradle-aware build-script builders.
//!
//! A [`GradleBuildScriptBuilder`] collects Gradle configuration (plugins,
//! repositories, dependencies, task tweaks) for one target Gradle version and
//! renders it in its dialect. All dialects share the same [`BuildScript`]
//! state; the concrete builders only supply the bits of syntax that differ
//! between Kotlin DSL and Groovy DSL.
//!
//! # Sections
//!
//! [`BuildScript::generate_tree`] emits, in order and separated by one blank
//! line: imports, `buildscript { }`, `plugins { }`, applied plugins, each
//! prefix, `repositories { }`, `dependencies { }`, then every postfix. Empty
//! sections produce nothing.
//!
//! # Example
//!
//! ```
//! use scriptgen_core::buildscript::{GradleBuildScriptBuilder, KotlinDslBuildScriptBuilder};
//!
//! let mut builder = KotlinDslBuildScriptBuilder::create("7.6".parse().unwrap());
//! builder.with_java_plugin();
//! builder.with_maven_central();
//! builder.add_implementation_dependency("com.google.guava:guava:32.1.2-jre".into());
//!
//! let script = builder.generate().unwrap();
//! assert!(script.starts_with("plugins {\n    java\n}\n"));
//! ```

mod groovy;
mod kotlin;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::builder::ScriptTreeBuilder;
use crate::config::BuilderConfiguration;
use crate::render::{Dialect, RenderError};
use crate::tree::{Expression, ScriptNode, ScriptTree};
use crate::version::GradleVersion;

pub use groovy::GroovyDslBuildScriptBuilder;
pub use kotlin::KotlinDslBuildScriptBuilder;

pub const JUNIT4_VERSION: &str = "4.13.2";
pub const JUNIT5_VERSION: &str = "5.10.0";

const IMPLEMENTATION_SCOPES_SINCE: GradleVersion = GradleVersion::new(3, 4, 0);
const JUNIT_PLATFORM_SINCE: GradleVersion = GradleVersion::new(4, 7, 0);
const MAIN_CLASS_PROPERTY_SINCE: GradleVersion = GradleVersion::new(6, 4, 0);

const APPLICATION_SECTION: &str = "application";
const KOTLIN_OPTIONS_SECTION: &str = "kotlin-options";

/// Deferred tree configuration, run every time a script is generated.
pub type Configure = Box<dyn Fn(&mut ScriptTreeBuilder)>;

/// Prefix or postfix entry. Keyed entries exist at most once per script.
type Section = (Option<&'static str>, Configure);

/// Errors that can occur while configuring or generating a build script.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildScriptError {
    /// The requested feature needs a newer Gradle than the target.
    #[error("{feature} requires Gradle {required} or newer (targeting {actual})")]
    Unsupported {
        feature: &'static str,
        required: GradleVersion,
        actual: GradleVersion,
    },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Dependency configurations whose name depends on the Gradle version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyScope {
    Implementation,
    TestImplementation,
    RuntimeOnly,
    TestRuntimeOnly,
    CompileOnly,
    TestCompileOnly,
}

impl DependencyScope {
    /// Configuration name understood by `version`.
    ///
    /// Before Gradle 3.4 the `implementation` family did not exist and the
    /// legacy `compile`/`runtime` configurations are used instead.
    pub fn configuration_name(self, version: &GradleVersion) -> &'static str {
        let modern = version.is_at_least(&IMPLEMENTATION_SCOPES_SINCE);
        match self {
            DependencyScope::Implementation if modern => "implementation",
            DependencyScope::Implementation => "compile",
            DependencyScope::TestImplementation if modern => "testImplementation",
            DependencyScope::TestImplementation => "testCompile",
            DependencyScope::RuntimeOnly if modern => "runtimeOnly",
            DependencyScope::RuntimeOnly => "runtime",
            DependencyScope::TestRuntimeOnly if modern => "testRuntimeOnly",
            DependencyScope::TestRuntimeOnly => "testRuntime",
            DependencyScope::CompileOnly => "compileOnly",
            DependencyScope::TestCompileOnly => "testCompileOnly",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Modern names are the canonical spelling.
        let latest = GradleVersion::new(u32::MAX, 0, 0);
        write!(f, "{}", self.configuration_name(&latest))
    }
}

/// Error returned when parsing a configuration name with no version mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown dependency scope '{0}'")]
pub struct UnknownScope(pub String);

impl FromStr for DependencyScope {
    type Err = UnknownScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "implementation" => Ok(DependencyScope::Implementation),
            "testImplementation" => Ok(DependencyScope::TestImplementation),
            "runtimeOnly" => Ok(DependencyScope::RuntimeOnly),
            "testRuntimeOnly" => Ok(DependencyScope::TestRuntimeOnly),
            "compileOnly" => Ok(DependencyScope::CompileOnly),
            "testCompileOnly" => Ok(DependencyScope::TestCompileOnly),
            _ => Err(UnknownScope(s.to_string())),
        }
    }
}

/// Gradle configuration shared by every dialect.
pub struct BuildScript {
    gradle_version: GradleVersion,
    imports: Vec<String>,
    buildscript_repositories: ScriptTreeBuilder,
    buildscript_dependencies: ScriptTreeBuilder,
    plugins: ScriptTreeBuilder,
    applied_plugins: ScriptTreeBuilder,
    prefixes: Vec<Section>,
    repositories: ScriptTreeBuilder,
    dependencies: ScriptTreeBuilder,
    postfixes: Vec<Section>,
}

impl BuildScript {
    pub fn new(gradle_version: GradleVersion) -> Self {
        Self {
            gradle_version,
            imports: Vec::new(),
            buildscript_repositories: ScriptTreeBuilder::new(),
            buildscript_dependencies: ScriptTreeBuilder::new(),
            plugins: ScriptTreeBuilder::new(),
            applied_plugins: ScriptTreeBuilder::new(),
            prefixes: Vec::new(),
            repositories: ScriptTreeBuilder::new(),
            dependencies: ScriptTreeBuilder::new(),
            postfixes: Vec::new(),
        }
    }

    pub fn gradle_version(&self) -> &GradleVersion {
        &self.gradle_version
    }

    pub fn add_import(&mut self, import: &str) {
        if !self.imports.iter().any(|existing| existing == import) {
            self.imports.push(import.to_string());
        }
    }

    pub fn add_plugin(&mut self, node: ScriptNode) {
        self.plugins.join_unique(ScriptTree::new(vec![node]));
    }

    pub fn apply_plugin(&mut self, id: &str) {
        self.applied_plugins.join_unique(ScriptTreeBuilder::tree(|b| {
            b.call("apply", vec![Expression::named("plugin", id.into())]);
        }));
    }

    pub fn add_repository(&mut self, node: ScriptNode) {
        self.repositories.join_unique(ScriptTree::new(vec![node]));
    }

    pub fn add_dependency(&mut self, configuration: &str, notation: Expression) {
        self.dependencies.join_unique(ScriptTreeBuilder::tree(|b| {
            b.call(configuration, vec![notation]);
        }));
    }

    pub fn add_buildscript_repository(&mut self, node: ScriptNode) {
        self.buildscript_repositories.join_unique(ScriptTree::new(vec![node]));
    }

    pub fn add_buildscript_dependency(&mut self, configuration: &str, notation: Expression) {
        self.buildscript_dependencies.join_unique(ScriptTreeBuilder::tree(|b| {
            b.call(configuration, vec![notation]);
        }));
    }

    /// Statements emitted after applied plugins, before `repositories`.
    pub fn with_prefix(&mut self, configure: Configure) {
        self.prefixes.push((None, configure));
    }

    /// Like [`with_prefix`](Self::with_prefix), but a later call with the
    /// same `key` replaces the earlier entry in place.
    pub fn set_prefix(&mut self, key: &'static str, configure: Configure) {
        put_keyed(&mut self.prefixes, key, configure);
    }

    /// Statements emitted after every other section.
    pub fn with_postfix(&mut self, configure: Configure) {
        self.postfixes.push((None, configure));
    }

    /// Like [`with_postfix`](Self::with_postfix), but a later call with the
    /// same `key` replaces the earlier entry in place.
    pub fn set_postfix(&mut self, key: &'static str, configure: Configure) {
        put_keyed(&mut self.postfixes, key, configure);
    }

    pub fn require(
        &self,
        feature: &'static str,
        required: GradleVersion,
    ) -> Result<(), BuildScriptError> {
        if self.gradle_version.is_at_least(&required) {
            return Ok(());
        }
        Err(BuildScriptError::Unsupported {
            feature,
            required,
            actual: self.gradle_version.clone(),
        })
    }

    /// Assemble a fresh tree from the current configuration.
    pub fn generate_tree(&self) -> ScriptTree {
        let imports = ScriptTreeBuilder::tree(|b| {
            for import in &self.imports {
                b.code(format!("import {}", import));
            }
        });
        let buildscript = ScriptTreeBuilder::tree(|b| {
            b.call_if_not_empty("buildscript", |bs| {
                bs.call_if_not_empty("repositories", |r| {
                    r.join(self.buildscript_repositories.clone().build());
                });
                bs.call_if_not_empty("dependencies", |d| {
                    d.join(self.buildscript_dependencies.clone().build());
                });
            });
        });
        let plugins = ScriptTreeBuilder::tree(|b| {
            b.call_if_not_empty("plugins", |p| {
                p.join(self.plugins.clone().build());
            });
        });
        let repositories = ScriptTreeBuilder::tree(|b| {
            b.call_if_not_empty("repositories", |r| {
                r.join(self.repositories.clone().build());
            });
        });
        let dependencies = ScriptTreeBuilder::tree(|b| {
            b.call_if_not_empty("dependencies", |d| {
                d.join(self.dependencies.clone().build());
            });
        });
        let postfix = ScriptTreeBuilder::tree(|b| {
            for (_, configure) in &self.postfixes {
                configure(b);
            }
        });

        let mut sections = vec![imports, buildscript, plugins, self.applied_plugins.clone().build()];
        sections.extend(
            self.prefixes
                .iter()
                .map(|(_, configure)| ScriptTreeBuilder::tree(|b| configure(b))),
        );
        sections.extend([repositories, dependencies, postfix]);

        let mut builder = ScriptTreeBuilder::new();
        let mut emitted = 0;
        for section in sections.into_iter().filter(|section| !section.is_empty()) {
            if !builder.is_empty() {
                builder.new_line();
            }
            builder.join(section);
            emitted += 1;
        }
        debug!(gradle_version = %self.gradle_version, sections = emitted, "assembled build script tree");
        builder.build()
    }
}

fn put_keyed(sections: &mut Vec<Section>, key: &'static str, configure: Configure) {
    match sections.iter_mut().find(|(existing, _)| *existing == Some(key)) {
        Some(entry) => entry.1 = configure,
        None => sections.push((Some(key), configure)),
    }
}

/// Dialect-independent contract of a Gradle build-script builder.
///
/// Concrete builders provide the syntax that differs per dialect; everything
/// else is implemented here on top of [`BuildScript`].
pub trait GradleBuildScriptBuilder {
    fn dialect(&self) -> Dialect;

    fn script(&self) -> &BuildScript;

    fn script_mut(&mut self) -> &mut BuildScript;

    /// Render the current configuration.
    fn generate(&self) -> Result<String, RenderError>;

    /// Configure the `test` task. Nothing is emitted if `configure` adds no
    /// statements.
    fn configure_test_task(&mut self, configure: Configure);

    /// Plugin entry for a plugin bundled with Gradle (`java`, `application`).
    fn core_plugin(&self, id: &str) -> ScriptNode;

    /// Plugin reference for a Kotlin Gradle plugin module (`jvm`, `android`).
    fn kotlin_plugin(&self, module: &str) -> Expression;

    /// Dependency notation for a Kotlin library module (`stdlib-jdk8`).
    fn kotlin_dependency(&self, module: &str) -> Expression;

    /// Set `kotlinOptions.jvmTarget` for main and test compilation. A later
    /// call replaces the target; the options are emitted once.
    fn with_kotlin_jvm_target(&mut self, target: &str);

    fn gradle_version(&self) -> &GradleVersion {
        self.script().gradle_version()
    }

    fn generate_tree(&self) -> ScriptTree {
        self.script().generate_tree()
    }

    fn add_import(&mut self, import: &str) {
        self.script_mut().add_import(import);
    }

    /// `id("id")` or `id("id") version "version"` in the `plugins` block.
    fn with_plugin(&mut self, id: &str, version: Option<&str>) {
        let node = match version {
            Some(version) => ScriptNode::Expression(Expression::infix(
                Expression::call("id", vec![id.into()]),
                "version",
                version.into(),
            )),
            None => ScriptNode::Call {
                name: "id".into(),
                args: vec![id.into()],
            },
        };
        self.script_mut().add_plugin(node);
    }

    fn apply_plugin(&mut self, id: &str) {
        self.script_mut().apply_plugin(id);
    }

    fn with_java_plugin(&mut self) {
        let node = self.core_plugin("java");
        self.script_mut().add_plugin(node);
    }

    fn with_kotlin_jvm_plugin(&mut self, version: &str) {
        let plugin = Expression::infix(self.kotlin_plugin("jvm"), "version", version.into());
        self.script_mut().add_plugin(ScriptNode::Expression(plugin));
    }

    /// Apply the `application` plugin and point it at `main_class`. The last
    /// main class set wins.
    fn with_application(&mut self, main_class: &str) {
        let node = self.core_plugin("application");
        self.script_mut().add_plugin(node);
        let main_class = main_class.to_string();
        let configure: Configure = if self.gradle_version().is_at_least(&MAIN_CLASS_PROPERTY_SINCE) {
            Box::new(move |b: &mut ScriptTreeBuilder| {
                b.block("application", |a| {
                    a.call("mainClass.set", vec![main_class.as_str().into()]);
                });
            })
        } else {
            Box::new(move |b: &mut ScriptTreeBuilder| {
                b.block("application", |a| {
                    a.assign("mainClassName", main_class.as_str());
                });
            })
        };
        self.script_mut().set_prefix(APPLICATION_SECTION, configure);
    }

    fn with_maven_central(&mut self) {
        self.script_mut().add_repository(ScriptNode::Call {
            name: "mavenCentral".into(),
            args: Vec::new(),
        });
    }

    fn with_jcenter(&mut self) {
        self.script_mut().add_repository(ScriptNode::Call {
            name: "jcenter".into(),
            args: Vec::new(),
        });
    }

    fn with_google(&mut self) {
        self.script_mut().add_repository(ScriptNode::Call {
            name: "google".into(),
            args: Vec::new(),
        });
    }

    fn with_maven_repository(&mut self, url: &str) {
        self.script_mut().add_repository(maven_repository(url));
    }

    /// Add a dependency to an explicitly named configuration.
    fn add_dependency(&mut self, configuration: &str, notation: Expression) {
        self.script_mut().add_dependency(configuration, notation);
    }

    fn add_scoped_dependency(&mut self, scope: DependencyScope, notation: Expression) {
        let configuration = scope.configuration_name(self.gradle_version());
        self.script_mut().add_dependency(configuration, notation);
    }

    fn add_implementation_dependency(&mut self, notation: Expression) {
        self.add_scoped_dependency(DependencyScope::Implementation, notation);
    }

    fn add_test_implementation_dependency(&mut self, notation: Expression) {
        self.add_scoped_dependency(DependencyScope::TestImplementation, notation);
    }

    fn add_runtime_only_dependency(&mut self, notation: Expression) {
        self.add_scoped_dependency(DependencyScope::RuntimeOnly, notation);
    }

    fn add_test_runtime_only_dependency(&mut self, notation: Expression) {
        self.add_scoped_dependency(DependencyScope::TestRuntimeOnly, notation);
    }

    fn add_compile_only_dependency(&mut self, notation: Expression) {
        self.add_scoped_dependency(DependencyScope::CompileOnly, notation);
    }

    fn add_buildscript_repository(&mut self, url: Option<&str>) {
        let node = match url {
            Some(url) => maven_repository(url),
            None => ScriptNode::Call {
                name: "mavenCentral".into(),
                args: Vec::new(),
            },
        };
        self.script_mut().add_buildscript_repository(node);
    }

    fn add_buildscript_classpath(&mut self, notation: Expression) {
        self.script_mut().add_buildscript_dependency("classpath", notation);
    }

    fn with_junit4(&mut self) {
        self.add_test_implementation_dependency(
            format!("junit:junit:{}", JUNIT4_VERSION).into(),
        );
    }

    /// JUnit Jupiter API and engine plus `useJUnitPlatform()` on the test task.
    fn with_junit5(&mut self) -> Result<(), BuildScriptError> {
        self.script().require("JUnit 5", JUNIT_PLATFORM_SINCE)?;
        self.add_test_implementation_dependency(
            format!("org.junit.jupiter:junit-jupiter-api:{}", JUNIT5_VERSION).into(),
        );
        self.add_test_runtime_only_dependency(
            format!("org.junit.jupiter:junit-jupiter-engine:{}", JUNIT5_VERSION).into(),
        );
        self.configure_test_task(Box::new(|t: &mut ScriptTreeBuilder| {
            t.call("useJUnitPlatform", Vec::new());
        }));
        Ok(())
    }

    fn with_prefix(&mut self, configure: Configure) {
        self.script_mut().with_prefix(configure);
    }

    fn with_postfix(&mut self, configure: Configure) {
        self.script_mut().with_postfix(configure);
    }
}

/// `maven { url = uri("...") }`; valid in both dialects.
fn maven_repository(url: &str) -> ScriptNode {
    ScriptNode::Block {
        name: "maven".into(),
        args: Vec::new(),
        children: vec![ScriptNode::Assignment {
            name: "url".into(),
            value: Expression::call("uri", vec![url.into()]),
        }],
    }
}

/// Create the builder for the configured dialect.
///
/// The Gradle version only gates features; it never selects the dialect.
pub fn create(config: &BuilderConfiguration) -> Box<dyn GradleBuildScriptBuilder> {
    debug!(dialect = %config.dialect(), gradle_version = %config.gradle_version(), "creating build script builder");
    let version = config.gradle_version().clone();
    match config.dialect() {
        Dialect::KotlinDsl => KotlinDslBuildScriptBuilder::create(version),
        Dialect::GroovyDsl => GroovyDslBuildScriptBuilder::create(version),
    }
}
