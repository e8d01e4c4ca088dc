use crate::builder::ScriptTreeBuilder;
use crate::render::{Dialect, GroovyScriptRenderer, RenderError, ScriptRenderer};
use crate::tree::{Expression, ScriptNode};
use crate::version::GradleVersion;

use super::{BuildScript, Configure, GradleBuildScriptBuilder, KOTLIN_OPTIONS_SECTION};

/// Build-script builder emitting Gradle Groovy DSL (`build.gradle`).
pub struct GroovyDslBuildScriptBuilder {
    script: BuildScript,
}

impl GroovyDslBuildScriptBuilder {
    fn new(gradle_version: GradleVersion) -> Self {
        Self { script: BuildScript::new(gradle_version) }
    }

    pub fn create(gradle_version: GradleVersion) -> Box<dyn GradleBuildScriptBuilder> {
        Box::new(Self::new(gradle_version))
    }
}

impl GradleBuildScriptBuilder for GroovyDslBuildScriptBuilder {
    fn dialect(&self) -> Dialect {
        Dialect::GroovyDsl
    }

    fn script(&self) -> &BuildScript {
        &self.script
    }

    fn script_mut(&mut self) -> &mut BuildScript {
        &mut self.script
    }

    fn generate(&self) -> Result<String, RenderError> {
        GroovyScriptRenderer.render(&self.generate_tree())
    }

    fn configure_test_task(&mut self, configure: Configure) {
        self.with_postfix(Box::new(move |b: &mut ScriptTreeBuilder| {
            b.call_if_not_empty("test", |t| configure(t));
        }));
    }

    fn core_plugin(&self, id: &str) -> ScriptNode {
        ScriptNode::Call {
            name: "id".into(),
            args: vec![id.into()],
        }
    }

    fn kotlin_plugin(&self, module: &str) -> Expression {
        Expression::call("id", vec![format!("org.jetbrains.kotlin.{}", module).into()])
    }

    fn kotlin_dependency(&self, module: &str) -> Expression {
        Expression::string(format!("org.jetbrains.kotlin:kotlin-{}", module))
    }

    fn with_kotlin_jvm_target(&mut self, target: &str) {
        let target = target.to_string();
        let configure: Configure = Box::new(move |b: &mut ScriptTreeBuilder| {
            for task in ["compileKotlin", "compileTestKotlin"] {
                b.block(task, |t| {
                    t.block("kotlinOptions", |options| {
                        options.assign("jvmTarget", target.as_str());
                    });
                });
            }
        });
        self.script_mut().set_postfix(KOTLIN_OPTIONS_SECTION, configure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(version: &str) -> Box<dyn GradleBuildScriptBuilder> {
        GroovyDslBuildScriptBuilder::create(version.parse().unwrap())
    }

    #[test]
    fn core_plugins_use_plugin_ids() {
        let mut b = builder("8.5");
        b.with_java_plugin();
        b.with_application("samples.HelloWorld");
        assert_eq!(
            b.generate().unwrap(),
            "plugins {\n    id 'java'\n    id 'application'\n}\n\n\
             application {\n    mainClass.set 'samples.HelloWorld'\n}\n"
        );
    }

    #[test]
    fn kotlin_plugin_uses_full_id() {
        let mut b = builder("8.5");
        b.with_kotlin_jvm_plugin("1.9.20");
        let stdlib = b.kotlin_dependency("stdlib-jdk8");
        b.add_implementation_dependency(stdlib);
        assert_eq!(
            b.generate().unwrap(),
            "plugins {\n    id('org.jetbrains.kotlin.jvm') version '1.9.20'\n}\n\n\
             dependencies {\n    implementation 'org.jetbrains.kotlin:kotlin-stdlib-jdk8'\n}\n"
        );
    }

    #[test]
    fn legacy_gradle_uses_compile_configurations() {
        let mut b = builder("3.3");
        b.with_junit4();
        b.add_runtime_only_dependency("org.slf4j:slf4j-simple:1.7.36".into());
        assert_eq!(
            b.generate().unwrap(),
            "dependencies {\n    testCompile 'junit:junit:4.13.2'\n    runtime 'org.slf4j:slf4j-simple:1.7.36'\n}\n"
        );
    }

    #[test]
    fn test_task_is_test() {
        let mut b = builder("8.5");
        b.configure_test_task(Box::new(|t: &mut ScriptTreeBuilder| {
            t.call("useJUnitPlatform", vec![]);
        }));
        assert_eq!(b.generate().unwrap(), "test {\n    useJUnitPlatform()\n}\n");
    }

    #[test]
    fn empty_test_configuration_adds_nothing() {
        let mut b = builder("8.5");
        b.configure_test_task(Box::new(|_: &mut ScriptTreeBuilder| {}));
        assert_eq!(b.generate().unwrap(), "");
    }

    #[test]
    fn jvm_target_configures_tasks_directly() {
        let mut b = builder("8.5");
        b.with_kotlin_jvm_target("1.8");
        assert_eq!(
            b.generate().unwrap(),
            "compileKotlin {\n    kotlinOptions {\n        jvmTarget = '1.8'\n    }\n}\n\
             compileTestKotlin {\n    kotlinOptions {\n        jvmTarget = '1.8'\n    }\n}\n"
        );
    }

    #[test]
    fn repeated_jvm_target_keeps_last_value() {
        let mut b = builder("8.5");
        b.with_kotlin_jvm_target("1.8");
        b.with_kotlin_jvm_target("17");
        let script = b.generate().unwrap();
        assert_eq!(script.matches("compileKotlin {").count(), 1);
        assert_eq!(script.matches("jvmTarget = '17'").count(), 2);
        assert!(!script.contains("'1.8'"));
    }

    #[test]
    fn repositories_and_compile_only_dependencies() {
        let mut b = builder("8.5");
        b.with_google();
        b.with_maven_repository("https://repo.example.com/maven");
        b.add_compile_only_dependency("org.projectlombok:lombok:1.18.30".into());
        assert_eq!(
            b.generate().unwrap(),
            "repositories {\n    google()\n    maven {\n        url = uri('https://repo.example.com/maven')\n    }\n}\n\n\
             dependencies {\n    compileOnly 'org.projectlombok:lombok:1.18.30'\n}\n"
        );
    }

    #[test]
    fn applied_plugin_uses_map_syntax() {
        let mut b = builder("8.5");
        b.apply_plugin("maven-publish");
        assert_eq!(b.generate().unwrap(), "apply plugin: 'maven-publish'\n");
    }

    #[test]
    fn hand_written_declaration_fails_generation() {
        let mut b = builder("8.5");
        b.with_maven_central();
        b.with_postfix(Box::new(|p: &mut ScriptTreeBuilder| {
            p.declare("compileKotlin", "KotlinCompile", "tasks");
        }));
        assert!(matches!(
            b.generate(),
            Err(RenderError::Unsupported { dialect: Dialect::GroovyDsl, .. })
        ));
    }
}
