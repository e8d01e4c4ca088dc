use crate::builder::ScriptTreeBuilder;
use crate::render::{Dialect, KotlinScriptRenderer, RenderError, ScriptRenderer};
use crate::tree::{Expression, ScriptNode};
use crate::version::GradleVersion;

use super::{BuildScript, Configure, GradleBuildScriptBuilder, KOTLIN_OPTIONS_SECTION};

const KOTLIN_COMPILE_TASKS: [&str; 2] = ["compileKotlin", "compileTestKotlin"];

/// Build-script builder emitting Gradle Kotlin DSL (`build.gradle.kts`).
pub struct KotlinDslBuildScriptBuilder {
    script: BuildScript,
}

impl KotlinDslBuildScriptBuilder {
    fn new(gradle_version: GradleVersion) -> Self {
        Self { script: BuildScript::new(gradle_version) }
    }

    pub fn create(gradle_version: GradleVersion) -> Box<dyn GradleBuildScriptBuilder> {
        Box::new(Self::new(gradle_version))
    }
}

impl GradleBuildScriptBuilder for KotlinDslBuildScriptBuilder {
    fn dialect(&self) -> Dialect {
        Dialect::KotlinDsl
    }

    fn script(&self) -> &BuildScript {
        &self.script
    }

    fn script_mut(&mut self) -> &mut BuildScript {
        &mut self.script
    }

    fn generate(&self) -> Result<String, RenderError> {
        KotlinScriptRenderer.render(&self.generate_tree())
    }

    fn configure_test_task(&mut self, configure: Configure) {
        self.with_postfix(Box::new(move |b: &mut ScriptTreeBuilder| {
            b.call_if_not_empty("tasks.test", |t| configure(t));
        }));
    }

    fn core_plugin(&self, id: &str) -> ScriptNode {
        // Accessors for ids that are not Kotlin identifiers need backticks.
        if id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            ScriptNode::Code(id.to_string())
        } else {
            ScriptNode::Code(format!("`{}`", id))
        }
    }

    fn kotlin_plugin(&self, module: &str) -> Expression {
        Expression::call("kotlin", vec![module.into()])
    }

    fn kotlin_dependency(&self, module: &str) -> Expression {
        Expression::call("kotlin", vec![module.into()])
    }

    fn with_kotlin_jvm_target(&mut self, target: &str) {
        self.add_import("org.jetbrains.kotlin.gradle.tasks.KotlinCompile");
        let target = target.to_string();
        let configure: Configure = Box::new(move |b: &mut ScriptTreeBuilder| {
            for task in KOTLIN_COMPILE_TASKS {
                b.declare(task, "KotlinCompile", "tasks");
                b.block(format!("{}.kotlinOptions", task), |options| {
                    options.assign("jvmTarget", target.as_str());
                });
            }
        });
        self.script_mut().set_postfix(KOTLIN_OPTIONS_SECTION, configure);
    }
}
