use crate::tree::{Expression, ScriptTree};

use super::{render_with, Dialect, RenderError, ScriptRenderer, Syntax};

/// Renders trees as Gradle Kotlin DSL (`build.gradle.kts`).
#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinScriptRenderer;

impl ScriptRenderer for KotlinScriptRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::KotlinDsl
    }

    fn render(&self, tree: &ScriptTree) -> Result<String, RenderError> {
        render_with(self, tree)
    }
}

impl Syntax for KotlinScriptRenderer {
    const DIALECT: Dialect = Dialect::KotlinDsl;

    fn string(&self, value: &str) -> String {
        format!("\"{}\"", escape_string(value))
    }

    fn call_statement(&self, name: &str, _: &[Expression], rendered: &[String]) -> String {
        format!("{}({})", name, rendered.join(", "))
    }

    fn named(&self, name: &str, value: &str) -> String {
        format!("{} = {}", name, value)
    }

    fn list(&self, items: &[String]) -> String {
        format!("listOf({})", items.join(", "))
    }

    fn declaration(
        &self,
        name: &str,
        type_name: &str,
        delegate: &str,
    ) -> Result<String, RenderError> {
        Ok(format!("val {}: {} by {}", name, type_name, delegate))
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}
