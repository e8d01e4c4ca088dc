use crate::tree::{Expression, ScriptTree};

use super::{render_with, Dialect, RenderError, ScriptRenderer, Syntax};

/// Renders trees as Gradle Groovy DSL (`build.gradle`).
///
/// Statement-level calls with arguments use Groovy command syntax
/// (`implementation 'a:b:1'`); nested calls keep their parentheses, and so do
/// statements whose first argument is a list, which Groovy would otherwise
/// read as a subscript.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroovyScriptRenderer;

impl ScriptRenderer for GroovyScriptRenderer {
    fn dialect(&self) -> Dialect {
        Dialect::GroovyDsl
    }

    fn render(&self, tree: &ScriptTree) -> Result<String, RenderError> {
        render_with(self, tree)
    }
}

impl Syntax for GroovyScriptRenderer {
    const DIALECT: Dialect = Dialect::GroovyDsl;

    fn string(&self, value: &str) -> String {
        format!("'{}'", escape_string(value))
    }

    fn call_statement(&self, name: &str, args: &[Expression], rendered: &[String]) -> String {
        match args.first() {
            None | Some(Expression::List(_)) => format!("{}({})", name, rendered.join(", ")),
            Some(_) => format!("{} {}", name, rendered.join(", ")),
        }
    }

    fn named(&self, name: &str, value: &str) -> String {
        format!("{}: {}", name, value)
    }

    fn list(&self, items: &[String]) -> String {
        format!("[{}]", items.join(", "))
    }

    fn declaration(&self, _: &str, _: &str, _: &str) -> Result<String, RenderError> {
        Err(RenderError::Unsupported {
            dialect: Self::DIALECT,
            node: "declaration",
        })
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}
