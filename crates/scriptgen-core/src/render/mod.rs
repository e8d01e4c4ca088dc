//! Serialization of [`ScriptTree`]s into dialect-specific source text.
//!
//! Each [`Dialect`] has one [`ScriptRenderer`]. Rendering is pure and
//! deterministic: the same tree always yields byte-identical text, and
//! statements are emitted in tree order with four-space indentation.
//!
//! Rendering is atomic. If any node cannot be expressed in the target
//! dialect, [`ScriptRenderer::render`] returns a [`RenderError`] and no text.
//!
//! # Example
//!
//! ```
//! use scriptgen_core::builder::ScriptTreeBuilder;
//! use scriptgen_core::render::Dialect;
//!
//! let tree = ScriptTreeBuilder::tree(|b| {
//!     b.block("repositories", |r| {
//!         r.call("mavenCentral", vec![]);
//!     });
//! });
//!
//! let text = Dialect::KotlinDsl.renderer().render(&tree).unwrap();
//! assert_eq!(text, "repositories {\n    mavenCentral()\n}\n");
//! ```

mod groovy;
mod kotlin;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::tree::{Expression, ScriptNode, ScriptTree};

pub use groovy::GroovyScriptRenderer;
pub use kotlin::KotlinScriptRenderer;

const INDENT: &str = "    ";

/// Errors that can occur while rendering a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A statement that requires a name was built without one.
    #[error("{kind} statement has an empty name")]
    EmptyName { kind: &'static str },

    /// The dialect has no syntax for this kind of statement.
    #[error("{dialect} cannot express a {node} statement")]
    Unsupported { dialect: Dialect, node: &'static str },
}

/// A concrete textual syntax for build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `build.gradle.kts`
    #[default]
    KotlinDsl,
    /// `build.gradle`
    GroovyDsl,
}

impl Dialect {
    pub fn renderer(self) -> Box<dyn ScriptRenderer> {
        match self {
            Dialect::KotlinDsl => Box::new(KotlinScriptRenderer),
            Dialect::GroovyDsl => Box::new(GroovyScriptRenderer),
        }
    }

    /// Conventional file name for a build script in this dialect.
    pub fn build_file_name(self) -> &'static str {
        match self {
            Dialect::KotlinDsl => "build.gradle.kts",
            Dialect::GroovyDsl => "build.gradle",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::KotlinDsl => write!(f, "Kotlin DSL"),
            Dialect::GroovyDsl => write!(f, "Groovy DSL"),
        }
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown dialect '{0}' (expected 'kotlin' or 'groovy')")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kotlin" | "kotlin-dsl" | "kts" => Ok(Dialect::KotlinDsl),
            "groovy" | "groovy-dsl" | "gradle" => Ok(Dialect::GroovyDsl),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

/// Serializes a tree into source text of one dialect.
pub trait ScriptRenderer {
    fn dialect(&self) -> Dialect;

    fn render(&self, tree: &ScriptTree) -> Result<String, RenderError>;
}

/// Dialect-specific pieces of syntax. Everything else is shared.
trait Syntax {
    const DIALECT: Dialect;

    fn string(&self, value: &str) -> String;

    /// A call in statement position. `rendered` holds `args` already rendered.
    fn call_statement(&self, name: &str, args: &[Expression], rendered: &[String]) -> String;

    fn named(&self, name: &str, value: &str) -> String;

    fn list(&self, items: &[String]) -> String;

    fn declaration(
        &self,
        name: &str,
        type_name: &str,
        delegate: &str,
    ) -> Result<String, RenderError>;
}

fn render_with<S: Syntax>(syntax: &S, tree: &ScriptTree) -> Result<String, RenderError> {
    debug!(dialect = %S::DIALECT, statements = tree.len(), "rendering script tree");
    let mut writer = ScriptWriter::default();
    write_statements(syntax, &mut writer, tree.statements())?;
    Ok(writer.finish())
}

fn write_statements<S: Syntax>(
    syntax: &S,
    writer: &mut ScriptWriter,
    nodes: &[ScriptNode],
) -> Result<(), RenderError> {
    for node in nodes {
        trace!(kind = node.kind(), depth = writer.depth, "rendering node");
        match node {
            ScriptNode::Call { name, args } => {
                require_name(node, name)?;
                let rendered = render_args(syntax, args)?;
                writer.line(&syntax.call_statement(name, args, &rendered));
            }
            ScriptNode::Assignment { name, value } => {
                require_name(node, name)?;
                let value = render_expression(syntax, value)?;
                writer.line(&format!("{} = {}", name, value));
            }
            ScriptNode::Block { name, args, children } => {
                require_name(node, name)?;
                let header = if args.is_empty() {
                    format!("{} {{", name)
                } else {
                    format!("{}({}) {{", name, render_args(syntax, args)?.join(", "))
                };
                writer.line(&header);
                writer.depth += 1;
                write_statements(syntax, writer, children)?;
                writer.depth -= 1;
                writer.line("}");
            }
            ScriptNode::Expression(expr) => writer.line(&render_expression(syntax, expr)?),
            ScriptNode::Code(text) => writer.line(text),
            ScriptNode::Comment(text) => writer.comment(text),
            ScriptNode::Declaration { name, type_name, delegate } => {
                require_name(node, name)?;
                writer.line(&syntax.declaration(name, type_name, delegate)?);
            }
            ScriptNode::NewLine => writer.blank(),
        }
    }
    Ok(())
}

fn render_args<S: Syntax>(syntax: &S, args: &[Expression]) -> Result<Vec<String>, RenderError> {
    args.iter().map(|arg| render_expression(syntax, arg)).collect()
}

fn render_expression<S: Syntax>(syntax: &S, expr: &Expression) -> Result<String, RenderError> {
    Ok(match expr {
        Expression::String(value) => syntax.string(value),
        Expression::Int(value) => value.to_string(),
        Expression::Bool(value) => value.to_string(),
        Expression::Code(text) => text.clone(),
        Expression::Call { name, args } => {
            if name.is_empty() {
                return Err(RenderError::EmptyName { kind: "call" });
            }
            format!("{}({})", name, render_args(syntax, args)?.join(", "))
        }
        Expression::Infix { left, op, right } => format!(
            "{} {} {}",
            render_expression(syntax, left)?,
            op,
            render_expression(syntax, right)?
        ),
        Expression::Named { name, value } => {
            syntax.named(name, &render_expression(syntax, value)?)
        }
        Expression::List(items) => syntax.list(&render_args(syntax, items)?),
    })
}

fn require_name(node: &ScriptNode, name: &str) -> Result<(), RenderError> {
    if name.is_empty() {
        return Err(RenderError::EmptyName { kind: node.kind() });
    }
    Ok(())
}

/// Line buffer with block indentation.
#[derive(Debug, Default)]
struct ScriptWriter {
    lines: Vec<String>,
    depth: usize,
}

impl ScriptWriter {
    /// One output line per line of `text`. Empty text is a blank line.
    fn line(&mut self, text: &str) {
        if text.is_empty() {
            return self.blank();
        }
        for part in text.lines() {
            if part.is_empty() {
                self.lines.push(String::new());
            } else {
                self.lines.push(format!("{}{}", INDENT.repeat(self.depth), part));
            }
        }
    }

    /// Every line of `text` gets its own `//` marker.
    fn comment(&mut self, text: &str) {
        let indent = INDENT.repeat(self.depth);
        if text.is_empty() {
            self.lines.push(format!("{}//", indent));
            return;
        }
        for part in text.lines() {
            if part.is_empty() {
                self.lines.push(format!("{}//", indent));
            } else {
                self.lines.push(format!("{}// {}", indent, part));
            }
        }
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn finish(self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        self.lines.join("\n") + "\n"
    }
}
