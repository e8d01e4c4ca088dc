//! Dialect-neutral representation of build-script statements.
//!
//! A [`ScriptTree`] is an ordered list of [`ScriptNode`] statements. It is
//! produced by [`ScriptTreeBuilder`](crate::builder::ScriptTreeBuilder) and
//! consumed by a [`ScriptRenderer`](crate::render::ScriptRenderer). Order is
//! significant: renderers emit statements exactly as they were inserted.
//!
//! # Example
//!
//! ```
//! use scriptgen_core::tree::{Expression, ScriptNode, ScriptTree};
//!
//! let tree = ScriptTree::new(vec![ScriptNode::Call {
//!     name: "testCompile".to_string(),
//!     args: vec![Expression::from("junit:junit:4.12")],
//! }]);
//! assert_eq!(tree.len(), 1);
//! ```

/// A complete, immutable script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptTree {
    statements: Vec<ScriptNode>,
}

impl ScriptTree {
    pub fn new(statements: Vec<ScriptNode>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[ScriptNode] {
        &self.statements
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn into_statements(self) -> Vec<ScriptNode> {
        self.statements
    }
}

/// A single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptNode {
    /// `name(args)`
    Call {
        name: String,
        args: Vec<Expression>,
    },
    /// `name = value`
    Assignment {
        name: String,
        value: Expression,
    },
    /// `name(args) { children }`; `args` may be empty.
    Block {
        name: String,
        args: Vec<Expression>,
        children: Vec<ScriptNode>,
    },
    /// An expression in statement position, e.g. `kotlin("jvm") version "1.7.20"`.
    Expression(Expression),
    /// Raw statement text, emitted verbatim.
    Code(String),
    /// Line comment, without the leading marker.
    Comment(String),
    /// Typed delegated property, e.g. `val compileKotlin: KotlinCompile by tasks`.
    Declaration {
        name: String,
        type_name: String,
        delegate: String,
    },
    /// Blank line.
    NewLine,
}

impl ScriptNode {
    /// Short name of the node kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptNode::Call { .. } => "call",
            ScriptNode::Assignment { .. } => "assignment",
            ScriptNode::Block { .. } => "block",
            ScriptNode::Expression(_) => "expression",
            ScriptNode::Code(_) => "code",
            ScriptNode::Comment(_) => "comment",
            ScriptNode::Declaration { .. } => "declaration",
            ScriptNode::NewLine => "new line",
        }
    }
}

/// A value appearing as a call argument or assignment right-hand side.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    String(String),
    Int(i64),
    Bool(bool),
    /// Raw expression text, emitted verbatim.
    Code(String),
    /// Nested call, e.g. `kotlin("stdlib-jdk8")`.
    Call {
        name: String,
        args: Vec<Expression>,
    },
    /// Infix call, e.g. `kotlin("jvm") version "1.7.20"`.
    Infix {
        left: Box<Expression>,
        op: String,
        right: Box<Expression>,
    },
    /// Named argument, e.g. `plugin = "java"` / `plugin: 'java'`.
    Named {
        name: String,
        value: Box<Expression>,
    },
    List(Vec<Expression>),
}

impl Expression {
    pub fn string(value: impl Into<String>) -> Self {
        Expression::String(value.into())
    }

    pub fn code(text: impl Into<String>) -> Self {
        Expression::Code(text.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Call { name: name.into(), args }
    }

    pub fn infix(left: Expression, op: impl Into<String>, right: Expression) -> Self {
        Expression::Infix {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    pub fn named(name: impl Into<String>, value: Expression) -> Self {
        Expression::Named {
            name: name.into(),
            value: Box::new(value),
        }
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Expression::String(value.to_string())
    }
}

impl From<String> for Expression {
    fn from(value: String) -> Self {
        Expression::String(value)
    }
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Expression::Int(value)
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::Bool(value)
    }
}
