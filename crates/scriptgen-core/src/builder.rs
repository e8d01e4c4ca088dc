//! Fluent accumulation of script statements.
//!
//! [`ScriptTreeBuilder`] collects [`ScriptNode`]s in insertion order. Nested
//! blocks are configured through closures that receive a fresh sub-builder.
//!
//! # Example
//!
//! ```
//! use scriptgen_core::builder::ScriptTreeBuilder;
//!
//! let mut builder = ScriptTreeBuilder::new();
//! builder.block("repositories", |repos| {
//!     repos.call("mavenCentral", vec![]);
//! });
//! // Nothing is emitted for an empty configuration.
//! builder.call_if_not_empty("dependencies", |_| {});
//!
//! let tree = builder.build();
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! # Panics
//!
//! Every method taking a statement name panics when the name is empty. An
//! empty name is a caller bug, not a recoverable condition.

use crate::tree::{Expression, ScriptNode, ScriptTree};

#[derive(Debug, Clone, Default)]
pub struct ScriptTreeBuilder {
    statements: Vec<ScriptNode>,
}

impl ScriptTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree by running `configure` against a fresh builder.
    pub fn tree(configure: impl FnOnce(&mut ScriptTreeBuilder)) -> ScriptTree {
        let mut builder = Self::new();
        configure(&mut builder);
        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn call(&mut self, name: impl Into<String>, args: Vec<Expression>) -> &mut Self {
        let name = checked_name(name);
        self.push(ScriptNode::Call { name, args })
    }

    pub fn assign(&mut self, name: impl Into<String>, value: impl Into<Expression>) -> &mut Self {
        let name = checked_name(name);
        self.push(ScriptNode::Assignment { name, value: value.into() })
    }

    /// `name { ... }`, emitted even when the block ends up empty.
    pub fn block(
        &mut self,
        name: impl Into<String>,
        configure: impl FnOnce(&mut ScriptTreeBuilder),
    ) -> &mut Self {
        self.call_block(name, Vec::new(), configure)
    }

    /// `name(args) { ... }`, emitted even when the block ends up empty.
    pub fn call_block(
        &mut self,
        name: impl Into<String>,
        args: Vec<Expression>,
        configure: impl FnOnce(&mut ScriptTreeBuilder),
    ) -> &mut Self {
        let name = checked_name(name);
        let children = Self::tree(configure).into_statements();
        self.push(ScriptNode::Block { name, args, children })
    }

    /// Adds `name { ... }` only if `configure` produced at least one statement.
    pub fn call_if_not_empty(
        &mut self,
        name: impl Into<String>,
        configure: impl FnOnce(&mut ScriptTreeBuilder),
    ) -> &mut Self {
        let name = checked_name(name);
        let children = Self::tree(configure).into_statements();
        if children.is_empty() {
            return self;
        }
        self.push(ScriptNode::Block { name, args: Vec::new(), children })
    }

    pub fn expression(&mut self, expr: Expression) -> &mut Self {
        self.push(ScriptNode::Expression(expr))
    }

    pub fn code(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(ScriptNode::Code(text.into()))
    }

    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(ScriptNode::Comment(text.into()))
    }

    /// `val name: type_name by delegate` (Kotlin DSL only).
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        delegate: impl Into<String>,
    ) -> &mut Self {
        let name = checked_name(name);
        self.push(ScriptNode::Declaration {
            name,
            type_name: type_name.into(),
            delegate: delegate.into(),
        })
    }

    pub fn new_line(&mut self) -> &mut Self {
        self.push(ScriptNode::NewLine)
    }

    /// Append every statement of `tree`, preserving order.
    pub fn join(&mut self, tree: ScriptTree) -> &mut Self {
        self.statements.extend(tree.into_statements());
        self
    }

    /// Append the statements of `tree` that are not already present.
    pub fn join_unique(&mut self, tree: ScriptTree) -> &mut Self {
        for node in tree.into_statements() {
            if !self.statements.contains(&node) {
                self.statements.push(node);
            }
        }
        self
    }

    pub fn build(self) -> ScriptTree {
        ScriptTree::new(self.statements)
    }

    fn push(&mut self, node: ScriptNode) -> &mut Self {
        self.statements.push(node);
        self
    }
}

fn checked_name(name: impl Into<String>) -> String {
    let name = name.into();
    assert!(!name.is_empty(), "script statement name must not be empty");
    name
}
