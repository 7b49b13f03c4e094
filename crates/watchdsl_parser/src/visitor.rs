//! Generic visitor for traversing a parsed rule.
//!
//! The [`AstVisitor`] trait walks a [`Program`] (or any node inside it) and hands
//! every node to a closure as `&dyn Any`, parent first, children in source order.
//! Callers downcast to the node types they care about.
//!
//! # Example
//!
//! ```rust
//! use watchdsl_parser::{ast::Condition, lex_and_parse, visitor::AstVisitor};
//!
//! let program = lex_and_parse("WHERE amount > 100 AND to == bob").unwrap();
//! let mut fields = vec![];
//! program.visit(&mut |node| {
//!     if let Some(condition) = node.downcast_ref::<Condition>() {
//!         fields.push(condition.left.clone());
//!     }
//! });
//! assert_eq!(fields, ["amount", "to"]);
//! ```

use std::any::Any;

use crate::ast::{Condition, Operand, Program, PublishTarget, Statement};

/// Trait for recursively visiting every node of a rule's AST.
pub trait AstVisitor {
    /// Visit this node and then all of its children, calling `f` on each.
    ///
    /// # Arguments
    /// * `f` - A mutable function or closure that takes a `&dyn Any` reference to each node.
    fn visit<F: FnMut(&dyn Any)>(&self, f: &mut F);
}

/// Visitor implementation for `Program`.
impl AstVisitor for Program {
    fn visit<F: FnMut(&dyn Any)>(&self, f: &mut F) {
        f(self);
        for statement in &self.statements {
            statement.visit(f);
        }
    }
}

/// Visitor implementation for `Statement`.
impl AstVisitor for Statement {
    fn visit<F: FnMut(&dyn Any)>(&self, f: &mut F) {
        f(self);
        match self {
            Statement::Source { .. } | Statement::Watch { .. } => {}
            Statement::Where { condition }
            | Statement::And { condition }
            | Statement::Or { condition } => {
                condition.visit(f);
            }
            Statement::Publish { target, .. } => {
                target.visit(f);
            }
        }
    }
}

/// Visitor implementation for `Condition`.
impl AstVisitor for Condition {
    fn visit<F: FnMut(&dyn Any)>(&self, f: &mut F) {
        f(self);
        self.right.visit(f);
    }
}

/// Visitor implementation for `Operand`.
impl AstVisitor for Operand {
    fn visit<F: FnMut(&dyn Any)>(&self, f: &mut F) {
        f(self);
    }
}

/// Visitor implementation for `PublishTarget`.
impl AstVisitor for PublishTarget {
    fn visit<F: FnMut(&dyn Any)>(&self, f: &mut F) {
        f(self);
    }
}
