//! Syntax tree produced by the [`Parser`](crate::parser::Parser).
//!
//! Expressions carry an [`ExprId`] assigned at construction time. The
//! resolver keys its distance table on that id, so two textually identical
//! expressions at different places in the source resolve independently.

use std::rc::Rc;

use serde::Serialize;

use crate::token::Token;

/// Stable identity of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ExprId(pub usize);

/// A **literal constant** that appears directly in the source code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Numeric literal, stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    True,

    False,

    Nil,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    pub id: ExprId,
    pub kind: ExprKind,
}

/// Every kind of expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    Literal(LiteralValue),

    /// Prefix operator: `!ready`, `-42`.
    Unary {
        operator: Token,
        right: Box<Expr>,
    },

    /// Infix arithmetic, comparison or equality operator.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Parenthesised sub‑expression.
    Grouping(Box<Expr>),

    Variable(Token),

    /// `name = value`
    Assign {
        name: Token,
        value: Box<Expr>,
    },

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    Call {
        callee: Box<Expr>,
        /// The closing `)` token, kept for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// `object.name`
    Get {
        object: Box<Expr>,
        name: Token,
    },

    /// `object.name = value`
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    This(Token),

    /// `super.method`
    Super {
        keyword: Token,
        method: Token,
    },
}

impl Expr {
    pub fn new(id: ExprId, kind: ExprKind) -> Self {
        Self { id, kind }
    }

    /// Source line of the token that anchors this expression. Literals
    /// keep no token, so they (and groupings of them) have no line.
    pub fn line(&self) -> Option<usize> {
        let line = match &self.kind {
            ExprKind::Literal(_) => return None,
            ExprKind::Grouping(inner) => return inner.line(),
            ExprKind::Unary { operator, .. } => operator.line,
            ExprKind::Binary { operator, .. } => operator.line,
            ExprKind::Variable(name) => name.line,
            ExprKind::Assign { name, .. } => name.line,
            ExprKind::Logical { operator, .. } => operator.line,
            ExprKind::Call { paren, .. } => paren.line,
            ExprKind::Get { name, .. } => name.line,
            ExprKind::Set { name, .. } => name.line,
            ExprKind::This(keyword) => keyword.line,
            ExprKind::Super { keyword, .. } => keyword.line,
        };

        Some(line)
    }
}

/// A named function or method: `name(params) { body }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

/// Statements. A program is a `Vec<Stmt>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Expression evaluated for its side effects.
    Expression(Expr),

    /// `var name (= initializer)?;`
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `while` loop; `for` loops are desugared into this.
    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    /// Shared so that every function value created from it can point back
    /// at the declaration without copying the body.
    Function(Rc<FunctionDecl>),

    Return {
        keyword: Token,
        value: Option<Expr>,
    },

    /// `class Name (: Superclass)? { methods }`. The superclass is always
    /// an [`ExprKind::Variable`].
    Class {
        name: Token,
        superclass: Option<Expr>,
        methods: Vec<Rc<FunctionDecl>>,
    },
}
