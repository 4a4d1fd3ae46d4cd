//! Abstract syntax tree for the build-file dialect.
//!
//! Every node carries the [`Token`](crate::lexer::Token) it originated from
//! and a [`CommentMap`] recording any comment absorbed as its leading or
//! trailing annotation. Nodes own their children exclusively; there are no
//! back-references and no cycles.

use crate::lexer::Token;

/// A comment attached to exactly one node, either before it (`leading`) or
/// after it (`trailing`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommentMap {
    pub leading: Option<Comment>,
    pub trailing: Option<Comment>,
}

impl CommentMap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_leading(comment: Comment) -> Self {
        Self {
            leading: Some(comment),
            trailing: None,
        }
    }
}

/// A single `#...` line, or several contiguous ones glued together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Comment {
    Single(SingleLineComment),
    Group(CommentGroup),
}

impl Comment {
    /// Flattens this comment into its constituent lines, in source order.
    pub fn lines(&self) -> Vec<&SingleLineComment> {
        match self {
            Comment::Single(c) => vec![c],
            Comment::Group(g) => g.comments.iter().collect(),
        }
    }

    /// Folds a new single-line comment into this one, producing a group.
    pub fn push(self, next: SingleLineComment) -> Comment {
        match self {
            Comment::Single(first) => Comment::Group(CommentGroup {
                comments: vec![first, next],
            }),
            Comment::Group(mut g) => {
                g.comments.push(next);
                Comment::Group(g)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SingleLineComment {
    /// The full lexeme, including the leading `#`.
    pub text: String,
    pub token: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommentGroup {
    pub comments: Vec<SingleLineComment>,
}

/// The root of a parsed file: an ordered list of top-level statements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Root {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    Expression(ExpressionStatement),
    Block(BlockStatement),
    Comment(CommentStatement),
    FunctionDefinition(FunctionDefinition),
}

impl Statement {
    pub fn token(&self) -> &Token {
        match self {
            Statement::Expression(s) => &s.token,
            Statement::Block(s) => &s.token,
            Statement::Comment(s) => &s.token,
            Statement::FunctionDefinition(s) => &s.token,
        }
    }

    /// Attaches `comment` as this statement's leading comment, in place.
    ///
    /// Used by the RETURN/COMMENT dispatch branch, which may already have
    /// parsed the inner statement before discovering there is a pseudo-
    /// comment that needs to precede it.
    pub fn attach_leading(&mut self, comment: Comment) {
        let map = match self {
            Statement::Expression(s) => &mut s.comments,
            Statement::Block(_) => return,
            Statement::Comment(_) => return,
            Statement::FunctionDefinition(s) => &mut s.comments,
        };
        map.leading = Some(comment);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Option<Expression>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

/// A top-level comment not attached to any following statement, i.e. one
/// immediately followed by a blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommentStatement {
    pub token: Token,
    pub comment: Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionDefinition {
    pub token: Token,
    pub name: Identifier,
    pub params: ParameterList,
    pub type_hint: Option<Expression>,
    pub body: BlockStatement,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParameterList {
    pub token: Token,
    pub elements: Vec<Parameter>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Parameter {
    pub token: Token,
    pub name: Expression,
    pub type_hint: Option<Expression>,
    pub default_value: Option<Expression>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Identifier {
    pub token: Token,
    pub value: String,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
    pub comments: CommentMap,
}

/// Distinguishes the six string-literal variants named in the spec.
/// `StringLiteral` is the single Rust representation for all of them; the
/// prefix tag lives here rather than in six separate struct types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StringPrefix {
    Plain,
    F,
    R,
    B,
    U,
    Doc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
    pub prefix: StringPrefix,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: ExpressionList,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapLiteral {
    pub token: Token,
    pub map: KeyValueExpressionList,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeyValueExpression {
    pub token: Token,
    pub key: Expression,
    pub value: Option<Expression>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KeyValueExpressionList {
    pub token: Token,
    pub pairs: Vec<KeyValueExpression>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExpressionList {
    pub token: Token,
    pub elements: Vec<Expression>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Option<Expression>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InfixExpression {
    pub token: Token,
    pub operator: String,
    pub left: Option<Expression>,
    pub right: Option<Expression>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CallExpression {
    pub token: Token,
    pub function: Option<Expression>,
    pub args: Option<ExpressionList>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DotExpression {
    pub token: Token,
    pub left: Option<Expression>,
    pub right: Option<Expression>,
    pub comments: CommentMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexExpression {
    pub token: Token,
    pub left: Option<Expression>,
    pub index: Option<Expression>,
    pub comments: CommentMap,
}

/// Every expression-producing node variant. Recursive variants are boxed so
/// the enum stays a fixed size; the inner structs hold unboxed `Expression`
/// fields since the `Vec`/`Box` indirection already breaks the recursion.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    BooleanLiteral(BooleanLiteral),
    StringLiteral(StringLiteral),
    ArrayLiteral(ArrayLiteral),
    MapLiteral(MapLiteral),
    KeyValueExpression(Box<KeyValueExpression>),
    PrefixExpression(Box<PrefixExpression>),
    InfixExpression(Box<InfixExpression>),
    CallExpression(Box<CallExpression>),
    DotExpression(Box<DotExpression>),
    IndexExpression(Box<IndexExpression>),
}

impl Expression {
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(e) => &e.token,
            Expression::IntegerLiteral(e) => &e.token,
            Expression::BooleanLiteral(e) => &e.token,
            Expression::StringLiteral(e) => &e.token,
            Expression::ArrayLiteral(e) => &e.token,
            Expression::MapLiteral(e) => &e.token,
            Expression::KeyValueExpression(e) => &e.token,
            Expression::PrefixExpression(e) => &e.token,
            Expression::InfixExpression(e) => &e.token,
            Expression::CallExpression(e) => &e.token,
            Expression::DotExpression(e) => &e.token,
            Expression::IndexExpression(e) => &e.token,
        }
    }

    /// Attaches `comment` as this expression's trailing comment, in place.
    pub fn attach_trailing(&mut self, comment: Comment) {
        let map = match self {
            Expression::Identifier(e) => &mut e.comments,
            Expression::IntegerLiteral(e) => &mut e.comments,
            Expression::BooleanLiteral(e) => &mut e.comments,
            Expression::StringLiteral(e) => &mut e.comments,
            Expression::ArrayLiteral(e) => &mut e.comments,
            Expression::MapLiteral(e) => &mut e.comments,
            Expression::KeyValueExpression(e) => &mut e.comments,
            Expression::PrefixExpression(e) => &mut e.comments,
            Expression::InfixExpression(e) => &mut e.comments,
            Expression::CallExpression(e) => &mut e.comments,
            Expression::DotExpression(e) => &mut e.comments,
            Expression::IndexExpression(e) => &mut e.comments,
        };
        map.trailing = Some(comment);
    }

    /// Attaches `comment` as this expression's leading comment, in place.
    pub fn attach_leading(&mut self, comment: Comment) {
        let map = match self {
            Expression::Identifier(e) => &mut e.comments,
            Expression::IntegerLiteral(e) => &mut e.comments,
            Expression::BooleanLiteral(e) => &mut e.comments,
            Expression::StringLiteral(e) => &mut e.comments,
            Expression::ArrayLiteral(e) => &mut e.comments,
            Expression::MapLiteral(e) => &mut e.comments,
            Expression::KeyValueExpression(e) => &mut e.comments,
            Expression::PrefixExpression(e) => &mut e.comments,
            Expression::InfixExpression(e) => &mut e.comments,
            Expression::CallExpression(e) => &mut e.comments,
            Expression::DotExpression(e) => &mut e.comments,
            Expression::IndexExpression(e) => &mut e.comments,
        };
        map.leading = Some(comment);
    }
}
