//! AST node types.
//!
//! Every node lives in a [`NodeArena`](crate::NodeArena) and is referred to
//! by [`NodeIndex`]. `NodeData` is a closed enum: one variant per node kind,
//! carrying exactly that kind's fields. Plugins cannot add kinds, so the
//! type-annotation and JSX node kinds are part of the enum.

use plait_common::{SourceLocation, SourceType};
use serde::Serialize;
use smallvec::SmallVec;

/// Index of a node in its arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered child list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
}

impl NodeList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, node: NodeIndex) {
        self.nodes.push(node);
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes.iter().copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }
}

impl From<Vec<NodeIndex>> for NodeList {
    fn from(nodes: Vec<NodeIndex>) -> Self {
        Self { nodes }
    }
}

/// A finished node: byte span, line/column span and kind-specific data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    pub pos: u32,
    pub end: u32,
    pub loc: SourceLocation,
    pub data: NodeData,
}

// =============================================================================
// Scalar enums
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Public,
    Private,
    Protected,
}

impl Accessibility {
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "public" => Some(Accessibility::Public),
            "private" => Some(Accessibility::Private),
            "protected" => Some(Accessibility::Protected),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Private => "private",
            Accessibility::Protected => "protected",
        }
    }
}

/// Predefined keyword types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TsKeyword {
    Any,
    Unknown,
    Number,
    BigInt,
    Boolean,
    String,
    Symbol,
    Object,
    Void,
    Undefined,
    Null,
    Never,
}

impl TsKeyword {
    #[must_use]
    pub fn from_text(text: &str) -> Option<Self> {
        let keyword = match text {
            "any" => TsKeyword::Any,
            "unknown" => TsKeyword::Unknown,
            "number" => TsKeyword::Number,
            "bigint" => TsKeyword::BigInt,
            "boolean" => TsKeyword::Boolean,
            "string" => TsKeyword::String,
            "symbol" => TsKeyword::Symbol,
            "object" => TsKeyword::Object,
            "void" => TsKeyword::Void,
            "undefined" => TsKeyword::Undefined,
            "null" => TsKeyword::Null,
            "never" => TsKeyword::Never,
            _ => return None,
        };
        Some(keyword)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TsKeyword::Any => "any",
            TsKeyword::Unknown => "unknown",
            TsKeyword::Number => "number",
            TsKeyword::BigInt => "bigint",
            TsKeyword::Boolean => "boolean",
            TsKeyword::String => "string",
            TsKeyword::Symbol => "symbol",
            TsKeyword::Object => "object",
            TsKeyword::Void => "void",
            TsKeyword::Undefined => "undefined",
            TsKeyword::Null => "null",
            TsKeyword::Never => "never",
        }
    }

    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            TsKeyword::Any => "TSAnyKeyword",
            TsKeyword::Unknown => "TSUnknownKeyword",
            TsKeyword::Number => "TSNumberKeyword",
            TsKeyword::BigInt => "TSBigIntKeyword",
            TsKeyword::Boolean => "TSBooleanKeyword",
            TsKeyword::String => "TSStringKeyword",
            TsKeyword::Symbol => "TSSymbolKeyword",
            TsKeyword::Object => "TSObjectKeyword",
            TsKeyword::Void => "TSVoidKeyword",
            TsKeyword::Undefined => "TSUndefinedKeyword",
            TsKeyword::Null => "TSNullKeyword",
            TsKeyword::Never => "TSNeverKeyword",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeOperator {
    KeyOf,
    Readonly,
}

impl TypeOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeOperator::KeyOf => "keyof",
            TypeOperator::Readonly => "readonly",
        }
    }
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Equality,
    Inequality,
    StrictEquality,
    StrictInequality,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
    Exponentiation,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    In,
    InstanceOf,
}

impl BinaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::Equality => "==",
            BinaryOperator::Inequality => "!=",
            BinaryOperator::StrictEquality => "===",
            BinaryOperator::StrictInequality => "!==",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::ShiftRightUnsigned => ">>>",
            BinaryOperator::Addition => "+",
            BinaryOperator::Subtraction => "-",
            BinaryOperator::Multiplication => "*",
            BinaryOperator::Division => "/",
            BinaryOperator::Remainder => "%",
            BinaryOperator::Exponentiation => "**",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::In => "in",
            BinaryOperator::InstanceOf => "instanceof",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LogicalOperator {
    Or,
    And,
    Coalesce,
}

impl LogicalOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LogicalOperator::Or => "||",
            LogicalOperator::And => "&&",
            LogicalOperator::Coalesce => "??",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    Minus,
    Plus,
    LogicalNot,
    BitwiseNot,
    TypeOf,
    Void,
    Delete,
}

impl UnaryOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::TypeOf => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

impl UpdateOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AssignmentOperator {
    Assign,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
    Exponentiation,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    LogicalOr,
    LogicalAnd,
    LogicalNullish,
}

impl AssignmentOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::Addition => "+=",
            AssignmentOperator::Subtraction => "-=",
            AssignmentOperator::Multiplication => "*=",
            AssignmentOperator::Division => "/=",
            AssignmentOperator::Remainder => "%=",
            AssignmentOperator::Exponentiation => "**=",
            AssignmentOperator::ShiftLeft => "<<=",
            AssignmentOperator::ShiftRight => ">>=",
            AssignmentOperator::ShiftRightUnsigned => ">>>=",
            AssignmentOperator::BitwiseOr => "|=",
            AssignmentOperator::BitwiseXor => "^=",
            AssignmentOperator::BitwiseAnd => "&=",
            AssignmentOperator::LogicalOr => "||=",
            AssignmentOperator::LogicalAnd => "&&=",
            AssignmentOperator::LogicalNullish => "??=",
        }
    }
}

// =============================================================================
// Shared data records
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionData {
    pub id: Option<NodeIndex>,
    pub type_parameters: Option<NodeIndex>,
    pub params: NodeList,
    pub return_type: Option<NodeIndex>,
    pub body: NodeIndex,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassData {
    pub id: Option<NodeIndex>,
    pub type_parameters: Option<NodeIndex>,
    pub super_class: Option<NodeIndex>,
    pub super_type_arguments: Option<NodeIndex>,
    pub implements: NodeList,
    pub body: NodeIndex,
}

/// Parameter list and return type of a function-like type member.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignatureData {
    pub type_parameters: Option<NodeIndex>,
    pub parameters: NodeList,
    pub return_type: Option<NodeIndex>,
}

// =============================================================================
// NodeData
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum NodeData {
    Program {
        body: NodeList,
        source_type: SourceType,
    },

    // Statements
    ExpressionStatement {
        expression: NodeIndex,
        /// Raw text of a directive prologue entry (`"use strict"`).
        directive: Option<String>,
    },
    BlockStatement {
        body: NodeList,
    },
    EmptyStatement,
    DebuggerStatement,
    WithStatement {
        object: NodeIndex,
        body: NodeIndex,
    },
    ReturnStatement {
        argument: Option<NodeIndex>,
    },
    LabeledStatement {
        label: NodeIndex,
        body: NodeIndex,
    },
    BreakStatement {
        label: Option<NodeIndex>,
    },
    ContinueStatement {
        label: Option<NodeIndex>,
    },
    IfStatement {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: Option<NodeIndex>,
    },
    SwitchStatement {
        discriminant: NodeIndex,
        cases: NodeList,
    },
    SwitchCase {
        test: Option<NodeIndex>,
        consequent: NodeList,
    },
    ThrowStatement {
        argument: NodeIndex,
    },
    TryStatement {
        block: NodeIndex,
        handler: Option<NodeIndex>,
        finalizer: Option<NodeIndex>,
    },
    CatchClause {
        param: Option<NodeIndex>,
        body: NodeIndex,
    },
    WhileStatement {
        test: NodeIndex,
        body: NodeIndex,
    },
    DoWhileStatement {
        body: NodeIndex,
        test: NodeIndex,
    },
    ForStatement {
        init: Option<NodeIndex>,
        test: Option<NodeIndex>,
        update: Option<NodeIndex>,
        body: NodeIndex,
    },
    ForInStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
    },
    ForOfStatement {
        left: NodeIndex,
        right: NodeIndex,
        body: NodeIndex,
        is_await: bool,
    },
    VariableDeclaration {
        kind: VariableKind,
        declarations: NodeList,
    },
    VariableDeclarator {
        id: NodeIndex,
        init: Option<NodeIndex>,
    },
    FunctionDeclaration(FunctionData),
    ClassDeclaration(ClassData),

    // Modules
    ImportDeclaration {
        specifiers: NodeList,
        source: NodeIndex,
    },
    ImportSpecifier {
        imported: NodeIndex,
        local: NodeIndex,
    },
    ImportDefaultSpecifier {
        local: NodeIndex,
    },
    ImportNamespaceSpecifier {
        local: NodeIndex,
    },
    ExportNamedDeclaration {
        declaration: Option<NodeIndex>,
        specifiers: NodeList,
        source: Option<NodeIndex>,
    },
    ExportSpecifier {
        local: NodeIndex,
        exported: NodeIndex,
    },
    ExportDefaultDeclaration {
        declaration: NodeIndex,
    },
    ExportAllDeclaration {
        exported: Option<NodeIndex>,
        source: NodeIndex,
    },

    // Classes
    ClassBody {
        body: NodeList,
    },
    MethodDefinition {
        key: NodeIndex,
        value: NodeIndex,
        kind: MethodKind,
        computed: bool,
        is_static: bool,
        accessibility: Option<Accessibility>,
    },
    PropertyDefinition {
        key: NodeIndex,
        value: Option<NodeIndex>,
        computed: bool,
        is_static: bool,
        optional: bool,
        readonly: bool,
        accessibility: Option<Accessibility>,
        type_annotation: Option<NodeIndex>,
    },
    StaticBlock {
        body: NodeList,
    },

    // Expressions
    Identifier {
        name: String,
        optional: bool,
        type_annotation: Option<NodeIndex>,
    },
    PrivateName {
        name: String,
    },
    NullLiteral,
    BooleanLiteral {
        value: bool,
    },
    NumericLiteral {
        value: f64,
        raw: String,
    },
    BigIntLiteral {
        raw: String,
    },
    StringLiteral {
        value: String,
        raw: String,
    },
    RegExpLiteral {
        pattern: String,
        flags: String,
    },
    TemplateLiteral {
        quasis: NodeList,
        expressions: NodeList,
    },
    TemplateElement {
        raw: String,
        /// `None` when the chunk has an escape with no cooked value.
        cooked: Option<String>,
        tail: bool,
    },
    TaggedTemplateExpression {
        tag: NodeIndex,
        type_arguments: Option<NodeIndex>,
        quasi: NodeIndex,
    },
    ThisExpression,
    Super,
    ArrayExpression {
        /// `None` is an elision hole.
        elements: Vec<Option<NodeIndex>>,
    },
    ObjectExpression {
        properties: NodeList,
    },
    Property {
        key: NodeIndex,
        value: NodeIndex,
        kind: PropertyKind,
        computed: bool,
        shorthand: bool,
        method: bool,
    },
    SpreadElement {
        argument: NodeIndex,
    },
    FunctionExpression(FunctionData),
    ArrowFunctionExpression {
        type_parameters: Option<NodeIndex>,
        params: NodeList,
        return_type: Option<NodeIndex>,
        body: NodeIndex,
        /// Body is an expression rather than a block.
        expression: bool,
        is_async: bool,
    },
    ClassExpression(ClassData),
    UnaryExpression {
        operator: UnaryOperator,
        argument: NodeIndex,
    },
    UpdateExpression {
        operator: UpdateOperator,
        prefix: bool,
        argument: NodeIndex,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: NodeIndex,
        right: NodeIndex,
    },
    LogicalExpression {
        operator: LogicalOperator,
        left: NodeIndex,
        right: NodeIndex,
    },
    AssignmentExpression {
        operator: AssignmentOperator,
        left: NodeIndex,
        right: NodeIndex,
    },
    ConditionalExpression {
        test: NodeIndex,
        consequent: NodeIndex,
        alternate: NodeIndex,
    },
    CallExpression {
        callee: NodeIndex,
        type_arguments: Option<NodeIndex>,
        arguments: NodeList,
        optional: bool,
    },
    NewExpression {
        callee: NodeIndex,
        type_arguments: Option<NodeIndex>,
        arguments: NodeList,
    },
    MemberExpression {
        object: NodeIndex,
        property: NodeIndex,
        computed: bool,
        optional: bool,
    },
    SequenceExpression {
        expressions: NodeList,
    },
    ParenthesizedExpression {
        expression: NodeIndex,
    },
    YieldExpression {
        argument: Option<NodeIndex>,
        delegate: bool,
    },
    AwaitExpression {
        argument: NodeIndex,
    },
    MetaProperty {
        meta: NodeIndex,
        property: NodeIndex,
    },
    ImportExpression {
        source: NodeIndex,
    },

    // Patterns
    ObjectPattern {
        properties: NodeList,
        type_annotation: Option<NodeIndex>,
    },
    ArrayPattern {
        elements: Vec<Option<NodeIndex>>,
        type_annotation: Option<NodeIndex>,
    },
    RestElement {
        argument: NodeIndex,
        type_annotation: Option<NodeIndex>,
    },
    AssignmentPattern {
        left: NodeIndex,
        right: NodeIndex,
    },

    // Types
    TsKeywordType {
        keyword: TsKeyword,
    },
    TsThisType,
    TsTypeReference {
        type_name: NodeIndex,
        type_arguments: Option<NodeIndex>,
    },
    TsQualifiedName {
        left: NodeIndex,
        right: NodeIndex,
    },
    TsTypeParameterDeclaration {
        params: NodeList,
    },
    TsTypeParameter {
        name: String,
        constraint: Option<NodeIndex>,
        default: Option<NodeIndex>,
    },
    TsTypeParameterInstantiation {
        params: NodeList,
    },
    TsTypeQuery {
        expr_name: NodeIndex,
    },
    TsTypeOperator {
        operator: TypeOperator,
        type_annotation: NodeIndex,
    },
    TsLiteralType {
        literal: NodeIndex,
    },
    TsArrayType {
        element_type: NodeIndex,
    },
    TsIndexedAccessType {
        object_type: NodeIndex,
        index_type: NodeIndex,
    },
    TsTupleType {
        element_types: NodeList,
    },
    TsRestType {
        type_annotation: NodeIndex,
    },
    TsParenthesizedType {
        type_annotation: NodeIndex,
    },
    TsFunctionType(SignatureData),
    TsConstructorType(SignatureData),
    TsUnionType {
        types: NodeList,
    },
    TsIntersectionType {
        types: NodeList,
    },
    TsTypeLiteral {
        members: NodeList,
    },
    TsPropertySignature {
        key: NodeIndex,
        computed: bool,
        optional: bool,
        readonly: bool,
        type_annotation: Option<NodeIndex>,
    },
    TsMethodSignature {
        key: NodeIndex,
        computed: bool,
        optional: bool,
        type_parameters: Option<NodeIndex>,
        parameters: NodeList,
        return_type: Option<NodeIndex>,
    },
    TsCallSignatureDeclaration(SignatureData),
    TsConstructSignatureDeclaration(SignatureData),
    TsIndexSignature {
        parameters: NodeList,
        type_annotation: Option<NodeIndex>,
        readonly: bool,
    },
    TsInterfaceDeclaration {
        id: NodeIndex,
        type_parameters: Option<NodeIndex>,
        extends: NodeList,
        body: NodeIndex,
    },
    TsInterfaceBody {
        body: NodeList,
    },
    TsExpressionWithTypeArguments {
        expression: NodeIndex,
        type_arguments: Option<NodeIndex>,
    },
    TsTypeAliasDeclaration {
        id: NodeIndex,
        type_parameters: Option<NodeIndex>,
        type_annotation: NodeIndex,
    },
    TsEnumDeclaration {
        id: NodeIndex,
        members: NodeList,
        is_const: bool,
    },
    TsEnumMember {
        id: NodeIndex,
        initializer: Option<NodeIndex>,
    },
    TsAsExpression {
        expression: NodeIndex,
        type_annotation: NodeIndex,
    },
    TsTypeAssertion {
        type_annotation: NodeIndex,
        expression: NodeIndex,
    },
    TsNonNullExpression {
        expression: NodeIndex,
    },
    TsParameterProperty {
        accessibility: Option<Accessibility>,
        readonly: bool,
        parameter: NodeIndex,
    },

    // Structural types
    NullableTypeAnnotation {
        type_annotation: NodeIndex,
    },
    TypeAlias {
        id: NodeIndex,
        type_parameters: Option<NodeIndex>,
        right: NodeIndex,
    },

    // JSX
    JsxElement {
        opening: NodeIndex,
        children: NodeList,
        closing: Option<NodeIndex>,
    },
    JsxOpeningElement {
        name: NodeIndex,
        attributes: NodeList,
        self_closing: bool,
    },
    JsxClosingElement {
        name: NodeIndex,
    },
    JsxFragment {
        children: NodeList,
    },
    JsxAttribute {
        name: NodeIndex,
        value: Option<NodeIndex>,
    },
    JsxSpreadAttribute {
        argument: NodeIndex,
    },
    JsxIdentifier {
        name: String,
    },
    JsxNamespacedName {
        namespace: NodeIndex,
        name: NodeIndex,
    },
    JsxMemberExpression {
        object: NodeIndex,
        property: NodeIndex,
    },
    JsxExpressionContainer {
        /// `None` for an empty container (`{}` or `{/* comment */}`).
        expression: Option<NodeIndex>,
    },
    JsxText {
        value: String,
        raw: String,
    },
}

type Children = SmallVec<[NodeIndex; 4]>;

fn push_opt(out: &mut Children, node: Option<NodeIndex>) {
    if let Some(node) = node {
        out.push(node);
    }
}

fn push_holes(out: &mut Children, elements: &[Option<NodeIndex>]) {
    out.extend(elements.iter().flatten().copied());
}

fn push_signature(out: &mut Children, sig: &SignatureData) {
    push_opt(out, sig.type_parameters);
    out.extend(sig.parameters.iter());
    push_opt(out, sig.return_type);
}

impl NodeData {
    /// ESTree-style name of the node kind.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeData::Program { .. } => "Program",
            NodeData::ExpressionStatement { .. } => "ExpressionStatement",
            NodeData::BlockStatement { .. } => "BlockStatement",
            NodeData::EmptyStatement => "EmptyStatement",
            NodeData::DebuggerStatement => "DebuggerStatement",
            NodeData::WithStatement { .. } => "WithStatement",
            NodeData::ReturnStatement { .. } => "ReturnStatement",
            NodeData::LabeledStatement { .. } => "LabeledStatement",
            NodeData::BreakStatement { .. } => "BreakStatement",
            NodeData::ContinueStatement { .. } => "ContinueStatement",
            NodeData::IfStatement { .. } => "IfStatement",
            NodeData::SwitchStatement { .. } => "SwitchStatement",
            NodeData::SwitchCase { .. } => "SwitchCase",
            NodeData::ThrowStatement { .. } => "ThrowStatement",
            NodeData::TryStatement { .. } => "TryStatement",
            NodeData::CatchClause { .. } => "CatchClause",
            NodeData::WhileStatement { .. } => "WhileStatement",
            NodeData::DoWhileStatement { .. } => "DoWhileStatement",
            NodeData::ForStatement { .. } => "ForStatement",
            NodeData::ForInStatement { .. } => "ForInStatement",
            NodeData::ForOfStatement { .. } => "ForOfStatement",
            NodeData::VariableDeclaration { .. } => "VariableDeclaration",
            NodeData::VariableDeclarator { .. } => "VariableDeclarator",
            NodeData::FunctionDeclaration(_) => "FunctionDeclaration",
            NodeData::ClassDeclaration(_) => "ClassDeclaration",
            NodeData::ImportDeclaration { .. } => "ImportDeclaration",
            NodeData::ImportSpecifier { .. } => "ImportSpecifier",
            NodeData::ImportDefaultSpecifier { .. } => "ImportDefaultSpecifier",
            NodeData::ImportNamespaceSpecifier { .. } => "ImportNamespaceSpecifier",
            NodeData::ExportNamedDeclaration { .. } => "ExportNamedDeclaration",
            NodeData::ExportSpecifier { .. } => "ExportSpecifier",
            NodeData::ExportDefaultDeclaration { .. } => "ExportDefaultDeclaration",
            NodeData::ExportAllDeclaration { .. } => "ExportAllDeclaration",
            NodeData::ClassBody { .. } => "ClassBody",
            NodeData::MethodDefinition { .. } => "MethodDefinition",
            NodeData::PropertyDefinition { .. } => "PropertyDefinition",
            NodeData::StaticBlock { .. } => "StaticBlock",
            NodeData::Identifier { .. } => "Identifier",
            NodeData::PrivateName { .. } => "PrivateName",
            NodeData::NullLiteral => "NullLiteral",
            NodeData::BooleanLiteral { .. } => "BooleanLiteral",
            NodeData::NumericLiteral { .. } => "NumericLiteral",
            NodeData::BigIntLiteral { .. } => "BigIntLiteral",
            NodeData::StringLiteral { .. } => "StringLiteral",
            NodeData::RegExpLiteral { .. } => "RegExpLiteral",
            NodeData::TemplateLiteral { .. } => "TemplateLiteral",
            NodeData::TemplateElement { .. } => "TemplateElement",
            NodeData::TaggedTemplateExpression { .. } => "TaggedTemplateExpression",
            NodeData::ThisExpression => "ThisExpression",
            NodeData::Super => "Super",
            NodeData::ArrayExpression { .. } => "ArrayExpression",
            NodeData::ObjectExpression { .. } => "ObjectExpression",
            NodeData::Property { .. } => "Property",
            NodeData::SpreadElement { .. } => "SpreadElement",
            NodeData::FunctionExpression(_) => "FunctionExpression",
            NodeData::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            NodeData::ClassExpression(_) => "ClassExpression",
            NodeData::UnaryExpression { .. } => "UnaryExpression",
            NodeData::UpdateExpression { .. } => "UpdateExpression",
            NodeData::BinaryExpression { .. } => "BinaryExpression",
            NodeData::LogicalExpression { .. } => "LogicalExpression",
            NodeData::AssignmentExpression { .. } => "AssignmentExpression",
            NodeData::ConditionalExpression { .. } => "ConditionalExpression",
            NodeData::CallExpression { .. } => "CallExpression",
            NodeData::NewExpression { .. } => "NewExpression",
            NodeData::MemberExpression { .. } => "MemberExpression",
            NodeData::SequenceExpression { .. } => "SequenceExpression",
            NodeData::ParenthesizedExpression { .. } => "ParenthesizedExpression",
            NodeData::YieldExpression { .. } => "YieldExpression",
            NodeData::AwaitExpression { .. } => "AwaitExpression",
            NodeData::MetaProperty { .. } => "MetaProperty",
            NodeData::ImportExpression { .. } => "ImportExpression",
            NodeData::ObjectPattern { .. } => "ObjectPattern",
            NodeData::ArrayPattern { .. } => "ArrayPattern",
            NodeData::RestElement { .. } => "RestElement",
            NodeData::AssignmentPattern { .. } => "AssignmentPattern",
            NodeData::TsKeywordType { keyword } => keyword.type_name(),
            NodeData::TsThisType => "TSThisType",
            NodeData::TsTypeReference { .. } => "TSTypeReference",
            NodeData::TsQualifiedName { .. } => "TSQualifiedName",
            NodeData::TsTypeParameterDeclaration { .. } => "TSTypeParameterDeclaration",
            NodeData::TsTypeParameter { .. } => "TSTypeParameter",
            NodeData::TsTypeParameterInstantiation { .. } => "TSTypeParameterInstantiation",
            NodeData::TsTypeQuery { .. } => "TSTypeQuery",
            NodeData::TsTypeOperator { .. } => "TSTypeOperator",
            NodeData::TsLiteralType { .. } => "TSLiteralType",
            NodeData::TsArrayType { .. } => "TSArrayType",
            NodeData::TsIndexedAccessType { .. } => "TSIndexedAccessType",
            NodeData::TsTupleType { .. } => "TSTupleType",
            NodeData::TsRestType { .. } => "TSRestType",
            NodeData::TsParenthesizedType { .. } => "TSParenthesizedType",
            NodeData::TsFunctionType(_) => "TSFunctionType",
            NodeData::TsConstructorType(_) => "TSConstructorType",
            NodeData::TsUnionType { .. } => "TSUnionType",
            NodeData::TsIntersectionType { .. } => "TSIntersectionType",
            NodeData::TsTypeLiteral { .. } => "TSTypeLiteral",
            NodeData::TsPropertySignature { .. } => "TSPropertySignature",
            NodeData::TsMethodSignature { .. } => "TSMethodSignature",
            NodeData::TsCallSignatureDeclaration(_) => "TSCallSignatureDeclaration",
            NodeData::TsConstructSignatureDeclaration(_) => "TSConstructSignatureDeclaration",
            NodeData::TsIndexSignature { .. } => "TSIndexSignature",
            NodeData::TsInterfaceDeclaration { .. } => "TSInterfaceDeclaration",
            NodeData::TsInterfaceBody { .. } => "TSInterfaceBody",
            NodeData::TsExpressionWithTypeArguments { .. } => "TSExpressionWithTypeArguments",
            NodeData::TsTypeAliasDeclaration { .. } => "TSTypeAliasDeclaration",
            NodeData::TsEnumDeclaration { .. } => "TSEnumDeclaration",
            NodeData::TsEnumMember { .. } => "TSEnumMember",
            NodeData::TsAsExpression { .. } => "TSAsExpression",
            NodeData::TsTypeAssertion { .. } => "TSTypeAssertion",
            NodeData::TsNonNullExpression { .. } => "TSNonNullExpression",
            NodeData::TsParameterProperty { .. } => "TSParameterProperty",
            NodeData::NullableTypeAnnotation { .. } => "NullableTypeAnnotation",
            NodeData::TypeAlias { .. } => "TypeAlias",
            NodeData::JsxElement { .. } => "JSXElement",
            NodeData::JsxOpeningElement { .. } => "JSXOpeningElement",
            NodeData::JsxClosingElement { .. } => "JSXClosingElement",
            NodeData::JsxFragment { .. } => "JSXFragment",
            NodeData::JsxAttribute { .. } => "JSXAttribute",
            NodeData::JsxSpreadAttribute { .. } => "JSXSpreadAttribute",
            NodeData::JsxIdentifier { .. } => "JSXIdentifier",
            NodeData::JsxNamespacedName { .. } => "JSXNamespacedName",
            NodeData::JsxMemberExpression { .. } => "JSXMemberExpression",
            NodeData::JsxExpressionContainer { .. } => "JSXExpressionContainer",
            NodeData::JsxText { .. } => "JSXText",
        }
    }

    /// Child nodes in source order.
    #[must_use]
    pub fn children(&self) -> SmallVec<[NodeIndex; 4]> {
        let mut out = Children::new();
        match self {
            NodeData::Program { body, .. }
            | NodeData::BlockStatement { body }
            | NodeData::ClassBody { body }
            | NodeData::StaticBlock { body }
            | NodeData::TsInterfaceBody { body } => out.extend(body.iter()),
            NodeData::ExpressionStatement { expression, .. }
            | NodeData::ParenthesizedExpression { expression }
            | NodeData::TsNonNullExpression { expression } => out.push(*expression),
            NodeData::EmptyStatement
            | NodeData::DebuggerStatement
            | NodeData::PrivateName { .. }
            | NodeData::NullLiteral
            | NodeData::BooleanLiteral { .. }
            | NodeData::NumericLiteral { .. }
            | NodeData::BigIntLiteral { .. }
            | NodeData::StringLiteral { .. }
            | NodeData::RegExpLiteral { .. }
            | NodeData::TemplateElement { .. }
            | NodeData::ThisExpression
            | NodeData::Super
            | NodeData::TsKeywordType { .. }
            | NodeData::TsThisType
            | NodeData::JsxIdentifier { .. }
            | NodeData::JsxText { .. } => {}
            NodeData::Identifier {
                type_annotation, ..
            } => push_opt(&mut out, *type_annotation),
            NodeData::WithStatement { object, body } => out.extend([*object, *body]),
            NodeData::ReturnStatement { argument }
            | NodeData::BreakStatement { label: argument }
            | NodeData::ContinueStatement { label: argument } => push_opt(&mut out, *argument),
            NodeData::LabeledStatement { label, body } => out.extend([*label, *body]),
            NodeData::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                out.extend([*test, *consequent]);
                push_opt(&mut out, *alternate);
            }
            NodeData::SwitchStatement {
                discriminant,
                cases,
            } => {
                out.push(*discriminant);
                out.extend(cases.iter());
            }
            NodeData::SwitchCase { test, consequent } => {
                push_opt(&mut out, *test);
                out.extend(consequent.iter());
            }
            NodeData::ThrowStatement { argument }
            | NodeData::SpreadElement { argument }
            | NodeData::AwaitExpression { argument }
            | NodeData::JsxSpreadAttribute { argument } => out.push(*argument),
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                out.push(*block);
                push_opt(&mut out, *handler);
                push_opt(&mut out, *finalizer);
            }
            NodeData::CatchClause { param, body } => {
                push_opt(&mut out, *param);
                out.push(*body);
            }
            NodeData::WhileStatement { test, body } => out.extend([*test, *body]),
            NodeData::DoWhileStatement { body, test } => out.extend([*body, *test]),
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                push_opt(&mut out, *init);
                push_opt(&mut out, *test);
                push_opt(&mut out, *update);
                out.push(*body);
            }
            NodeData::ForInStatement { left, right, body }
            | NodeData::ForOfStatement {
                left, right, body, ..
            } => out.extend([*left, *right, *body]),
            NodeData::VariableDeclaration { declarations, .. } => {
                out.extend(declarations.iter());
            }
            NodeData::VariableDeclarator { id, init } => {
                out.push(*id);
                push_opt(&mut out, *init);
            }
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                push_opt(&mut out, func.id);
                push_opt(&mut out, func.type_parameters);
                out.extend(func.params.iter());
                push_opt(&mut out, func.return_type);
                out.push(func.body);
            }
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
                push_opt(&mut out, class.id);
                push_opt(&mut out, class.type_parameters);
                push_opt(&mut out, class.super_class);
                push_opt(&mut out, class.super_type_arguments);
                out.extend(class.implements.iter());
                out.push(class.body);
            }
            NodeData::ImportDeclaration { specifiers, source } => {
                out.extend(specifiers.iter());
                out.push(*source);
            }
            NodeData::ImportSpecifier { imported, local } => out.extend([*imported, *local]),
            NodeData::ImportDefaultSpecifier { local }
            | NodeData::ImportNamespaceSpecifier { local } => out.push(*local),
            NodeData::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => {
                push_opt(&mut out, *declaration);
                out.extend(specifiers.iter());
                push_opt(&mut out, *source);
            }
            NodeData::ExportSpecifier { local, exported } => out.extend([*local, *exported]),
            NodeData::ExportDefaultDeclaration { declaration } => out.push(*declaration),
            NodeData::ExportAllDeclaration { exported, source } => {
                push_opt(&mut out, *exported);
                out.push(*source);
            }
            NodeData::MethodDefinition { key, value, .. } => out.extend([*key, *value]),
            NodeData::PropertyDefinition {
                key,
                value,
                type_annotation,
                ..
            } => {
                out.push(*key);
                push_opt(&mut out, *type_annotation);
                push_opt(&mut out, *value);
            }
            NodeData::TemplateLiteral {
                quasis,
                expressions,
            } => {
                // Interleave chunks and substitutions in source order.
                for (i, quasi) in quasis.iter().enumerate() {
                    out.push(quasi);
                    if let Some(expr) = expressions.nodes.get(i) {
                        out.push(*expr);
                    }
                }
            }
            NodeData::TaggedTemplateExpression {
                tag,
                type_arguments,
                quasi,
            } => {
                out.push(*tag);
                push_opt(&mut out, *type_arguments);
                out.push(*quasi);
            }
            NodeData::ArrayExpression { elements } => push_holes(&mut out, elements),
            NodeData::ObjectExpression { properties } => out.extend(properties.iter()),
            NodeData::Property {
                key,
                value,
                shorthand,
                ..
            } => {
                if *shorthand {
                    out.push(*value);
                } else {
                    out.extend([*key, *value]);
                }
            }
            NodeData::ArrowFunctionExpression {
                type_parameters,
                params,
                return_type,
                body,
                ..
            } => {
                push_opt(&mut out, *type_parameters);
                out.extend(params.iter());
                push_opt(&mut out, *return_type);
                out.push(*body);
            }
            NodeData::UnaryExpression { argument, .. }
            | NodeData::UpdateExpression { argument, .. } => out.push(*argument),
            NodeData::BinaryExpression { left, right, .. }
            | NodeData::LogicalExpression { left, right, .. }
            | NodeData::AssignmentExpression { left, right, .. }
            | NodeData::AssignmentPattern { left, right } => out.extend([*left, *right]),
            NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => out.extend([*test, *consequent, *alternate]),
            NodeData::CallExpression {
                callee,
                type_arguments,
                arguments,
                ..
            }
            | NodeData::NewExpression {
                callee,
                type_arguments,
                arguments,
            } => {
                out.push(*callee);
                push_opt(&mut out, *type_arguments);
                out.extend(arguments.iter());
            }
            NodeData::MemberExpression {
                object, property, ..
            } => out.extend([*object, *property]),
            NodeData::SequenceExpression { expressions } => out.extend(expressions.iter()),
            NodeData::YieldExpression { argument, .. } => push_opt(&mut out, *argument),
            NodeData::MetaProperty { meta, property } => out.extend([*meta, *property]),
            NodeData::ImportExpression { source } => out.push(*source),
            NodeData::ObjectPattern {
                properties,
                type_annotation,
            } => {
                out.extend(properties.iter());
                push_opt(&mut out, *type_annotation);
            }
            NodeData::ArrayPattern {
                elements,
                type_annotation,
            } => {
                push_holes(&mut out, elements);
                push_opt(&mut out, *type_annotation);
            }
            NodeData::RestElement {
                argument,
                type_annotation,
            } => {
                out.push(*argument);
                push_opt(&mut out, *type_annotation);
            }
            NodeData::TsTypeReference {
                type_name,
                type_arguments,
            } => {
                out.push(*type_name);
                push_opt(&mut out, *type_arguments);
            }
            NodeData::TsQualifiedName { left, right } => out.extend([*left, *right]),
            NodeData::TsTypeParameterDeclaration { params }
            | NodeData::TsTypeParameterInstantiation { params } => out.extend(params.iter()),
            NodeData::TsTypeParameter {
                constraint,
                default,
                ..
            } => {
                push_opt(&mut out, *constraint);
                push_opt(&mut out, *default);
            }
            NodeData::TsTypeQuery { expr_name } => out.push(*expr_name),
            NodeData::TsTypeOperator {
                type_annotation, ..
            }
            | NodeData::TsRestType { type_annotation }
            | NodeData::TsParenthesizedType { type_annotation }
            | NodeData::NullableTypeAnnotation { type_annotation } => out.push(*type_annotation),
            NodeData::TsLiteralType { literal } => out.push(*literal),
            NodeData::TsArrayType { element_type } => out.push(*element_type),
            NodeData::TsIndexedAccessType {
                object_type,
                index_type,
            } => out.extend([*object_type, *index_type]),
            NodeData::TsTupleType { element_types } => out.extend(element_types.iter()),
            NodeData::TsFunctionType(sig)
            | NodeData::TsConstructorType(sig)
            | NodeData::TsCallSignatureDeclaration(sig)
            | NodeData::TsConstructSignatureDeclaration(sig) => push_signature(&mut out, sig),
            NodeData::TsUnionType { types } | NodeData::TsIntersectionType { types } => {
                out.extend(types.iter());
            }
            NodeData::TsTypeLiteral { members } => out.extend(members.iter()),
            NodeData::TsPropertySignature {
                key,
                type_annotation,
                ..
            } => {
                out.push(*key);
                push_opt(&mut out, *type_annotation);
            }
            NodeData::TsMethodSignature {
                key,
                type_parameters,
                parameters,
                return_type,
                ..
            } => {
                out.push(*key);
                push_opt(&mut out, *type_parameters);
                out.extend(parameters.iter());
                push_opt(&mut out, *return_type);
            }
            NodeData::TsIndexSignature {
                parameters,
                type_annotation,
                ..
            } => {
                out.extend(parameters.iter());
                push_opt(&mut out, *type_annotation);
            }
            NodeData::TsInterfaceDeclaration {
                id,
                type_parameters,
                extends,
                body,
            } => {
                out.push(*id);
                push_opt(&mut out, *type_parameters);
                out.extend(extends.iter());
                out.push(*body);
            }
            NodeData::TsExpressionWithTypeArguments {
                expression,
                type_arguments,
            } => {
                out.push(*expression);
                push_opt(&mut out, *type_arguments);
            }
            NodeData::TsTypeAliasDeclaration {
                id,
                type_parameters,
                type_annotation: right,
            }
            | NodeData::TypeAlias {
                id,
                type_parameters,
                right,
            } => {
                out.push(*id);
                push_opt(&mut out, *type_parameters);
                out.push(*right);
            }
            NodeData::TsEnumDeclaration { id, members, .. } => {
                out.push(*id);
                out.extend(members.iter());
            }
            NodeData::TsEnumMember { id, initializer } => {
                out.push(*id);
                push_opt(&mut out, *initializer);
            }
            NodeData::TsAsExpression {
                expression,
                type_annotation,
            } => out.extend([*expression, *type_annotation]),
            NodeData::TsTypeAssertion {
                type_annotation,
                expression,
            } => out.extend([*type_annotation, *expression]),
            NodeData::TsParameterProperty { parameter, .. } => out.push(*parameter),
            NodeData::JsxElement {
                opening,
                children,
                closing,
            } => {
                out.push(*opening);
                out.extend(children.iter());
                push_opt(&mut out, *closing);
            }
            NodeData::JsxOpeningElement {
                name, attributes, ..
            } => {
                out.push(*name);
                out.extend(attributes.iter());
            }
            NodeData::JsxClosingElement { name } => out.push(*name),
            NodeData::JsxFragment { children } => out.extend(children.iter()),
            NodeData::JsxAttribute { name, value } => {
                out.push(*name);
                push_opt(&mut out, *value);
            }
            NodeData::JsxNamespacedName { namespace, name } => out.extend([*namespace, *name]),
            NodeData::JsxMemberExpression { object, property } => {
                out.extend([*object, *property]);
            }
            NodeData::JsxExpressionContainer { expression } => push_opt(&mut out, *expression),
        }
        out
    }

    /// Scalar fields that distinguish nodes of the same kind, rendered for
    /// structural dumps. Positions are never included.
    #[must_use]
    pub fn details(&self) -> String {
        match self {
            NodeData::Program { source_type, .. } => format!("{source_type:?}"),
            NodeData::ExpressionStatement {
                directive: Some(directive),
                ..
            } => format!("directive={directive}"),
            NodeData::VariableDeclaration { kind, .. } => kind.as_str().to_string(),
            NodeData::ForOfStatement { is_await: true, .. } => "await".to_string(),
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                flag_list(&[("async", func.is_async), ("generator", func.is_generator)])
            }
            NodeData::ArrowFunctionExpression {
                expression,
                is_async,
                ..
            } => flag_list(&[("async", *is_async), ("expression", *expression)]),
            NodeData::MethodDefinition {
                kind,
                computed,
                is_static,
                accessibility,
                ..
            } => {
                let flags = flag_list(&[("computed", *computed), ("static", *is_static)]);
                format!(
                    "{}{kind:?}{}",
                    accessibility_prefix(*accessibility),
                    prefixed(&flags)
                )
            }
            NodeData::PropertyDefinition {
                computed,
                is_static,
                optional,
                readonly,
                accessibility,
                ..
            } => {
                let flags = flag_list(&[
                    ("computed", *computed),
                    ("static", *is_static),
                    ("optional", *optional),
                    ("readonly", *readonly),
                ]);
                format!("{}{flags}", accessibility_prefix(*accessibility))
                    .trim_end()
                    .to_string()
            }
            NodeData::Identifier { name, optional, .. } => {
                if *optional {
                    format!("{name}?")
                } else {
                    name.clone()
                }
            }
            NodeData::PrivateName { name } => format!("#{name}"),
            NodeData::BooleanLiteral { value } => value.to_string(),
            NodeData::NumericLiteral { value, .. } => value.to_string(),
            NodeData::BigIntLiteral { raw } => raw.clone(),
            NodeData::StringLiteral { value, .. } => format!("{value:?}"),
            NodeData::RegExpLiteral { pattern, flags } => format!("/{pattern}/{flags}"),
            NodeData::TemplateElement { cooked, tail, .. } => {
                format!("{cooked:?}{}", if *tail { " tail" } else { "" })
            }
            NodeData::Property {
                kind,
                computed,
                shorthand,
                method,
                ..
            } => {
                let flags = flag_list(&[
                    ("computed", *computed),
                    ("shorthand", *shorthand),
                    ("method", *method),
                ]);
                format!("{kind:?}{}", prefixed(&flags))
            }
            NodeData::UnaryExpression { operator, .. } => operator.as_str().to_string(),
            NodeData::UpdateExpression {
                operator, prefix, ..
            } => format!("{}{}", operator.as_str(), if *prefix { " prefix" } else { "" }),
            NodeData::BinaryExpression { operator, .. } => operator.as_str().to_string(),
            NodeData::LogicalExpression { operator, .. } => operator.as_str().to_string(),
            NodeData::AssignmentExpression { operator, .. } => operator.as_str().to_string(),
            NodeData::CallExpression { optional, .. } | NodeData::MemberExpression { optional, .. }
                if *optional =>
            {
                "optional".to_string()
            }
            NodeData::MemberExpression { computed: true, .. } => "computed".to_string(),
            NodeData::YieldExpression { delegate: true, .. } => "delegate".to_string(),
            NodeData::TsTypeParameter { name, .. } => name.clone(),
            NodeData::TsTypeOperator { operator, .. } => operator.as_str().to_string(),
            NodeData::TsPropertySignature {
                computed,
                optional,
                readonly,
                ..
            } => flag_list(&[
                ("computed", *computed),
                ("optional", *optional),
                ("readonly", *readonly),
            ]),
            NodeData::TsMethodSignature {
                computed, optional, ..
            } => flag_list(&[("computed", *computed), ("optional", *optional)]),
            NodeData::TsIndexSignature { readonly: true, .. } => "readonly".to_string(),
            NodeData::TsEnumDeclaration { is_const: true, .. } => "const".to_string(),
            NodeData::TsParameterProperty {
                accessibility,
                readonly,
                ..
            } => {
                let mut parts = Vec::new();
                if let Some(accessibility) = accessibility {
                    parts.push(accessibility.as_str());
                }
                if *readonly {
                    parts.push("readonly");
                }
                parts.join(" ")
            }
            NodeData::JsxOpeningElement {
                self_closing: true, ..
            } => "self-closing".to_string(),
            NodeData::JsxIdentifier { name } => name.clone(),
            NodeData::JsxText { value, .. } => format!("{value:?}"),
            _ => String::new(),
        }
    }
}

fn flag_list(flags: &[(&str, bool)]) -> String {
    flags
        .iter()
        .filter(|(_, set)| *set)
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(" ")
}

fn accessibility_prefix(accessibility: Option<Accessibility>) -> String {
    accessibility.map_or_else(String::new, |a| format!("{} ", a.as_str()))
}

fn prefixed(flags: &str) -> String {
    if flags.is_empty() {
        String::new()
    } else {
        format!(" {flags}")
    }
}
