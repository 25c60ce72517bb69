//! Shared helpers for parser tests, including a source printer for the
//! base grammar used by the re-print tests.

use crate::{
    MethodKind, NodeArena, NodeData, NodeIndex, NodeList, ParseError, ParserOptions, ParserState,
    Plugins, PropertyKind, VariableKind,
};

pub(crate) fn parse_with(source: &str, options: ParserOptions) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new(source, options)
        .unwrap_or_else(|err| panic!("parser setup failed for {source:?}: {err}"));
    let root = parser
        .parse_program()
        .unwrap_or_else(|err| panic!("parse failed for {source:?}: {err}"));
    (parser, root)
}

pub(crate) fn parse_script(source: &str) -> (ParserState, NodeIndex) {
    parse_with(source, ParserOptions::default())
}

pub(crate) fn parse_ts(source: &str) -> (ParserState, NodeIndex) {
    parse_with(
        source,
        ParserOptions::default().with_plugins(Plugins::TYPESCRIPT),
    )
}

pub(crate) fn parse_error(source: &str, options: ParserOptions) -> ParseError {
    let mut parser = match ParserState::new(source, options) {
        Ok(parser) => parser,
        Err(err) => return err,
    };
    match parser.parse_program() {
        Ok(_) => panic!("expected a parse error for {source:?}"),
        Err(err) => err,
    }
}

pub(crate) fn error_code(source: &str, options: ParserOptions) -> u32 {
    let err = parse_error(source, options);
    err.code()
        .unwrap_or_else(|| panic!("expected a syntax error for {source:?}, got {err}"))
}

/// Top-level statements of a program.
pub(crate) fn statements(parser: &ParserState, root: NodeIndex) -> Vec<NodeIndex> {
    match parser.arena().data(root) {
        Some(NodeData::Program { body, .. }) => body.nodes.clone(),
        other => panic!("expected a Program, got {other:?}"),
    }
}

/// Expression of the `index`th top-level expression statement.
pub(crate) fn statement_expression(parser: &ParserState, root: NodeIndex, index: usize) -> NodeIndex {
    let statement = statements(parser, root)[index];
    match parser.arena().data(statement) {
        Some(NodeData::ExpressionStatement { expression, .. }) => *expression,
        other => panic!("expected an ExpressionStatement, got {other:?}"),
    }
}

pub(crate) fn type_name(parser: &ParserState, node: NodeIndex) -> &'static str {
    parser
        .arena()
        .data(node)
        .map_or("<missing>", NodeData::type_name)
}

/// Kinds of every node reachable from `root`, in pre-order.
pub(crate) fn kinds_under(arena: &NodeArena, root: NodeIndex) -> Vec<&'static str> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let Some(data) = arena.data(node) else {
            continue;
        };
        out.push(data.type_name());
        let children = data.children();
        stack.extend(children.iter().rev().copied());
    }
    out
}

// =============================================================================
// Printer
// =============================================================================

/// Prints a base-grammar tree back to source. Grouping parentheses are
/// nodes of their own, so none are added here.
pub(crate) struct Printer<'a> {
    arena: &'a NodeArena,
    out: String,
}

impl<'a> Printer<'a> {
    pub(crate) fn print(arena: &'a NodeArena, root: NodeIndex) -> String {
        let mut printer = Printer {
            arena,
            out: String::new(),
        };
        printer.node(root);
        printer.out
    }

    fn data(&self, node: NodeIndex) -> &'a NodeData {
        self.arena
            .data(node)
            .unwrap_or_else(|| panic!("node {} is not finished", node.0))
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn list(&mut self, nodes: &NodeList, separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            self.node(node);
        }
    }

    fn opt(&mut self, prefix: &str, node: Option<NodeIndex>) {
        if let Some(node) = node {
            self.push(prefix);
            self.node(node);
        }
    }

    fn holes(&mut self, elements: &[Option<NodeIndex>]) {
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            if let Some(element) = element {
                self.node(*element);
            }
        }
        if matches!(elements.last(), Some(None)) {
            self.push(",");
        }
    }

    fn block_body(&mut self, body: &NodeList) {
        self.push("{\n");
        for statement in body.iter() {
            self.node(statement);
            self.push("\n");
        }
        self.push("}");
    }

    fn function(&mut self, data: &crate::node::FunctionData, keyword: bool) {
        if data.is_async {
            self.push("async ");
        }
        if keyword {
            self.push("function");
            if data.is_generator {
                self.push("*");
            }
            self.push(" ");
        } else if data.is_generator {
            self.push("*");
        }
        if let Some(id) = data.id {
            self.node(id);
        }
        self.push("(");
        self.list(&data.params, ", ");
        self.push(") ");
        self.node(data.body);
    }

    fn class(&mut self, data: &crate::node::ClassData) {
        self.push("class ");
        if let Some(id) = data.id {
            self.node(id);
            self.push(" ");
        }
        if let Some(super_class) = data.super_class {
            self.push("extends ");
            self.node(super_class);
            self.push(" ");
        }
        self.node(data.body);
    }

    fn key(&mut self, key: NodeIndex, computed: bool) {
        if computed {
            self.push("[");
            self.node(key);
            self.push("]");
        } else {
            self.node(key);
        }
    }

    /// `(params) { body }` of a method's function value.
    fn method_tail(&mut self, value: NodeIndex) {
        match self.data(value) {
            NodeData::FunctionExpression(func) => {
                self.push("(");
                self.list(&func.params, ", ");
                self.push(") ");
                self.node(func.body);
            }
            other => panic!("method value is not a function: {other:?}"),
        }
    }

    fn method_prefix(&mut self, value: NodeIndex) {
        if let NodeData::FunctionExpression(func) = self.data(value) {
            if func.is_async {
                self.push("async ");
            }
            if func.is_generator {
                self.push("*");
            }
        }
    }

    fn var_declaration(&mut self, kind: VariableKind, declarations: &NodeList) {
        self.push(kind.as_str());
        self.push(" ");
        self.list(declarations, ", ");
    }

    fn node(&mut self, node: NodeIndex) {
        match self.data(node) {
            NodeData::Program { body, .. } => {
                for statement in body.iter() {
                    self.node(statement);
                    self.push("\n");
                }
            }

            NodeData::ExpressionStatement { expression, .. } => {
                self.node(*expression);
                self.push(";");
            }
            NodeData::BlockStatement { body } => self.block_body(body),
            NodeData::EmptyStatement => self.push(";"),
            NodeData::DebuggerStatement => self.push("debugger;"),
            NodeData::WithStatement { object, body } => {
                self.push("with (");
                self.node(*object);
                self.push(") ");
                self.node(*body);
            }
            NodeData::ReturnStatement { argument } => {
                self.push("return");
                self.opt(" ", *argument);
                self.push(";");
            }
            NodeData::LabeledStatement { label, body } => {
                self.node(*label);
                self.push(": ");
                self.node(*body);
            }
            NodeData::BreakStatement { label } => {
                self.push("break");
                self.opt(" ", *label);
                self.push(";");
            }
            NodeData::ContinueStatement { label } => {
                self.push("continue");
                self.opt(" ", *label);
                self.push(";");
            }
            NodeData::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                self.push("if (");
                self.node(*test);
                self.push(") ");
                self.node(*consequent);
                self.opt(" else ", *alternate);
            }
            NodeData::SwitchStatement {
                discriminant,
                cases,
            } => {
                self.push("switch (");
                self.node(*discriminant);
                self.push(") {\n");
                for case in cases.iter() {
                    self.node(case);
                }
                self.push("}");
            }
            NodeData::SwitchCase { test, consequent } => {
                match test {
                    Some(test) => {
                        self.push("case ");
                        self.node(*test);
                        self.push(":\n");
                    }
                    None => self.push("default:\n"),
                }
                for statement in consequent.iter() {
                    self.node(statement);
                    self.push("\n");
                }
            }
            NodeData::ThrowStatement { argument } => {
                self.push("throw ");
                self.node(*argument);
                self.push(";");
            }
            NodeData::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                self.push("try ");
                self.node(*block);
                self.opt(" ", *handler);
                self.opt(" finally ", *finalizer);
            }
            NodeData::CatchClause { param, body } => {
                self.push("catch ");
                if let Some(param) = param {
                    self.push("(");
                    self.node(*param);
                    self.push(") ");
                }
                self.node(*body);
            }
            NodeData::WhileStatement { test, body } => {
                self.push("while (");
                self.node(*test);
                self.push(") ");
                self.node(*body);
            }
            NodeData::DoWhileStatement { body, test } => {
                self.push("do ");
                self.node(*body);
                self.push(" while (");
                self.node(*test);
                self.push(");");
            }
            NodeData::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                self.push("for (");
                if let Some(init) = init {
                    self.for_head_left(*init);
                }
                self.push(";");
                self.opt(" ", *test);
                self.push(";");
                self.opt(" ", *update);
                self.push(") ");
                self.node(*body);
            }
            NodeData::ForInStatement { left, right, body } => {
                self.push("for (");
                self.for_head_left(*left);
                self.push(" in ");
                self.node(*right);
                self.push(") ");
                self.node(*body);
            }
            NodeData::ForOfStatement {
                left,
                right,
                body,
                is_await,
            } => {
                self.push(if *is_await { "for await (" } else { "for (" });
                self.for_head_left(*left);
                self.push(" of ");
                self.node(*right);
                self.push(") ");
                self.node(*body);
            }
            NodeData::VariableDeclaration { kind, declarations } => {
                self.var_declaration(*kind, declarations);
                self.push(";");
            }
            NodeData::VariableDeclarator { id, init } => {
                self.node(*id);
                self.opt(" = ", *init);
            }
            NodeData::FunctionDeclaration(func) | NodeData::FunctionExpression(func) => {
                self.function(func, true);
            }
            NodeData::ClassDeclaration(class) | NodeData::ClassExpression(class) => {
                self.class(class);
            }

            NodeData::ClassBody { body } => {
                self.push("{\n");
                for member in body.iter() {
                    self.node(member);
                    self.push("\n");
                }
                self.push("}");
            }
            NodeData::MethodDefinition {
                key,
                value,
                kind,
                computed,
                is_static,
                ..
            } => {
                if *is_static {
                    self.push("static ");
                }
                match kind {
                    MethodKind::Get => self.push("get "),
                    MethodKind::Set => self.push("set "),
                    MethodKind::Method | MethodKind::Constructor => self.method_prefix(*value),
                }
                self.key(*key, *computed);
                self.method_tail(*value);
            }
            NodeData::PropertyDefinition {
                key,
                value,
                computed,
                is_static,
                ..
            } => {
                if *is_static {
                    self.push("static ");
                }
                self.key(*key, *computed);
                self.opt(" = ", *value);
                self.push(";");
            }
            NodeData::StaticBlock { body } => {
                self.push("static ");
                self.block_body(body);
            }

            NodeData::Identifier { name, .. } => self.push(name),
            NodeData::PrivateName { name } => {
                self.push("#");
                self.push(name);
            }
            NodeData::NullLiteral => self.push("null"),
            NodeData::BooleanLiteral { value } => self.push(if *value { "true" } else { "false" }),
            NodeData::NumericLiteral { raw, .. }
            | NodeData::BigIntLiteral { raw }
            | NodeData::StringLiteral { raw, .. } => self.push(raw),
            NodeData::RegExpLiteral { pattern, flags } => {
                self.push("/");
                self.push(pattern);
                self.push("/");
                self.push(flags);
            }
            NodeData::TemplateLiteral {
                quasis,
                expressions,
            } => {
                self.push("`");
                for (i, quasi) in quasis.iter().enumerate() {
                    self.node(quasi);
                    if let Some(expression) = expressions.nodes.get(i) {
                        self.push("${");
                        self.node(*expression);
                        self.push("}");
                    }
                }
                self.push("`");
            }
            NodeData::TemplateElement { raw, .. } => self.push(raw),
            NodeData::TaggedTemplateExpression { tag, quasi, .. } => {
                self.node(*tag);
                self.node(*quasi);
            }
            NodeData::ThisExpression => self.push("this"),
            NodeData::Super => self.push("super"),
            NodeData::ArrayExpression { elements } | NodeData::ArrayPattern { elements, .. } => {
                self.push("[");
                self.holes(elements);
                self.push("]");
            }
            NodeData::ObjectExpression { properties }
            | NodeData::ObjectPattern { properties, .. } => {
                if properties.is_empty() {
                    self.push("{}");
                } else {
                    self.push("{ ");
                    self.list(properties, ", ");
                    self.push(" }");
                }
            }
            NodeData::Property {
                key,
                value,
                kind,
                computed,
                shorthand,
                method,
            } => match kind {
                PropertyKind::Get | PropertyKind::Set => {
                    self.push(if *kind == PropertyKind::Get { "get " } else { "set " });
                    self.key(*key, *computed);
                    self.method_tail(*value);
                }
                PropertyKind::Init if *method => {
                    self.method_prefix(*value);
                    self.key(*key, *computed);
                    self.method_tail(*value);
                }
                PropertyKind::Init if *shorthand => self.node(*value),
                PropertyKind::Init => {
                    self.key(*key, *computed);
                    self.push(": ");
                    self.node(*value);
                }
            },
            NodeData::SpreadElement { argument } | NodeData::RestElement { argument, .. } => {
                self.push("...");
                self.node(*argument);
            }
            NodeData::ArrowFunctionExpression {
                params,
                body,
                is_async,
                ..
            } => {
                if *is_async {
                    self.push("async ");
                }
                self.push("(");
                self.list(params, ", ");
                self.push(") => ");
                self.node(*body);
            }
            NodeData::UnaryExpression { operator, argument } => {
                self.push(operator.as_str());
                self.push(" ");
                self.node(*argument);
            }
            NodeData::UpdateExpression {
                operator,
                prefix,
                argument,
            } => {
                if *prefix {
                    self.push(operator.as_str());
                    self.node(*argument);
                } else {
                    self.node(*argument);
                    self.push(operator.as_str());
                }
            }
            NodeData::BinaryExpression {
                operator,
                left,
                right,
            } => self.infix(*left, operator.as_str(), *right),
            NodeData::LogicalExpression {
                operator,
                left,
                right,
            } => self.infix(*left, operator.as_str(), *right),
            NodeData::AssignmentExpression {
                operator,
                left,
                right,
            } => self.infix(*left, operator.as_str(), *right),
            NodeData::AssignmentPattern { left, right } => self.infix(*left, "=", *right),
            NodeData::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.node(*test);
                self.push(" ? ");
                self.node(*consequent);
                self.push(" : ");
                self.node(*alternate);
            }
            NodeData::CallExpression {
                callee,
                arguments,
                optional,
                ..
            } => {
                self.node(*callee);
                if *optional {
                    self.push("?.");
                }
                self.push("(");
                self.list(arguments, ", ");
                self.push(")");
            }
            NodeData::NewExpression {
                callee, arguments, ..
            } => {
                self.push("new ");
                self.node(*callee);
                self.push("(");
                self.list(arguments, ", ");
                self.push(")");
            }
            NodeData::MemberExpression {
                object,
                property,
                computed,
                optional,
            } => {
                self.node(*object);
                match (*computed, *optional) {
                    (true, true) => self.push("?.["),
                    (true, false) => self.push("["),
                    (false, true) => self.push("?."),
                    (false, false) => self.push("."),
                }
                self.node(*property);
                if *computed {
                    self.push("]");
                }
            }
            NodeData::SequenceExpression { expressions } => self.list(expressions, ", "),
            NodeData::ParenthesizedExpression { expression } => {
                self.push("(");
                self.node(*expression);
                self.push(")");
            }
            NodeData::YieldExpression { argument, delegate } => {
                self.push(if *delegate { "yield*" } else { "yield" });
                self.opt(" ", *argument);
            }
            NodeData::AwaitExpression { argument } => {
                self.push("await ");
                self.node(*argument);
            }
            NodeData::MetaProperty { meta, property } => {
                self.node(*meta);
                self.push(".");
                self.node(*property);
            }
            NodeData::ImportExpression { source } => {
                self.push("import(");
                self.node(*source);
                self.push(")");
            }
            other => panic!("printer does not cover {}", other.type_name()),
        }
    }

    fn infix(&mut self, left: NodeIndex, operator: &str, right: NodeIndex) {
        self.node(left);
        self.push(" ");
        self.push(operator);
        self.push(" ");
        self.node(right);
    }

    /// Left side of a `for` head: a declaration without its `;`.
    fn for_head_left(&mut self, node: NodeIndex) {
        match self.data(node) {
            NodeData::VariableDeclaration { kind, declarations } => {
                self.var_declaration(*kind, declarations);
            }
            _ => self.node(node),
        }
    }
}
