//! Hook chains around hookable grammar rules.
//!
//! Every hookable rule is a zero-sized type implementing [`Rule`], which
//! fixes its argument and output types and names its core implementation.
//! A [`HookRegistry`] holds the head of each rule's chain. Extending a rule
//! replaces the head with `factory(previous_head)`, so the last wrapper
//! registered runs outermost and decides whether, and how often, to
//! delegate inward. The grammar only ever calls rules through
//! [`ParserState::call`], which dispatches to the head.
//!
//! Registries are built before parsing and shared immutably behind an
//! `Arc`; parser state has no way to mutate them.

use crate::errors::PResult;
use crate::node::{Accessibility, NodeIndex, NodeList, VariableKind};
use crate::node_arena::NodeBuilder;
use crate::options::{OptionsError, Plugins};
use crate::plugins::{FlowPlugin, JsxPlugin, TypeScriptPlugin};
use crate::state::ParserState;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A link in a hook chain.
pub type RuleFn<R> = Arc<
    dyn Fn(&mut ParserState, <R as Rule>::Args) -> PResult<<R as Rule>::Output> + Send + Sync,
>;

/// A hookable grammar rule.
pub trait Rule: Sized + 'static {
    type Args;
    type Output;
    const NAME: &'static str;

    /// Core behavior, at the innermost end of every chain.
    fn core(parser: &mut ParserState, args: Self::Args) -> PResult<Self::Output>;

    fn slot(registry: &HookRegistry) -> &RuleFn<Self>;

    fn slot_mut(registry: &mut HookRegistry) -> &mut RuleFn<Self>;
}

/// Wrap a closure as a chain link. Pins the closure's signature to the
/// rule's types so wrappers can be written inline. `R` only appears
/// through its associated types, so callers name it:
/// `rule_fn::<ParseExprAtom, _>(move |p, args| ...)`.
pub fn rule_fn<R, F>(f: F) -> RuleFn<R>
where
    R: Rule,
    F: Fn(&mut ParserState, R::Args) -> PResult<R::Output> + Send + Sync + 'static,
{
    Arc::new(f)
}

// =============================================================================
// Rule argument and output records
// =============================================================================

/// Statement whose leading expression has been parsed.
#[derive(Clone, Debug)]
pub struct ExpressionStatementArgs {
    pub builder: NodeBuilder,
    pub expression: NodeIndex,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParamContext {
    /// Constructor parameters may carry accessibility modifiers.
    pub is_constructor: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FunctionParams {
    pub type_parameters: Option<NodeIndex>,
    pub params: NodeList,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FunctionBodyArgs {
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionBody {
    pub body: NodeIndex,
    pub return_type: Option<NodeIndex>,
}

/// What precedes `=>` once a parameter list has been parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArrowHead {
    pub return_type: Option<NodeIndex>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExprOpArgs {
    pub left: NodeIndex,
    /// Operators binding tighter than this are consumed.
    pub min_precedence: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubscriptArgs {
    pub base: NodeIndex,
    /// Set while parsing a `new` callee, where `(` belongs to `new`.
    pub no_calls: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Subscript {
    Continue(NodeIndex),
    Stop(NodeIndex),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewArguments {
    pub type_arguments: Option<NodeIndex>,
    pub arguments: NodeList,
}

/// Everything between a class name and its body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassHeritage {
    pub type_parameters: Option<NodeIndex>,
    pub super_class: Option<NodeIndex>,
    pub super_type_arguments: Option<NodeIndex>,
    pub implements: NodeList,
}

/// Modifiers seen before a class member's key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassModifiers {
    pub accessibility: Option<Accessibility>,
    pub readonly: bool,
}

/// A class field whose key has been parsed.
#[derive(Clone, Debug)]
pub struct ClassPropertyArgs {
    pub builder: NodeBuilder,
    pub key: NodeIndex,
    pub computed: bool,
    pub is_static: bool,
    pub modifiers: ClassModifiers,
    pub optional: bool,
    pub type_annotation: Option<NodeIndex>,
}

// =============================================================================
// Rules and registry
// =============================================================================

macro_rules! hookable_rules {
    ($(
        $(#[$meta:meta])*
        $rule:ident, $field:ident: ($args:ty) -> $output:ty => $core:path;
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug)]
            pub struct $rule;

            impl Rule for $rule {
                type Args = $args;
                type Output = $output;
                const NAME: &'static str = stringify!($rule);

                fn core(parser: &mut ParserState, args: Self::Args) -> PResult<Self::Output> {
                    $core(parser, args)
                }

                fn slot(registry: &HookRegistry) -> &RuleFn<Self> {
                    &registry.$field
                }

                fn slot_mut(registry: &mut HookRegistry) -> &mut RuleFn<Self> {
                    &mut registry.$field
                }
            }
        )*

        /// Heads of every hook chain.
        #[derive(Clone)]
        pub struct HookRegistry {
            $( $field: RuleFn<$rule>, )*
            plugins: Vec<&'static str>,
            extensions: usize,
        }

        impl HookRegistry {
            /// Registry whose chains are the bare core rules.
            #[must_use]
            pub fn new() -> Self {
                Self {
                    $( $field: Arc::new(<$rule as Rule>::core), )*
                    plugins: Vec::new(),
                    extensions: 0,
                }
            }

            /// Names of all hookable rules.
            #[must_use]
            pub fn rule_names() -> &'static [&'static str] {
                &[$( <$rule as Rule>::NAME, )*]
            }
        }
    };
}

hookable_rules! {
    ParseStatement, statement: (()) -> NodeIndex => ParserState::parse_statement_base;
    /// Finish a statement that began with an expression.
    ParseExpressionStatement, expression_statement: (ExpressionStatementArgs) -> NodeIndex
        => ParserState::parse_expression_statement_base;
    /// Binding target of one declarator.
    ParseVarHead, var_head: (VariableKind) -> NodeIndex => ParserState::parse_var_head_base;
    ParseFunctionParams, function_params: (ParamContext) -> FunctionParams
        => ParserState::parse_function_params_base;
    ParseFunctionParam, function_param: (ParamContext) -> NodeIndex
        => ParserState::parse_function_param_base;
    /// Decorate a parameter binding before its default value.
    ParseAssignableListItemTypes, assignable_list_item_types: (NodeIndex) -> NodeIndex
        => ParserState::parse_assignable_list_item_types_base;
    ParseFunctionBody, function_body: (FunctionBodyArgs) -> FunctionBody
        => ParserState::parse_function_body_base;
    /// `None` when no `=>` follows a candidate parameter list.
    ParseArrow, arrow: (()) -> Option<ArrowHead> => ParserState::parse_arrow_base;
    ParseExprOp, expr_op: (ExprOpArgs) -> NodeIndex => ParserState::parse_expr_op_base;
    ParseMaybeUnary, maybe_unary: (()) -> NodeIndex => ParserState::parse_maybe_unary_base;
    ParseSubscript, subscript: (SubscriptArgs) -> Subscript => ParserState::parse_subscript_base;
    ParseNewArguments, new_arguments: (()) -> NewArguments
        => ParserState::parse_new_arguments_base;
    ParseExprAtom, expr_atom: (()) -> NodeIndex => ParserState::parse_expr_atom_base;
    ParseClassSuper, class_super: (()) -> ClassHeritage => ParserState::parse_class_super_base;
    /// Consume at most one member modifier, returning the accumulated set.
    ParseClassModifiers, class_modifiers: (ClassModifiers) -> ClassModifiers
        => ParserState::parse_class_modifiers_base;
    ParseClassProperty, class_property: (ClassPropertyArgs) -> NodeIndex
        => ParserState::parse_class_property_base;
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("plugins", &self.plugins)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

impl HookRegistry {
    /// Registry for a plugin set, registering the type plugin first and
    /// JSX last, so JSX wrappers run outermost.
    pub fn for_plugins(plugins: Plugins) -> Result<Self, OptionsError> {
        if plugins.contains(Plugins::TYPESCRIPT | Plugins::FLOW) {
            return Err(OptionsError::ConflictingTypePlugins);
        }
        let mut registry = Self::new();
        if plugins.contains(Plugins::TYPESCRIPT) {
            registry.register(&TypeScriptPlugin);
        }
        if plugins.contains(Plugins::FLOW) {
            registry.register(&FlowPlugin);
        }
        if plugins.contains(Plugins::JSX) {
            registry.register(&JsxPlugin);
        }
        Ok(registry)
    }

    /// Wrap rule `R`: the new head is `factory(current_head)`.
    pub fn extend<R: Rule>(&mut self, factory: impl FnOnce(RuleFn<R>) -> RuleFn<R>) -> &mut Self {
        let slot = R::slot_mut(self);
        let inner = Arc::clone(slot);
        *slot = factory(inner);
        self.extensions += 1;
        debug!(rule = R::NAME, "extended hook chain");
        self
    }

    pub fn register(&mut self, plugin: &dyn ParserPlugin) -> &mut Self {
        debug!(plugin = plugin.name(), "registering parser plugin");
        plugin.register(self);
        self.plugins.push(plugin.name());
        self
    }

    #[must_use]
    pub fn with_plugin(mut self, plugin: &dyn ParserPlugin) -> Self {
        self.register(plugin);
        self
    }

    /// Plugins registered so far, in registration order.
    #[must_use]
    pub fn plugins(&self) -> &[&'static str] {
        &self.plugins
    }

    /// Number of `extend` calls made on this registry.
    #[must_use]
    pub fn extension_count(&self) -> usize {
        self.extensions
    }

    /// Current head of rule `R`'s chain.
    #[must_use]
    pub fn head<R: Rule>(&self) -> RuleFn<R> {
        Arc::clone(R::slot(self))
    }
}

/// A named bundle of rule extensions.
pub trait ParserPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn register(&self, registry: &mut HookRegistry);
}
