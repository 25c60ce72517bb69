//! Extensible recursive-descent parser for JavaScript-family languages.
//!
//! The crate is organized the way the grammar is:
//! - `ParserState` - token cursor, node lifecycle and lexical contexts
//! - `state_*` - grammar rules as `impl ParserState` blocks
//! - `hooks` - rule chains that plugins wrap (`HookRegistry`, `Rule`)
//! - `speculation` - snapshot, restore and `try_parse`
//! - `plugins` - TypeScript, Flow and JSX extensions
//! - `NodeArena` / `NodeData` - the AST
//!
//! Plugins never fork the core grammar. Each one wraps named rules, and the
//! most recently registered wrapper of a rule runs first.

pub mod errors;
pub use errors::{ContractViolation, PResult, ParseError, SyntaxError};

pub mod options;
pub use options::{OptionsError, ParserOptions, Plugins};

pub mod node;
pub use node::{
    Accessibility, AssignmentOperator, BinaryOperator, LogicalOperator, MethodKind, Node,
    NodeData, NodeIndex, NodeList, PropertyKind, TsKeyword, TypeOperator, UnaryOperator,
    UpdateOperator, VariableKind,
};

pub mod node_arena;
pub use node_arena::{NodeArena, NodeBuilder};

pub mod hooks;
pub use hooks::{HookRegistry, ParserPlugin, Rule, RuleFn, rule_fn};

pub mod state;
pub use state::{ContextFlags, ParserParts, ParserState, SpeculationStats};

pub mod speculation;
pub use speculation::ParserSnapshot;

pub mod plugins;
pub use plugins::{FlowPlugin, JsxPlugin, TypeScriptPlugin};

mod state_class_members;
mod state_expressions;
mod state_lval;
mod state_statements;
mod state_types;

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod options_tests;

#[cfg(test)]
#[path = "../tests/lifecycle_tests.rs"]
mod lifecycle_tests;

#[cfg(test)]
#[path = "../tests/hook_tests.rs"]
mod hook_tests;

#[cfg(test)]
#[path = "../tests/speculation_tests.rs"]
mod speculation_tests;

#[cfg(test)]
#[path = "../tests/state_statement_tests.rs"]
mod state_statement_tests;

#[cfg(test)]
#[path = "../tests/state_expression_tests.rs"]
mod state_expression_tests;

#[cfg(test)]
#[path = "../tests/typescript_tests.rs"]
mod typescript_tests;

#[cfg(test)]
#[path = "../tests/flow_tests.rs"]
mod flow_tests;

#[cfg(test)]
#[path = "../tests/jsx_tests.rs"]
mod jsx_tests;

#[cfg(test)]
#[path = "../tests/reprint_tests.rs"]
mod reprint_tests;
