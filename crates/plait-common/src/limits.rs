//! Centralized limits for the parser.
//!
//! Recursive descent uses the native call stack, so deeply nested input
//! needs an explicit bound to fail with an error instead of overflowing.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth of grammar rules that recurse on expressions,
/// statements or types.
///
/// Each nested parenthesis, array, object, block or type adds a level.
/// Exceeding it produces a syntax error at the offending token.
///
/// ```javascript
/// // 10_000 nested parentheses:
/// ((((((((((((((((((((((((((((( /* ... */ x )))))))))))))))))))))))))))));
/// ```
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 1_000;

/// Maximum nesting of speculative attempts.
///
/// Speculation nests when an attempt itself hits another ambiguity
/// (a generic call inside a type argument inside a generic call ...).
/// The bound keeps pathological input from turning into exponential
/// re-parsing.
pub const MAX_SPECULATION_DEPTH: u32 = 64;

// =============================================================================
// Capacity Hints
// =============================================================================

/// Estimated source bytes per AST node, used to pre-size the node arena.
pub const BYTES_PER_NODE_ESTIMATE: usize = 6;

/// Initial capacity of the lexical context stack.
pub const CONTEXT_STACK_CAPACITY: usize = 16;
