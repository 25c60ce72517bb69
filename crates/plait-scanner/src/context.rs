//! Lexical contexts: scanner modes pushed and popped by grammar rules.

use serde::Serialize;
use thiserror::Error;

/// A mode on the scanner's context stack.
///
/// Rules push a context before advancing past the token that opens the
/// region, and pop it before advancing past the token that closes it, so the
/// token following each boundary is scanned under the right mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LexicalContext {
    /// `{` of a block, class body or other statement-level brace.
    /// A `/` right after its closing brace starts a regex.
    BraceStatement,
    /// `{` of an object literal, pattern or object type.
    BraceExpression,
    /// Inside `${ ... }` of a template; a `}` resumes the template.
    TemplateSubstitution,
    /// Type annotation; reserved words other than a few type operators
    /// scan as identifiers.
    TypePosition,
    /// Between `<` and `>` of a JSX tag.
    JsxTag,
    /// Between the tags of a JSX element; text runs up to `<` or `{`.
    JsxChildren,
}

/// A pop that does not match the innermost open context.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("popped lexical context {expected:?} but the innermost open context is {found:?}")]
    Mismatch {
        expected: LexicalContext,
        found: LexicalContext,
    },
    #[error("popped lexical context {expected:?} with no open context")]
    Underflow { expected: LexicalContext },
}
