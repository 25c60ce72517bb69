//! Speculative parsing.
//!
//! A snapshot captures every piece of mutable parser state a grammar rule
//! can touch: scanner position, current token, context stack, comment
//! count, arena checkpoint, context flags, labels, recursion depth and
//! collected-token count. Restoring it makes the parse indistinguishable
//! from one where the abandoned attempt never ran.

use crate::errors::PResult;
use crate::node_arena::ArenaCheckpoint;
use crate::state::{ContextFlags, LabelKind, ParserState};
use plait_common::Position;
use plait_common::limits::MAX_SPECULATION_DEPTH;
use plait_scanner::ScannerSnapshot;
use rustc_hash::FxHashMap;
use tracing::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct ParserSnapshot {
    scanner: ScannerSnapshot,
    arena: ArenaCheckpoint,
    context_flags: ContextFlags,
    labels: FxHashMap<String, LabelKind>,
    prev_token_end: u32,
    prev_token_end_loc: Position,
    recursion_depth: u32,
    tokens_len: usize,
}

impl ParserSnapshot {
    /// Scanner offset at the time of the snapshot.
    #[must_use]
    pub fn scanner_pos(&self) -> usize {
        self.scanner.pos()
    }

    #[must_use]
    pub fn scanner(&self) -> &ScannerSnapshot {
        &self.scanner
    }
}

impl ParserState {
    #[must_use]
    pub fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            scanner: self.scanner.save_state(),
            arena: self.arena.checkpoint(),
            context_flags: self.context_flags,
            labels: self.labels.clone(),
            prev_token_end: self.prev_token_end,
            prev_token_end_loc: self.prev_token_end_loc,
            recursion_depth: self.recursion_depth,
            tokens_len: self.tokens.as_ref().map_or(0, Vec::len),
        }
    }

    pub fn restore(&mut self, snapshot: ParserSnapshot) {
        self.scanner.restore_state(snapshot.scanner);
        self.arena.rollback(snapshot.arena);
        self.context_flags = snapshot.context_flags;
        self.labels = snapshot.labels;
        self.prev_token_end = snapshot.prev_token_end;
        self.prev_token_end_loc = snapshot.prev_token_end_loc;
        self.recursion_depth = snapshot.recursion_depth;
        if let Some(tokens) = &mut self.tokens {
            tokens.truncate(snapshot.tokens_len);
        }
    }

    /// Run `f` speculatively. A lexical or syntax error restores the state
    /// from before the attempt and yields `Ok(None)`. Contract violations
    /// and limit errors propagate, including an attempt nested deeper than
    /// the speculation limit.
    pub fn try_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<Option<T>> {
        if self.speculation_depth >= MAX_SPECULATION_DEPTH {
            debug!(pos = self.token_pos(), "speculation depth exhausted");
            return Err(self.limit_error("speculation"));
        }
        let snapshot = self.snapshot();
        self.stats.attempts += 1;
        self.speculation_depth += 1;
        let result = f(self);
        self.speculation_depth -= 1;
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                debug!(
                    pos = snapshot.scanner_pos(),
                    code = err.code(),
                    "speculative parse rolled back"
                );
                self.stats.rollbacks += 1;
                self.restore(snapshot);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Evaluate a predicate over upcoming input, then rewind. A recoverable
    /// error reads as `false`.
    pub fn look_ahead(&mut self, f: impl FnOnce(&mut Self) -> PResult<bool>) -> PResult<bool> {
        if self.speculation_depth >= MAX_SPECULATION_DEPTH {
            return Err(self.limit_error("speculation"));
        }
        let snapshot = self.snapshot();
        self.speculation_depth += 1;
        let result = f(self);
        self.speculation_depth -= 1;
        self.restore(snapshot);
        match result {
            Ok(answer) => Ok(answer),
            Err(err) if err.is_recoverable() => Ok(false),
            Err(err) => Err(err),
        }
    }
}
