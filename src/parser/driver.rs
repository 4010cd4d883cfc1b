//! Feeds pattern text through a transition table, one step per character.
//!
//! The driver owns no grammar knowledge: it resolves table steps and hands
//! them to a sink in input order. Each drive delivers exactly one event per
//! character plus two sentinel bookends, with no lookahead and no
//! backtracking.

use crate::parser::table::{Table, BOF, EOF};
use crate::RegenumError;

/// One resolved table step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'t> {
    /// State the step left.
    pub old: &'t str,
    /// State the step entered.
    pub new: &'t str,
    /// The character consumed; `None` for the sentinel bookends.
    pub ch: Option<char>,
}

/// Run `text` through `table`, delivering every step to `emit`.
///
/// Fails unless the final step lands in `EOF`; the error carries the state
/// the drive actually ended in. Errors from `emit` short-circuit the drive.
pub fn drive<'t, F>(text: &str, table: &'t Table, mut emit: F) -> Result<(), RegenumError>
where
    F: FnMut(Event<'t>) -> Result<(), RegenumError>,
{
    let mut state = table.apply(BOF, None)?;
    emit(Event {
        old: BOF,
        new: state,
        ch: None,
    })?;

    for ch in text.chars() {
        let next = table.apply(state, Some(ch))?;
        emit(Event {
            old: state,
            new: next,
            ch: Some(ch),
        })?;
        state = next;
    }

    let last = table.apply(state, None)?;
    emit(Event {
        old: state,
        new: last,
        ch: None,
    })?;
    if last != EOF {
        return Err(RegenumError::UnterminatedParse(last.to_string()));
    }
    Ok(())
}
