//! The pattern grammar as a state-transition table.
//!
//! The grammar is authored as data, not code: each state owns an ordered
//! list of transitions, and dispatch scans that list in declaration order,
//! taking the first entry whose spec admits the input. Ordering is
//! semantically load-bearing: the wildcard fallback belongs last. Three
//! state names are reserved: `BOF` (where driving starts), `EOF` (the only
//! acceptable final state) and `ERR` (the trap for rejected characters).

use rustc_hash::FxHashMap;

use crate::RegenumError;

/// Start-of-input sentinel state.
pub const BOF: &str = "BOF";
/// Terminal state; a drive must end here.
pub const EOF: &str = "EOF";
/// Trap state for characters the grammar rejects.
pub const ERR: &str = "ERR";

pub(crate) const REGEX_START: &str = "regex_start";
pub(crate) const REGEX_NEXT: &str = "regex_next";
pub(crate) const REGEX_NEXT_REGEX: &str = "regex_next_regex";
pub(crate) const REGEX_NEXT_LIST: &str = "regex_next_list";
pub(crate) const REGEX_NEXT_REPEAT: &str = "regex_next_repeat";
pub(crate) const REGEX_NEXT_OR: &str = "regex_next_or";
pub(crate) const REGEX_ESCAPE: &str = "regex_escape";
pub(crate) const LIST_START: &str = "list_start";
pub(crate) const LIST_NEXT: &str = "list_next";
pub(crate) const LIST_ESCAPE: &str = "list_escape";
pub(crate) const LIST_NEXT_RANGE: &str = "list_next_range";
pub(crate) const LIST_RANGE_NEXT: &str = "list_range_next";
pub(crate) const REPEAT_FROM_START: &str = "regex_repeat_from_start";
pub(crate) const REPEAT_FROM_NEXT: &str = "regex_repeat_from_next";
pub(crate) const REPEAT_TO_START: &str = "regex_repeat_to_start";
pub(crate) const REPEAT_TO_NEXT: &str = "regex_repeat_to_next";

/// What one transition entry admits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSpec {
    /// Admits any input, including the sentinel. The usual fallback branch.
    Any,
    /// Admits a character contained in the set. Order inside the set is
    /// irrelevant; an empty set admits nothing.
    Chars(Box<str>),
    /// Admits only the empty sentinel delivered at the ends of input.
    Sentinel,
}

impl MatchSpec {
    fn admits(&self, ch: Option<char>) -> bool {
        match self {
            MatchSpec::Any => true,
            MatchSpec::Chars(set) => ch.is_some_and(|c| set.contains(c)),
            MatchSpec::Sentinel => ch.is_none(),
        }
    }
}

/// One outgoing edge of a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub spec: MatchSpec,
    pub next: Box<str>,
}

impl Transition {
    /// Edge taken when the input character is in `set`.
    pub fn on(set: &str, next: &str) -> Self {
        Self {
            spec: MatchSpec::Chars(set.into()),
            next: next.into(),
        }
    }

    /// Edge taken on the start/end sentinel.
    pub fn sentinel(next: &str) -> Self {
        Self {
            spec: MatchSpec::Sentinel,
            next: next.into(),
        }
    }

    /// Fallback edge taken on anything.
    pub fn any(next: &str) -> Self {
        Self {
            spec: MatchSpec::Any,
            next: next.into(),
        }
    }
}

/// A full grammar: state name to ordered outgoing edges.
#[derive(Debug, Clone, Default)]
pub struct Table {
    states: FxHashMap<Box<str>, Vec<Transition>>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            states: FxHashMap::default(),
        }
    }

    /// Declare a state with its outgoing edges, replacing any previous
    /// declaration. Edge order is kept verbatim.
    pub fn add_state(&mut self, name: &str, edges: Vec<Transition>) {
        self.states.insert(name.into(), edges);
    }

    /// Resolve one step from `state` on `ch` (`None` is the sentinel).
    /// Scans the state's edges in declaration order; first match wins.
    pub fn apply(&self, state: &str, ch: Option<char>) -> Result<&str, RegenumError> {
        let edges = self
            .states
            .get(state)
            .ok_or_else(|| RegenumError::UnknownState(state.to_string()))?;
        edges
            .iter()
            .find(|t| t.spec.admits(ch))
            .map(|t| t.next.as_ref())
            .ok_or_else(|| RegenumError::NoTransition {
                state: state.to_string(),
                ch,
            })
    }

    /// Iterate declared states and their edges, in arbitrary state order.
    pub fn states(&self) -> impl Iterator<Item = (&str, &[Transition])> {
        self.states.iter().map(|(k, v)| (k.as_ref(), v.as_slice()))
    }

    /// The built-in pattern grammar.
    ///
    /// `regex_start` (scope opening) and `regex_next_or` share one edge
    /// list, as do `regex_next` and the three post-construct states: what
    /// may follow a closed group, list or quantifier is exactly what may
    /// follow an ordinary character.
    pub fn core() -> Self {
        const DIGITS: &str = "0123456789";

        fn branch_start() -> Vec<Transition> {
            vec![
                Transition::on("\\", REGEX_ESCAPE),
                Transition::on("[", LIST_START),
                Transition::on("(", REGEX_START),
                Transition::sentinel(EOF),
                Transition::any(REGEX_NEXT),
            ]
        }

        fn regex_body() -> Vec<Transition> {
            vec![
                Transition::on("?", REGEX_NEXT_REPEAT),
                Transition::on("{", REPEAT_FROM_START),
                Transition::on("(", REGEX_START),
                Transition::on(")", REGEX_NEXT_REGEX),
                Transition::on("\\", REGEX_ESCAPE),
                Transition::on("[", LIST_START),
                Transition::on("|", REGEX_NEXT_OR),
                Transition::on("*+", ERR),
                Transition::sentinel(EOF),
                Transition::any(REGEX_NEXT),
            ]
        }

        fn list_body() -> Vec<Transition> {
            vec![
                Transition::on("\\", LIST_ESCAPE),
                Transition::on("]", REGEX_NEXT_LIST),
                Transition::on("-", LIST_NEXT_RANGE),
                Transition::sentinel(ERR),
                Transition::any(LIST_NEXT),
            ]
        }

        let mut t = Table::new();
        t.add_state(BOF, vec![Transition::sentinel(REGEX_START)]);
        t.add_state(REGEX_START, branch_start());
        t.add_state(REGEX_NEXT_OR, branch_start());
        t.add_state(REGEX_NEXT, regex_body());
        t.add_state(REGEX_NEXT_REGEX, regex_body());
        t.add_state(REGEX_NEXT_LIST, regex_body());
        t.add_state(REGEX_NEXT_REPEAT, regex_body());
        t.add_state(
            REGEX_ESCAPE,
            vec![Transition::sentinel(ERR), Transition::any(REGEX_NEXT)],
        );
        t.add_state(
            LIST_START,
            vec![
                Transition::on("\\", LIST_ESCAPE),
                Transition::on("]", REGEX_NEXT_LIST),
                Transition::sentinel(ERR),
                Transition::any(LIST_NEXT),
            ],
        );
        t.add_state(LIST_NEXT, list_body());
        t.add_state(LIST_RANGE_NEXT, list_body());
        t.add_state(
            LIST_NEXT_RANGE,
            vec![
                Transition::on("\\", LIST_ESCAPE),
                Transition::on("]", REGEX_NEXT_LIST),
                Transition::sentinel(ERR),
                Transition::any(LIST_RANGE_NEXT),
            ],
        );
        t.add_state(
            LIST_ESCAPE,
            vec![Transition::sentinel(ERR), Transition::any(LIST_NEXT)],
        );
        t.add_state(
            REPEAT_FROM_START,
            vec![
                Transition::on(DIGITS, REPEAT_FROM_NEXT),
                Transition::any(ERR),
            ],
        );
        t.add_state(
            REPEAT_FROM_NEXT,
            vec![
                Transition::on(DIGITS, REPEAT_FROM_NEXT),
                Transition::on(",", REPEAT_TO_START),
                Transition::on("}", REGEX_NEXT_REPEAT),
                Transition::any(ERR),
            ],
        );
        t.add_state(
            REPEAT_TO_START,
            vec![
                Transition::on(DIGITS, REPEAT_TO_NEXT),
                Transition::any(ERR),
            ],
        );
        t.add_state(
            REPEAT_TO_NEXT,
            vec![
                Transition::on(DIGITS, REPEAT_TO_NEXT),
                Transition::on("}", REGEX_NEXT_REPEAT),
                Transition::any(ERR),
            ],
        );
        t.add_state(ERR, vec![Transition::any(ERR)]);
        t.add_state(EOF, Vec::new());
        t
    }
}
