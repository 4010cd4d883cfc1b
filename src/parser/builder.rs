//! Assembles a syntax tree from driver events.
//!
//! The builder is a pushdown interpreter: the state an event *enters* names
//! the command to run, and the state it *left* occasionally selects a
//! special accumulation rule (escapes, list ranges). `(`…`)` nesting is a
//! stack of suspended scopes; `|` accumulates alternatives beside the scope
//! being assembled.

use std::mem;

use crate::ast::Node;
use crate::parser::driver::Event;
use crate::parser::table;
use crate::RegenumError;

/// Characters of the `\d` named class.
pub const CLASS_DIGIT: &str = "0123456789";
/// Characters of the `\l` named class.
pub const CLASS_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
/// Characters of the `\L` named class.
pub const CLASS_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

fn class_expansion(c: char) -> Option<&'static str> {
    match c {
        'd' => Some(CLASS_DIGIT),
        'l' => Some(CLASS_LOWER),
        'L' => Some(CLASS_UPPER),
        _ => None,
    }
}

/// Event-stream interpreter producing a raw (uncompacted) tree.
///
/// Feed every event of one drive to [`Builder::step`], then take the tree
/// with [`Builder::finish`].
#[derive(Debug, Default)]
pub struct Builder {
    /// Children of the scope being assembled; `None` until the first
    /// `regex_start` command arrives.
    scope: Option<Vec<Node>>,
    /// Alternatives accumulated by `|` at the current nesting level.
    pending_or: Option<Vec<Node>>,
    /// Characters buffered toward the next literal.
    accum: String,
    /// Bounds collected inside a `{m,n}` quantifier.
    repeat: Option<Vec<u32>>,
    /// Suspended (scope, alternatives) pairs across `(`.
    stack: Vec<(Vec<Node>, Option<Vec<Node>>)>,
    /// The finished tree, set by the `EOF` command.
    root: Option<Node>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret one event. Commands are keyed on the entered state.
    pub fn step(&mut self, ev: Event<'_>) -> Result<(), RegenumError> {
        match ev.new {
            table::EOF => self.end(),
            table::REGEX_START => self.open_scope(),
            table::REGEX_NEXT_REGEX => self.close_scope(),
            table::REGEX_NEXT_OR => self.split_alternative(),
            table::REPEAT_FROM_START => {
                self.store_last_character()?;
                self.repeat = Some(Vec::new());
                Ok(())
            }
            table::REPEAT_TO_START => self.push_bound(),
            table::REGEX_NEXT_REPEAT => self.wrap_repeat(),
            table::LIST_START => self.store_characters(),
            table::REGEX_NEXT_LIST => {
                let payload = mem::take(&mut self.accum);
                self.push_child(Node::List(payload))
            }
            table::REGEX_ESCAPE | table::LIST_ESCAPE => Ok(()),
            table::ERR => Err(RegenumError::Syntax(match ev.ch {
                Some(c) => format!("unexpected '{}' in {}", c, ev.old),
                None => format!("unexpected end of pattern in {}", ev.old),
            })),
            _ => self.accumulate(ev),
        }
    }

    /// The finished tree. Only meaningful after a successful drive.
    pub fn finish(self) -> Result<Node, RegenumError> {
        self.root
            .ok_or_else(|| RegenumError::Syntax("pattern never reached end of input".to_string()))
    }

    fn end(&mut self) -> Result<(), RegenumError> {
        if !self.stack.is_empty() {
            return Err(RegenumError::UnclosedScope(self.stack.len()));
        }
        self.store_characters()?;
        let node = self.seal_alternation()?;
        self.root = Some(node);
        Ok(())
    }

    fn open_scope(&mut self) -> Result<(), RegenumError> {
        if self.scope.is_some() {
            self.store_characters()?;
        }
        if let Some(suspended) = self.scope.take() {
            self.stack.push((suspended, self.pending_or.take()));
        }
        self.scope = Some(Vec::new());
        self.pending_or = None;
        Ok(())
    }

    fn close_scope(&mut self) -> Result<(), RegenumError> {
        self.store_characters()?;
        let (parent, parent_or) = self.stack.pop().ok_or(RegenumError::ScopeUnderflow)?;
        let finished = self.seal_alternation()?;
        self.scope = Some(parent);
        self.pending_or = parent_or;
        self.push_child(finished)
    }

    fn split_alternative(&mut self) -> Result<(), RegenumError> {
        self.store_characters()?;
        let children = self.take_scope()?;
        self.pending_or
            .get_or_insert_with(Vec::new)
            .push(Node::Scope(children));
        self.scope = Some(Vec::new());
        Ok(())
    }

    /// Folds the pending alternation over the current scope, yielding the
    /// finished node for this nesting level.
    fn seal_alternation(&mut self) -> Result<Node, RegenumError> {
        let children = self.take_scope()?;
        Ok(match self.pending_or.take() {
            Some(mut alts) => {
                alts.push(Node::Scope(children));
                Node::Or(alts)
            }
            None => Node::Scope(children),
        })
    }

    fn push_bound(&mut self) -> Result<(), RegenumError> {
        let bound = self.parse_bound()?;
        self.repeat
            .as_mut()
            .ok_or_else(|| RegenumError::Syntax("',' outside a {m,n} quantifier".to_string()))?
            .push(bound);
        Ok(())
    }

    fn wrap_repeat(&mut self) -> Result<(), RegenumError> {
        let (min, max) = match self.repeat.take() {
            // A bare `?`.
            None => {
                self.store_last_character()?;
                (0, 1)
            }
            Some(mut bounds) => {
                let bound = self.parse_bound()?;
                while bounds.len() < 2 {
                    bounds.push(bound);
                }
                (bounds[0], bounds[1])
            }
        };
        if min > max {
            return Err(RegenumError::Syntax(format!(
                "repetition bounds {{{},{}}} are reversed",
                min, max
            )));
        }
        let scope = self.scope_mut()?;
        let target = scope
            .pop()
            .ok_or_else(|| RegenumError::Syntax("nothing to repeat".to_string()))?;
        scope.push(Node::Repeat {
            min,
            max,
            child: Box::new(target),
        });
        Ok(())
    }

    fn accumulate(&mut self, ev: Event<'_>) -> Result<(), RegenumError> {
        let Some(c) = ev.ch else {
            return Err(RegenumError::Syntax(format!(
                "sentinel routed to accumulating state {}",
                ev.new
            )));
        };
        match ev.old {
            table::LIST_NEXT_RANGE => {
                self.accum.push(c);
                self.expand_range()
            }
            table::LIST_ESCAPE => {
                match class_expansion(c) {
                    Some(set) => self.accum.push_str(set),
                    None => self.accum.push(c),
                }
                Ok(())
            }
            table::REGEX_ESCAPE => match class_expansion(c) {
                Some(set) => {
                    self.store_characters()?;
                    self.push_child(Node::List(set.to_string()))
                }
                None => {
                    self.accum.push(c);
                    Ok(())
                }
            },
            _ => {
                self.accum.push(c);
                Ok(())
            }
        }
    }

    /// Rewrites the trailing `a-b` run of the buffer into the characters
    /// from a through b inclusive, in code-point order (descending when
    /// a > b).
    fn expand_range(&mut self) -> Result<(), RegenumError> {
        let hi = self.accum.pop();
        let dash = self.accum.pop();
        let lo = self.accum.pop();
        let (Some(hi), Some('-'), Some(lo)) = (hi, dash, lo) else {
            return Err(RegenumError::Syntax(
                "malformed range inside a character list".to_string(),
            ));
        };
        if lo <= hi {
            self.accum.extend(lo..=hi);
        } else {
            self.accum.extend((hi..=lo).rev());
        }
        Ok(())
    }

    /// Flush: a nonempty buffer becomes one literal child.
    fn store_characters(&mut self) -> Result<(), RegenumError> {
        if self.accum.is_empty() {
            return Ok(());
        }
        let text = mem::take(&mut self.accum);
        self.push_child(Node::Literal(text))
    }

    /// Flush, keeping the final character as its own literal child so a
    /// quantifier lands on exactly one character.
    fn store_last_character(&mut self) -> Result<(), RegenumError> {
        let mut rest = mem::take(&mut self.accum);
        match rest.pop() {
            None => Ok(()),
            Some(last) if rest.is_empty() => self.push_child(Node::Literal(last.to_string())),
            Some(last) => {
                self.push_child(Node::Literal(rest))?;
                self.push_child(Node::Literal(last.to_string()))
            }
        }
    }

    fn push_child(&mut self, node: Node) -> Result<(), RegenumError> {
        self.scope_mut()?.push(node);
        Ok(())
    }

    fn scope_mut(&mut self) -> Result<&mut Vec<Node>, RegenumError> {
        self.scope
            .as_mut()
            .ok_or_else(|| RegenumError::Syntax("no open scope".to_string()))
    }

    fn take_scope(&mut self) -> Result<Vec<Node>, RegenumError> {
        self.scope
            .take()
            .ok_or_else(|| RegenumError::Syntax("no open scope".to_string()))
    }

    fn parse_bound(&mut self) -> Result<u32, RegenumError> {
        let digits = mem::take(&mut self.accum);
        if digits.is_empty() {
            return Err(RegenumError::Syntax(
                "empty repetition bound".to_string(),
            ));
        }
        digits
            .parse::<u32>()
            .map_err(|_| RegenumError::CardinalityOverflow)
    }
}
