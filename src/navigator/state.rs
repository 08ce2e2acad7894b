//! Navigator state machine.
//!
//! Commands never fail: anything that cannot be applied is a no-op.

use super::view::{build_screen, Screen};
use crate::aggregator::CallGraphIndex;
use crate::utils::config::ROOT_METHOD;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Position and history of one navigation session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    pub current: String,

    /// Previously visited methods, most recent last
    pub back_stack: Vec<String>,

    pub marks: BTreeSet<String>,

    /// Drill indices of the last rendered screen
    pub root_index: BTreeMap<usize, String>,
}

impl Default for NavigatorState {
    fn default() -> Self {
        Self {
            current: ROOT_METHOD.to_string(),
            back_stack: Vec::new(),
            marks: BTreeSet::new(),
            root_index: BTreeMap::new(),
        }
    }
}

/// A parsed line of user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `q`
    Quit,
    /// `0`
    Back,
    /// A positive integer
    Drill(usize),
    /// `m` followed by a positive integer
    ToggleMark(usize),
    /// Anything else
    Unknown,
}

impl Command {
    /// Parse one input line; surrounding whitespace is ignored
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        match line {
            "q" => Command::Quit,
            "0" => Command::Back,
            _ => {
                if let Some(k) = line.strip_prefix('m') {
                    parse_positive(k).map_or(Command::Unknown, Command::ToggleMark)
                } else {
                    parse_positive(line).map_or(Command::Unknown, Command::Drill)
                }
            }
        }
    }
}

/// Digits only, no sign, greater than zero
fn parse_positive(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok().filter(|k| *k > 0)
}

/// Whether the session continues after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Quit,
}

/// Interactive navigator over a finalized call graph
pub struct Navigator<'a> {
    index: &'a CallGraphIndex,
    state: NavigatorState,
}

impl<'a> Navigator<'a> {
    /// Start at the root method with an empty history
    pub fn new(index: &'a CallGraphIndex) -> Self {
        Self {
            index,
            state: NavigatorState::default(),
        }
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    /// Build the current screen and adopt its drill indices
    pub fn render(&mut self) -> Screen {
        let screen = build_screen(&self.state, self.index);
        self.state.root_index = screen.root_index.clone();
        screen
    }

    /// Parse and apply one line of input
    pub fn handle_line(&mut self, line: &str) -> Transition {
        self.apply(Command::parse(line))
    }

    /// Apply a command against the last rendered screen
    pub fn apply(&mut self, command: Command) -> Transition {
        debug!("Navigator command: {:?} at {}", command, self.state.current);

        match command {
            Command::Quit => return Transition::Quit,
            Command::Back => {
                if let Some(previous) = self.state.back_stack.pop() {
                    self.state.current = previous;
                    // Indices belong to the screen just left
                    self.state.root_index.clear();
                }
            }
            Command::Drill(k) => {
                if let Some(target) = self.state.root_index.get(&k).cloned() {
                    let from = std::mem::replace(&mut self.state.current, target);
                    self.state.back_stack.push(from);
                    self.state.root_index.clear();
                }
            }
            Command::ToggleMark(k) => {
                if let Some(method) = self.state.root_index.get(&k) {
                    if !self.state.marks.remove(method) {
                        self.state.marks.insert(method.clone());
                    }
                }
            }
            Command::Unknown => {}
        }

        Transition::Continue
    }
}
