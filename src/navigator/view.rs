//! Screen construction for the navigator.
//!
//! A screen is the data a renderer needs for one step of the session: the
//! breadcrumb path and three ranked views of the current method.

use super::state::NavigatorState;
use crate::aggregator::{CallGraphIndex, FinalizedStat, RankedEntry};
use std::collections::BTreeMap;

/// One row of a view
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Index to drill into this method, only for drillable rows
    pub index: Option<usize>,

    pub method: String,
    pub stat: FinalizedStat,

    /// The method the user came from
    pub is_back_edge: bool,

    pub is_marked: bool,
}

/// Everything rendered for one navigator step
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// Back stack oldest first, then the current method
    pub path: Vec<String>,

    /// Self cost of the current method (empty if it was never sampled)
    pub self_rows: Vec<Row>,

    /// Calls made by the current method
    pub children: Vec<Row>,

    /// Calls made into the current method
    pub parents: Vec<Row>,

    /// Drill index → method for this screen only
    pub root_index: BTreeMap<usize, String>,
}

/// Build the screen for `state`
///
/// Pure: the caller decides whether to adopt the returned `root_index`.
/// Indices are numbered from 1 across children then parents, skipping the
/// back edge, the current method, and methods with no outgoing calls.
pub fn build_screen(state: &NavigatorState, index: &CallGraphIndex) -> Screen {
    let current = state.current.as_str();
    let came_from = state.back_stack.last().map(String::as_str);

    let mut path = state.back_stack.clone();
    path.push(state.current.clone());

    let self_rows = index
        .method_stat(current)
        .map(|stat| Row {
            index: None,
            method: current.to_string(),
            stat: stat.clone(),
            is_back_edge: false,
            is_marked: state.marks.contains(current),
        })
        .into_iter()
        .collect();

    let mut root_index = BTreeMap::new();
    let mut to_rows = |entries: &[RankedEntry]| -> Vec<Row> {
        entries
            .iter()
            .map(|entry| {
                let method = entry.method.as_str();
                let is_back_edge = came_from == Some(method);
                let drillable = !is_back_edge && method != current && index.has_children(method);

                let row_index = drillable.then(|| {
                    let next = root_index.len() + 1;
                    root_index.insert(next, entry.method.clone());
                    next
                });

                Row {
                    index: row_index,
                    method: entry.method.clone(),
                    stat: entry.stat.clone(),
                    is_back_edge,
                    is_marked: state.marks.contains(method),
                }
            })
            .collect()
    };

    let children = to_rows(index.children(current));
    let parents = to_rows(index.parents(current));

    Screen {
        path,
        self_rows,
        children,
        parents,
        root_index,
    }
}
