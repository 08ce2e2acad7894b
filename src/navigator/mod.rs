//! Interactive, stack-based navigation over a finalized call graph.
//!
//! The navigator holds the current method, the methods visited before it and
//! a set of marked methods. Each step renders a [`Screen`] and applies one
//! [`Command`].

pub mod state;
pub mod view;

pub use state::{Command, Navigator, NavigatorState, Transition};
pub use view::{build_screen, Row, Screen};
