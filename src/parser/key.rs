//! Call-key parsing.
//!
//! A call-key is either `caller==>callee` for an edge, or any string without
//! the separator for a root call (attributed to the synthetic `main()`).

use crate::utils::config::{KEY_SEPARATOR, ROOT_METHOD};

/// Caller/callee pair decoded from a call-key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeKey {
    /// Calling method, `None` for root calls
    pub caller: Option<String>,

    /// Called method
    pub callee: String,
}

impl EdgeKey {
    /// Key of a root call
    pub fn root() -> Self {
        Self {
            caller: None,
            callee: ROOT_METHOD.to_string(),
        }
    }

    /// Whether this key describes a caller→callee edge
    pub fn is_edge(&self) -> bool {
        self.caller.is_some()
    }
}

/// Parse a call-key into an [`EdgeKey`]
///
/// Splits on the first separator and trims both sides. An empty caller side
/// is dropped; an empty callee side is treated as a root call. Never fails.
pub fn parse_key(key: &str) -> EdgeKey {
    let Some((caller, callee)) = key.split_once(KEY_SEPARATOR) else {
        return EdgeKey::root();
    };

    let callee = callee.trim();
    if callee.is_empty() {
        return EdgeKey::root();
    }

    let caller = caller.trim();
    EdgeKey {
        caller: (!caller.is_empty()).then(|| caller.to_string()),
        callee: callee.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge() {
        let key = parse_key("Controller::run==>Db::query");
        assert_eq!(key.caller.as_deref(), Some("Controller::run"));
        assert_eq!(key.callee, "Db::query");
        assert!(key.is_edge());
    }

    #[test]
    fn test_parse_root() {
        assert_eq!(parse_key("main()"), EdgeKey::root());
        assert_eq!(parse_key("anything_else"), EdgeKey::root());
        assert!(!EdgeKey::root().is_edge());
    }

    #[test]
    fn test_split_on_first_separator() {
        let key = parse_key("a==>b==>c");
        assert_eq!(key.caller.as_deref(), Some("a"));
        assert_eq!(key.callee, "b==>c");
    }

    #[test]
    fn test_empty_sides() {
        let key = parse_key("==>foo");
        assert_eq!(key.caller, None);
        assert_eq!(key.callee, "foo");

        assert_eq!(parse_key("foo==>"), EdgeKey::root());
        assert_eq!(parse_key(" ==> "), EdgeKey::root());
    }

    #[test]
    fn test_trims_whitespace() {
        let key = parse_key(" a ==> b ");
        assert_eq!(key.caller.as_deref(), Some("a"));
        assert_eq!(key.callee, "b");
    }
}
