//! Network components

use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to synthetic pass-through propositions
pub const ANONYMOUS_NAME: &str = "anon";

/// A node of a propositional network
///
/// Propositions are the terminal, externally meaningful nodes. Everything
/// else is internal logic whose value the engine derives from its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Proposition(Symbol),
    And,
    Or,
    Not,
    Constant(bool),
    Transition,
}

impl Component {
    pub fn proposition(name: impl AsRef<str>) -> Self {
        Self::Proposition(Symbol::new(name))
    }

    /// Whether this is a terminal (proposition) node
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Proposition(_))
    }

    pub fn name(&self) -> Option<&Symbol> {
        match self {
            Self::Proposition(name) => Some(name),
            _ => None,
        }
    }

    /// Short kind label for listings
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Proposition(_) => "proposition",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Constant(_) => "constant",
            Self::Transition => "transition",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proposition(name) => write!(f, "{}", name),
            Self::Constant(value) => write!(f, "constant({})", value),
            other => f.write_str(other.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_propositions_are_terminal() {
        assert!(Component::proposition("p").is_terminal());
        for c in [
            Component::And,
            Component::Or,
            Component::Not,
            Component::Constant(true),
            Component::Transition,
        ] {
            assert!(!c.is_terminal(), "{} should be internal", c);
        }
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_string(&Component::proposition("(true (step 1))")).unwrap();
        assert_eq!(json, r#"{"proposition":"(true (step 1))"}"#);
        assert_eq!(serde_json::to_string(&Component::And).unwrap(), r#""and""#);
        let c: Component = serde_json::from_str(r#"{"constant":false}"#).unwrap();
        assert_eq!(c, Component::Constant(false));
    }
}
