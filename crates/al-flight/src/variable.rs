//! Flight-state variables that can be perturbed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar of the flow state a derivative can be taken with respect to.
///
/// Angles are perturbed in degrees, rates in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateVariable {
    Alpha,
    Beta,
    P,
    Q,
    R,
}

impl StateVariable {
    pub const ALL: [StateVariable; 5] = [
        StateVariable::Alpha,
        StateVariable::Beta,
        StateVariable::P,
        StateVariable::Q,
        StateVariable::R,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StateVariable::Alpha => "alpha",
            StateVariable::Beta => "beta",
            StateVariable::P => "p",
            StateVariable::Q => "q",
            StateVariable::R => "r",
        }
    }

    /// Suffix used in derivative names, e.g. `a` in `CLa`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            StateVariable::Alpha => "a",
            StateVariable::Beta => "b",
            StateVariable::P => "p",
            StateVariable::Q => "q",
            StateVariable::R => "r",
        }
    }

    pub fn is_angle(self) -> bool {
        matches!(self, StateVariable::Alpha | StateVariable::Beta)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name().eq_ignore_ascii_case(s) || v.abbreviation() == s)
    }
}

impl fmt::Display for StateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_names_and_abbreviations() {
        assert_eq!(StateVariable::parse("alpha"), Some(StateVariable::Alpha));
        assert_eq!(StateVariable::parse("Beta"), Some(StateVariable::Beta));
        assert_eq!(StateVariable::parse("q"), Some(StateVariable::Q));
        assert_eq!(StateVariable::parse("gamma"), None);
    }
}
