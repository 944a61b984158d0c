//! Pattern kinds selectable from the control surface

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named algorithm for distributing particles in 3D space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternKind {
    #[default]
    Sphere,
    Cube,
    Torus,
    Spiral,
    Galaxy,
    Heart,
    Dna,
    Wave,
    RandomCloud,
}

impl PatternKind {
    pub const ALL: [PatternKind; 9] = [
        PatternKind::Sphere,
        PatternKind::Cube,
        PatternKind::Torus,
        PatternKind::Spiral,
        PatternKind::Galaxy,
        PatternKind::Heart,
        PatternKind::Dna,
        PatternKind::Wave,
        PatternKind::RandomCloud,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Sphere => "sphere",
            PatternKind::Cube => "cube",
            PatternKind::Torus => "torus",
            PatternKind::Spiral => "spiral",
            PatternKind::Galaxy => "galaxy",
            PatternKind::Heart => "heart",
            PatternKind::Dna => "dna",
            PatternKind::Wave => "wave",
            PatternKind::RandomCloud => "randomCloud",
        }
    }

    /// Kinds whose layout depends only on (count, radius)
    pub fn is_deterministic(&self) -> bool {
        matches!(self, PatternKind::Spiral | PatternKind::Wave | PatternKind::Dna)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown pattern '{0}'")]
pub struct ParsePatternError(pub String);

impl FromStr for PatternKind {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PatternKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .or_else(|| match wanted.to_ascii_lowercase().as_str() {
                "random" | "cloud" | "random_cloud" => Some(PatternKind::RandomCloud),
                _ => None,
            })
            .ok_or_else(|| ParsePatternError(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in PatternKind::ALL {
            assert_eq!(kind.name().parse::<PatternKind>(), Ok(kind));
        }
    }

    #[test]
    fn parsing_is_case_insensitive_and_accepts_aliases() {
        assert_eq!("DNA".parse::<PatternKind>(), Ok(PatternKind::Dna));
        assert_eq!(" galaxy ".parse::<PatternKind>(), Ok(PatternKind::Galaxy));
        assert_eq!("random".parse::<PatternKind>(), Ok(PatternKind::RandomCloud));
        assert!("pyramid".parse::<PatternKind>().is_err());
    }

    #[test]
    fn serde_uses_camel_case_names() {
        let json = serde_json::to_string(&PatternKind::RandomCloud).unwrap();
        assert_eq!(json, "\"randomCloud\"");
        let kind: PatternKind = serde_json::from_str("\"torus\"").unwrap();
        assert_eq!(kind, PatternKind::Torus);
    }
}
