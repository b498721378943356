use std::fmt;

use serde::{Deserialize, Serialize};

/// Retirement lifestyle the remote calculator prices deposits against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifestyle {
    #[default]
    Simple,
    Fancy,
}

impl Lifestyle {
    /// Wire value sent as `lifestyleType`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Fancy => "fancy",
        }
    }

    /// Parses a wire value, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "fancy" => Some(Self::Fancy),
            _ => None,
        }
    }
}

impl fmt::Display for Lifestyle {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
