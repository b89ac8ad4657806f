//! Role identifiers carried on cards and claimed in actions or blocks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Collects the hero bonus; blocks export.
    Hero,
    /// Steals; blocks stealing.
    Robber,
    /// Blocks a stab.
    Genie,
    /// Stabs.
    Monster,
    /// Exchanges cards; blocks stealing.
    Riddler,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Hero,
        Role::Robber,
        Role::Genie,
        Role::Monster,
        Role::Riddler,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Hero => "HERO",
            Role::Robber => "ROBBER",
            Role::Genie => "GENIE",
            Role::Monster => "MONSTER",
            Role::Riddler => "RIDDLER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::Other("PARSE_ROLE".into()),
                    format!("Unknown role: {s}"),
                )
            })
    }
}
