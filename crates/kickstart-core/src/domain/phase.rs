//! Lifecycle phases broadcast to attachments.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

/// A named lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Wire host-framework registrations.
    Hooks,
    /// Steady-state behaviour, e.g. registering a command.
    Run,
    /// The plugin is being deactivated.
    Deactivate,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Hooks, Phase::Run, Phase::Deactivate];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hooks => "hooks",
            Self::Run => "run",
            Self::Deactivate => "deactivate",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hooks" => Ok(Self::Hooks),
            "run" => Ok(Self::Run),
            "deactivate" | "deactivate_plugin" => Ok(Self::Deactivate),
            other => Err(DomainError::InvalidPhase(other.into())),
        }
    }
}
