//! Activity log action kinds.
//!
//! A closed enum rather than free-form strings, so every recordable
//! action is validated at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The kind of user action recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Upload,
    Download,
    Delete,
    Modify,
    Login,
    Logout,
}

impl ActionKind {
    /// Database string value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
            Self::Delete => "delete",
            Self::Modify => "modify",
            Self::Login => "login",
            Self::Logout => "logout",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(Self::Upload),
            "download" => Ok(Self::Download),
            "delete" => Ok(Self::Delete),
            "modify" => Ok(Self::Modify),
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            other => Err(CoreError::Validation(format!(
                "Unknown action kind: '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_strings() {
        for kind in [
            ActionKind::Upload,
            ActionKind::Download,
            ActionKind::Delete,
            ActionKind::Modify,
            ActionKind::Login,
            ActionKind::Logout,
        ] {
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_rejected() {
        assert!("rename".parse::<ActionKind>().is_err());
        assert!("".parse::<ActionKind>().is_err());
    }

    #[test]
    fn display_matches_db_value() {
        assert_eq!(ActionKind::Upload.to_string(), "upload");
        assert_eq!(ActionKind::Logout.to_string(), "logout");
    }
}
