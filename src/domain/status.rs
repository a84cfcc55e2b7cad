use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric status flag used by every backend record (`1` active, `0` inactive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Status {
    #[default]
    Active,
    Inactive,
}

impl From<Status> for u8 {
    fn from(status: Status) -> Self {
        match status {
            Status::Active => 1,
            Status::Inactive => 0,
        }
    }
}

impl TryFrom<u8> for Status {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Status::Active),
            0 => Ok(Status::Inactive),
            other => Err(format!("unknown status flag {other}")),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => write!(f, "active"),
            Status::Inactive => write!(f, "inactive"),
        }
    }
}

/// Soft delete toggle shared by beneficiaries, workshops, users and products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    Activate,
    Deactivate,
}

impl StatusAction {
    /// Applies the toggle, returning the resulting status.
    pub fn apply(self, status: &mut Status) -> Status {
        *status = match self {
            StatusAction::Activate => Status::Active,
            StatusAction::Deactivate => Status::Inactive,
        };
        *status
    }
}
