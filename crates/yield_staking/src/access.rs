//! Administrative access gate.
//!
//! Role management lives outside the engine; the manager only asks whether a
//! caller may perform an [`AdminAction`].

use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, StakingError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminAction {
    CreatePool,
    CancelPosition,
}

impl fmt::Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminAction::CreatePool => f.write_str("create pools"),
            AdminAction::CancelPosition => f.write_str("cancel positions"),
        }
    }
}

pub trait AccessGate: Send + Sync {
    fn is_authorized(&self, caller: &str, action: AdminAction) -> bool;

    fn require(&self, caller: &str, action: AdminAction) -> Result<()> {
        if self.is_authorized(caller, action) {
            Ok(())
        } else {
            Err(StakingError::Unauthorized {
                caller: caller.to_string(),
                action: action.to_string(),
            })
        }
    }
}

/// Allows everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccess;

impl AccessGate for OpenAccess {
    fn is_authorized(&self, _caller: &str, _action: AdminAction) -> bool {
        true
    }
}

/// Fixed set of admin addresses allowed to perform every action.
#[derive(Debug, Clone, Default)]
pub struct AdminList {
    admins: HashSet<String>,
}

impl AdminList {
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }
}

impl AccessGate for AdminList {
    fn is_authorized(&self, caller: &str, _action: AdminAction) -> bool {
        self.admins.contains(caller)
    }
}
