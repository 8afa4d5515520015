//! Caller capability gate for write commands.
//!
//! The core never authorizes; the role is supplied by whoever runs the
//! command and checked here before product creation reaches the service.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallerRole {
    Admin,
    Member,
}

impl CallerRole {
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Self::Admin
        } else {
            Self::Member
        }
    }

    pub fn can_create_products(self) -> bool {
        self == Self::Admin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied;

impl Display for AccessDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "only administrators can create products")
    }
}

impl Error for AccessDenied {}

pub fn ensure_can_create_products(role: CallerRole) -> Result<(), AccessDenied> {
    if role.can_create_products() {
        Ok(())
    } else {
        Err(AccessDenied)
    }
}
