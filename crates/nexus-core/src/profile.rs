//! The two client applications.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::route::{RouteDescriptor, RouteTable};
use crate::session::StorageKeys;

static USER_ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::new("/login", "Login", "LoginView"),
    RouteDescriptor::new("/", "CharacterSelection", "CharacterSelectionView").guarded(),
    RouteDescriptor::new("/chat/:id", "Chat", "ChatView").guarded(),
];

static ADMIN_CHILDREN: &[RouteDescriptor] = &[
    RouteDescriptor::new("", "Dashboard", "DashboardView").titled("Dashboard"),
    RouteDescriptor::new("characters", "CharacterManagement", "CharacterManagementView")
        .titled("Character management"),
];

static ADMIN_ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::new("/login", "Login", "LoginView").titled("Sign in"),
    RouteDescriptor::new("/", "AdminLayout", "AdminLayout")
        .guarded()
        .titled("Home")
        .with_children(ADMIN_CHILDREN),
];

static USER_TABLE: RouteTable = RouteTable::new(USER_ROUTES, "/login", "/");
static ADMIN_TABLE: RouteTable = RouteTable::new(ADMIN_ROUTES, "/login", "/");

/// Which client application is running.
///
/// Each profile has its own storage namespace and route table, so the
/// end-user and admin sessions never overwrite each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppProfile {
    /// End-user chat and character client.
    #[default]
    User,
    /// Administrative console.
    Admin,
}

impl AppProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppProfile::User => "user",
            AppProfile::Admin => "admin",
        }
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(self.as_str())
    }

    pub fn routes(&self) -> &'static RouteTable {
        match self {
            AppProfile::User => &USER_TABLE,
            AppProfile::Admin => &ADMIN_TABLE,
        }
    }
}

impl fmt::Display for AppProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(AppProfile::User),
            "admin" => Ok(AppProfile::Admin),
            other => Err(InvalidInputError::Other {
                message: format!("unknown app profile '{}'", other),
            }
            .into()),
        }
    }
}
