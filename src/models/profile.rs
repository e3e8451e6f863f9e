//! Profile records and the unified signed-in user view.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Trainer,
    #[default]
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Trainer => "trainer",
            Role::Client => "client",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trainer" => Ok(Role::Trainer),
            "client" => Ok(Role::Client),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Row in `profiles`, 1:1 with an auth identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Profile {
    /// Initials for the avatar bubble ("Marko Marković" → "MM").
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }

    /// Full name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Insert payload for `profiles`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Signed-in user: auth identity joined with its profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub name: String,
}

impl UserView {
    /// Join an identity with its (possibly missing) profile.
    ///
    /// Without a profile the role is `client` and the name is `fallback_name`.
    pub fn from_parts(
        id: Uuid,
        email: &str,
        profile: Option<&Profile>,
        fallback_name: &str,
    ) -> Self {
        Self {
            id,
            email: email.to_string(),
            role: profile.and_then(|p| p.role).unwrap_or_default(),
            name: profile
                .and_then(|p| p.full_name.clone())
                .unwrap_or_else(|| fallback_name.to_string()),
        }
    }

    pub fn is_trainer(&self) -> bool {
        self.role == Role::Trainer
    }
}
