//! Identity types for PitchDesk.
//!
//! Messages are exchanged between two kinds of account: professionals
//! (staff on the five dashboards) and registered players. An id alone is
//! ambiguous across the two tables, so every addressable identity carries
//! its type tag.

mod resolver;

pub use resolver::{IdentityResolver, Recipient};

use serde::{Deserialize, Serialize};

/// Professional roles known to the platform.
pub const PROFESSIONAL_ROLES: &[&str] = &["admin", "club", "coach", "medical", "scout"];

/// A tagged account identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum Identity {
    /// A staff account in `professional_users`.
    Professional(i64),
    /// A player registration in `player_registrations`.
    Player(i64),
}

impl Identity {
    /// Numeric id within the identity's own table.
    pub fn id(&self) -> i64 {
        match self {
            Identity::Professional(id) | Identity::Player(id) => *id,
        }
    }

    /// Type tag as stored in the messages table.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Identity::Professional(_) => "professional",
            Identity::Player(_) => "player",
        }
    }

    /// Reconstruct an identity from its stored tag and id.
    pub fn from_parts(tag: &str, id: i64) -> Option<Self> {
        match tag {
            "professional" => Some(Identity::Professional(id)),
            "player" => Some(Identity::Player(id)),
            _ => None,
        }
    }
}

/// A resolved display identity.
///
/// Role and organization are only present for professional identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIdentity {
    /// Display name.
    pub name: String,
    /// Professional role, if any.
    pub role: Option<String>,
    /// Organization, if any.
    pub organization: Option<String>,
}

impl ResolvedIdentity {
    /// Placeholder identity for counterparts whose record no longer exists.
    pub fn unknown(label: &str) -> Self {
        Self {
            name: label.to_string(),
            role: None,
            organization: None,
        }
    }
}
