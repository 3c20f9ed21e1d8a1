//! Dashboard roles and their messaging capabilities.
//!
//! The five dashboards share one messaging service; what differs per role
//! is captured here as flags instead of five diverging copies of the
//! dispatch code.

use serde::{Deserialize, Serialize};

/// A dashboard role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardRole {
    /// Platform administration.
    Admin,
    /// Club management.
    Club,
    /// Coaching staff.
    Coach,
    /// Medical staff.
    Medical,
    /// Scouting staff.
    Scout,
}

impl DashboardRole {
    /// Role name as stored in `professional_users.role` and used in URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardRole::Admin => "admin",
            DashboardRole::Club => "club",
            DashboardRole::Coach => "coach",
            DashboardRole::Medical => "medical",
            DashboardRole::Scout => "scout",
        }
    }

    /// Parse a role name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(DashboardRole::Admin),
            "club" => Some(DashboardRole::Club),
            "coach" => Some(DashboardRole::Coach),
            "medical" => Some(DashboardRole::Medical),
            "scout" => Some(DashboardRole::Scout),
            _ => None,
        }
    }

    /// Messaging capabilities for this role.
    pub fn capabilities(&self) -> RoleCapabilities {
        match self {
            // Medical messages players conversation-style: no subject
            // line, and a per-player conversations view instead of a
            // recipient directory.
            DashboardRole::Medical => RoleCapabilities {
                requires_subject: false,
                messages_players: true,
                conversations: true,
                recipient_directory: false,
            },
            _ => RoleCapabilities {
                requires_subject: true,
                messages_players: false,
                conversations: false,
                recipient_directory: true,
            },
        }
    }
}

/// Per-role messaging capability flags.
#[derive(Debug, Clone, Copy)]
pub struct RoleCapabilities {
    /// Whether send_message rejects an empty subject.
    pub requires_subject: bool,
    /// Whether send_message addresses player identities rather than
    /// professionals.
    pub messages_players: bool,
    /// Whether the conversations view is available.
    pub conversations: bool,
    /// Whether the professional recipient directory is available.
    pub recipient_directory: bool,
}
