//! Database schema and migrations for PitchDesk.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Account tables - professionals and players
    r#"
-- Staff accounts across the five dashboards
CREATE TABLE professional_users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    role          TEXT NOT NULL,        -- 'admin', 'club', 'coach', 'medical', 'scout'
    organization  TEXT,
    status        TEXT NOT NULL DEFAULT 'active',  -- 'active', 'inactive'
    created_at    TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_professional_users_role ON professional_users(role);
CREATE INDEX idx_professional_users_status ON professional_users(status);

-- Login accounts behind player registrations
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL UNIQUE,
    status      TEXT NOT NULL DEFAULT 'active',
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE player_registrations (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id),
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    status      TEXT NOT NULL DEFAULT 'active',
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_player_registrations_user_id ON player_registrations(user_id);
"#,
    // v2: Messages with type-tagged sender/recipient identities
    r#"
CREATE TABLE messages (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    sender_id       INTEGER NOT NULL,
    sender_type     TEXT NOT NULL,      -- 'professional', 'player'
    recipient_id    INTEGER NOT NULL,
    recipient_type  TEXT NOT NULL,
    subject         TEXT,               -- optional; conversation-style messaging omits it
    body            TEXT NOT NULL,
    is_read         INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL
);

CREATE INDEX idx_messages_recipient ON messages(recipient_id, recipient_type);
CREATE INDEX idx_messages_sender ON messages(sender_id, sender_type);
CREATE INDEX idx_messages_created_at ON messages(created_at);
"#,
    // v3: Notification feed, professional-scoped recipients only
    r#"
CREATE TABLE notifications (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    recipient_id  INTEGER NOT NULL,
    title         TEXT NOT NULL,
    body          TEXT NOT NULL,
    is_read       INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL
);

CREATE INDEX idx_notifications_recipient ON notifications(recipient_id, is_read);
"#,
];
