//! Core data types shared across the shell
//!
//! Chat messages, maintenance actions and the flash-message helper.

use chrono::{DateTime, Local};
use std::time::Instant;

/// A temporary UI message shown to the user (e.g. success/error notifications)
#[derive(Clone)]
pub struct FlashMessage {
    pub text: String,
    pub is_error: bool,
    pub created: Instant,
}

impl FlashMessage {
    pub fn new(text: String, is_error: bool) -> Self {
        Self {
            text,
            is_error,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, seconds: u64) -> bool {
        self.created.elapsed().as_secs() >= seconds
    }
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Display name used when formatting the rolling history for the AI call
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Model => "Assistant",
        }
    }
}

/// One chat turn half. Immutable once created; the assistant's message list
/// is append-only, so insertion order is chronological order.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: Role, text: String) -> Self {
        Self {
            role,
            text,
            timestamp: Local::now(),
        }
    }

    /// Clock shown next to a chat bubble
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Risk tier of a maintenance action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerLevel {
    Low,
    Medium,
    /// Reserved tier, not used by any catalog entry
    #[allow(dead_code)]
    High,
}

/// Icon shown on a maintenance action card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionIcon {
    Trash,
    /// Reserved icon, not used by any catalog entry
    #[allow(dead_code)]
    Settings,
    Map,
    Cpu,
}

impl ActionIcon {
    /// Terminal glyph standing in for the original's icon set
    pub fn glyph(&self) -> &'static str {
        match self {
            ActionIcon::Trash => "🗑",
            ActionIcon::Settings => "⚙",
            ActionIcon::Map => "🗺",
            ActionIcon::Cpu => "⌨",
        }
    }
}

/// Static descriptor of one maintenance procedure. Read-only reference data;
/// titles and descriptions are i18n keys resolved at render time.
pub struct MaintenanceAction {
    pub id: &'static str,
    pub title: fn(&crate::i18n::Strings) -> &'static str,
    pub description: fn(&crate::i18n::Strings) -> &'static str,
    pub steps: &'static [&'static str],
    pub adb_command: &'static str,
    pub icon: ActionIcon,
    pub danger: DangerLevel,
}

/// GPS fix state shown on the speedometer widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpsStatus {
    #[default]
    Searching,
    Active,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_message_creation() {
        let msg = FlashMessage::new("test".into(), false);
        assert!(!msg.is_expired(3));
        assert_eq!(msg.text, "test");
        assert!(!msg.is_error);
    }

    #[test]
    fn test_role_display_names() {
        assert_eq!(Role::User.display_name(), "User");
        assert_eq!(Role::Model.display_name(), "Assistant");
    }

    #[test]
    fn test_chat_message_time_format() {
        let msg = ChatMessage::new(Role::User, "hi".into());
        // HH:MM
        assert_eq!(msg.formatted_time().len(), 5);
        assert!(msg.formatted_time().contains(':'));
    }
}
