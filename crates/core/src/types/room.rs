//! Room name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Display name of a video room or chat conversation.
///
/// Conversations are matched by exact, case-sensitive comparison of this name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RoomName(String);

impl RoomName {
    /// Name used when none is configured.
    pub const DEFAULT: &'static str = "My Room";

    /// Create a room name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the room name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RoomName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_room_name() {
        assert_eq!(RoomName::default().as_str(), "My Room");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_ne!(RoomName::new("my room"), RoomName::default());
    }
}
