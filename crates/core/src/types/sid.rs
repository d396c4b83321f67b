//! Newtype SIDs for type-safe Twilio resource references.
//!
//! Twilio identifies every resource with an opaque string SID. Use the
//! `define_sid!` macro to create wrappers that prevent mixing SIDs of
//! different resource types.

/// Macro to define a type-safe SID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use video_chat_core::define_sid;
/// define_sid!(RoomSid);
/// define_sid!(UserSid);
///
/// let room = RoomSid::new("RM123");
/// let user = UserSid::new("US123");
///
/// // These are different types, so this won't compile:
/// // let _: RoomSid = user;
/// ```
#[macro_export]
macro_rules! define_sid {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new SID from a string value.
            #[must_use]
            pub fn new(sid: impl Into<String>) -> Self {
                Self(sid.into())
            }

            /// Get the SID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Convert into the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(sid: String) -> Self {
                Self(sid)
            }
        }

        impl From<&str> for $name {
            fn from(sid: &str) -> Self {
                Self(sid.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(sid: $name) -> Self {
                sid.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_sid!(ConversationSid);
define_sid!(ChatServiceSid);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sid_accessors() {
        let sid = ConversationSid::new("CH0123456789abcdef");
        assert_eq!(sid.as_str(), "CH0123456789abcdef");
        assert_eq!(sid.to_string(), "CH0123456789abcdef");
        assert_eq!(sid.into_inner(), "CH0123456789abcdef");
    }

    #[test]
    fn test_sid_is_transparent_json() {
        let sid = ChatServiceSid::from("IS42");
        assert_eq!(serde_json::to_value(&sid).ok(), Some(serde_json::json!("IS42")));
    }
}
