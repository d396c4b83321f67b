//! Core types for the video chat token service.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod room;
pub mod sid;
pub mod username;

pub use room::RoomName;
pub use sid::*;
pub use username::{Username, UsernameError};
