//! Business logic services.
//!
//! # Services
//!
//! - `rooms` - Find-or-create the chat conversation and join users to it

pub mod rooms;
