//! Video Chat Core - Shared types library.
//!
//! This crate provides the domain types used by the video chat token service:
//! - `server` - HTTP service issuing access tokens and managing the chat room
//! - `integration-tests` - Live tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no token
//! signing. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for usernames, room names, and Twilio SIDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
