//! In-memory session, registration approval, and complaint tracking for a residential
//! community dashboard.
//!
//! All state lives inside a [`community::CommunityManager`] constructed once by the caller
//! and handed to every consumer by reference. Nothing is persisted.

pub mod community;
pub mod config;
pub mod error;
pub mod telemetry;
