//! HTTP handlers for the assistant service.

pub mod chat;
pub mod health;
pub mod summarise;
