//! assistant-service: summaries of research-paper titles and formal chat
//! replies, generated by a hosted Gemini model.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
