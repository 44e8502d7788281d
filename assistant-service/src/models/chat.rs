use serde::{Deserialize, Serialize};

/// Reply sent when `/chat` is called without a usable message.
pub const NO_MESSAGE_REPLY: &str = "No message provided";

#[derive(Debug, Deserialize)]
pub struct ChatParams {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}
