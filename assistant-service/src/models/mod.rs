pub mod chat;
pub mod summary;

pub use chat::{ChatParams, ChatResponse};
pub use summary::{SummariseRequest, SummariseResponse};

use serde::{Deserialize, Serialize};

/// `{"error": "..."}` envelope returned on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
