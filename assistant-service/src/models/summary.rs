use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct SummariseRequest {
    /// Absent and `null` both decode to `None`.
    #[serde(default)]
    pub summaries: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SummariseResponse {
    pub summary: String,
}
