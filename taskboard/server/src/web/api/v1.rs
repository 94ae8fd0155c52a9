use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON body returned when an API request fails.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerErrorResponse {
    /// Human readable description of the failure
    pub message: String,
}

impl ServerErrorResponse {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}
