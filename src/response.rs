use serde::Serialize;

use crate::error::ApiError;

/// Success envelope every public operation returns: payload plus a status
/// code and a human-readable message for the API layer to transport.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            status_code: 200,
            data,
            message: message.into(),
            success: true,
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
