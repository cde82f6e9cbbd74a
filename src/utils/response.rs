//! The JSON response envelope shared by every endpoint.

use relawan_cache::CacheSource;
use serde::Serialize;
use utoipa::ToSchema;

/// `{"success": bool, "message": string, "data"?: value}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Like [`ok`](Self::ok), tagging the message when the data came from
    /// the cache.
    pub fn from_source(message: &str, data: T, source: CacheSource) -> Self {
        let message = match source {
            CacheSource::Cache => format!("{message} (cache)"),
            CacheSource::Database => message.to_string(),
        };
        Self::ok(message, data)
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_only_omits_data() {
        let body = serde_json::to_string(&ApiResponse::message("done")).unwrap();
        assert_eq!(body, r#"{"success":true,"message":"done"}"#);
    }

    #[test]
    fn cache_hit_tags_message() {
        let body = ApiResponse::from_source("Profile fetched", 7, CacheSource::Cache);
        assert_eq!(body.message, "Profile fetched (cache)");

        let body = ApiResponse::from_source("Profile fetched", 7, CacheSource::Database);
        assert_eq!(body.message, "Profile fetched");
    }
}
