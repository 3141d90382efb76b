//! JSON response envelope

use crate::ScraperError;
use serde::Serialize;
use std::io::Write;

/// Prefix put in front of every failure message
pub const FAILURE_PREFIX: &str = "Failed to scrape article: ";

/// Envelope printed for every command
///
/// Successful results carry `data`; failures carry `message` and `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
    /// Wraps a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            status: None,
        }
    }

    /// Builds the failure envelope for an error
    pub fn failure(error: &ScraperError) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(format!("{FAILURE_PREFIX}{error}")),
            status: Some(error.status_code()),
        }
    }

    /// Process exit code matching this response
    pub fn exit_code(&self) -> i32 {
        match self.status {
            Some(status) => exit_code(status),
            None if self.success => 0,
            None => 1,
        }
    }
}

/// Maps a status code to a process exit code: 2 for client errors, 1 otherwise
pub fn exit_code(status: u16) -> i32 {
    if (400..500).contains(&status) {
        2
    } else {
        1
    }
}

/// Writes the response as a single JSON line
pub fn write_response<W: Write, T: Serialize>(
    mut writer: W,
    response: &ApiResponse<T>,
) -> crate::Result<()> {
    serde_json::to_writer(&mut writer, response)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::ok(json!({"title": "Hello", "url": "https://example.com/"}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({"success": true, "data": {"title": "Hello", "url": "https://example.com/"}})
        );
        assert_eq!(response.exit_code(), 0);
    }

    #[test]
    fn test_failure_envelope_for_missing_article() {
        let error = ScraperError::NoArticleFound {
            url: "https://example.com/".to_string(),
        };
        let response: ApiResponse<()> = ApiResponse::failure(&error);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["status"], json!(400));
        assert_eq!(
            value["message"],
            json!("Failed to scrape article: No article found at https://example.com/")
        );
        assert!(value.get("data").is_none());
        assert_eq!(response.exit_code(), 2);
    }

    #[test]
    fn test_failure_envelope_for_server_error() {
        let error = ScraperError::HttpStatus {
            url: "https://example.com/".to_string(),
            status: 503,
        };
        let response: ApiResponse<()> = ApiResponse::failure(&error);

        assert_eq!(response.status, Some(500));
        assert_eq!(response.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code(400), 2);
        assert_eq!(exit_code(422), 2);
        assert_eq!(exit_code(500), 1);
    }

    #[test]
    fn test_write_response_emits_one_line() {
        let mut buffer = Vec::new();
        write_response(&mut buffer, &ApiResponse::ok(42)).unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "{\"success\":true,\"data\":42}\n");
    }
}
