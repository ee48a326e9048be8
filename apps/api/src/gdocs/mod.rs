/// Document publisher — Google Docs and Drive over REST.
///
/// ARCHITECTURAL RULE: No other module may call the Docs or Drive APIs
/// directly. The publish sequence is create → batchUpdate → permission →
/// link; each step fails independently and nothing rolls back a partial
/// sequence, so a failed batchUpdate can leave an empty document behind.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::GoogleServiceAccount;

mod auth;

const DOCS_API_URL: &str = "https://docs.googleapis.com/v1/documents";
const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3/files";

#[derive(Debug, Error)]
pub enum DocsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid service account credentials: {0}")]
    Credentials(String),
}

// ────────────────────────────────────────────────────────────────────────────
// batchUpdate wire model
// ────────────────────────────────────────────────────────────────────────────

/// One edit in a `batchUpdate` batch. Serializes to the Docs API's
/// externally-tagged request objects, e.g. `{"insertText": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DocRequest {
    #[serde(rename_all = "camelCase")]
    InsertText { location: Location, text: String },
    #[serde(rename_all = "camelCase")]
    UpdateParagraphStyle {
        range: Range,
        paragraph_style: ParagraphStyle,
        /// Field mask naming which style fields the update touches.
        fields: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub index: u32,
}

/// Half-open range of document offsets: `[start_index, end_index)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    pub start_index: u32,
    pub end_index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    pub named_style_type: NamedStyleType,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum NamedStyleType {
    #[serde(rename = "HEADING_1")]
    Heading1,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Alignment {
    #[serde(rename = "CENTER")]
    Center,
}

#[derive(Debug, Serialize)]
struct BatchUpdateRequest<'a> {
    requests: &'a [DocRequest],
}

#[derive(Debug, Serialize)]
struct CreateDocumentRequest<'a> {
    title: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentResponse {
    document_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileMetadata {
    web_view_link: String,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Clients
// ────────────────────────────────────────────────────────────────────────────

/// Long-lived publisher handle; holds the service-account identity.
#[derive(Clone)]
pub struct DocsClient {
    http: Client,
    account: GoogleServiceAccount,
}

impl DocsClient {
    pub fn new(account: GoogleServiceAccount) -> Self {
        Self {
            http: Client::new(),
            account,
        }
    }

    /// Fetches one access token and returns a session for the publish sequence.
    pub async fn authorize(&self) -> Result<DocsSession, DocsError> {
        let token = auth::fetch_access_token(&self.http, &self.account).await?;
        Ok(DocsSession {
            http: self.http.clone(),
            token,
        })
    }
}

/// One authorized publish sequence; dropped at the end of the request.
pub struct DocsSession {
    http: Client,
    token: String,
}

impl DocsSession {
    /// Creates an empty document and returns its id.
    pub async fn create_document(&self, title: &str) -> Result<String, DocsError> {
        let response = self
            .http
            .post(DOCS_API_URL)
            .bearer_auth(&self.token)
            .json(&CreateDocumentRequest { title })
            .send()
            .await?;

        let created: CreateDocumentResponse = check(response).await?.json().await?;
        debug!("Created document {}", created.document_id);
        Ok(created.document_id)
    }

    /// Applies the edits in order as a single `batchUpdate` batch.
    pub async fn apply_edits(
        &self,
        document_id: &str,
        requests: &[DocRequest],
    ) -> Result<(), DocsError> {
        let response = self
            .http
            .post(format!("{DOCS_API_URL}/{document_id}:batchUpdate"))
            .bearer_auth(&self.token)
            .json(&BatchUpdateRequest { requests })
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Grants anyone-with-the-link read access.
    pub async fn set_public(&self, document_id: &str) -> Result<(), DocsError> {
        let response = self
            .http
            .post(format!("{DRIVE_API_URL}/{document_id}/permissions"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "role": "reader", "type": "anyone" }))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Returns the shareable browser link for the document.
    pub async fn view_link(&self, document_id: &str) -> Result<String, DocsError> {
        let response = self
            .http
            .get(format!("{DRIVE_API_URL}/{document_id}"))
            .bearer_auth(&self.token)
            .query(&[("fields", "webViewLink")])
            .send()
            .await?;

        let file: FileMetadata = check(response).await?.json().await?;
        Ok(file.web_view_link)
    }
}

/// Maps non-2xx responses to `DocsError::Api`, surfacing Google's own message
/// when the error envelope parses.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, DocsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoogleError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    Err(DocsError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_text_serializes_to_docs_wire_shape() {
        let request = DocRequest::InsertText {
            location: Location { index: 1 },
            text: "Hello\n".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "insertText": {
                    "location": { "index": 1 },
                    "text": "Hello\n"
                }
            })
        );
    }

    #[test]
    fn test_update_paragraph_style_serializes_to_docs_wire_shape() {
        let request = DocRequest::UpdateParagraphStyle {
            range: Range {
                start_index: 1,
                end_index: 34,
            },
            paragraph_style: ParagraphStyle {
                named_style_type: NamedStyleType::Heading1,
                alignment: Alignment::Center,
            },
            fields: "namedStyleType,alignment".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "updateParagraphStyle": {
                    "range": { "startIndex": 1, "endIndex": 34 },
                    "paragraphStyle": {
                        "namedStyleType": "HEADING_1",
                        "alignment": "CENTER"
                    },
                    "fields": "namedStyleType,alignment"
                }
            })
        );
    }

    #[test]
    fn test_batch_update_wraps_requests_array() {
        let requests = vec![DocRequest::InsertText {
            location: Location { index: 1 },
            text: "x".to_string(),
        }];
        let body = serde_json::to_value(BatchUpdateRequest {
            requests: &requests,
        })
        .unwrap();
        assert!(body["requests"].is_array());
        assert_eq!(body["requests"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_google_error_envelope_parses() {
        let body = r#"{"error": {"code": 403, "message": "The caller does not have permission", "status": "PERMISSION_DENIED"}}"#;
        let parsed: GoogleError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "The caller does not have permission");
    }
}
