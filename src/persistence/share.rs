//! Remote share endpoint client.
//!
//! `POST {base}/code` stores a JSON-string envelope of the project and
//! answers `{statusCode, data: {id, slug}}`; `GET {base}/code/{slug}`
//! returns the same envelope back in `data.value`. Anything the
//! endpoint cannot match or that fails to parse is `NotFound`; other
//! failures carry a human-readable description for the UI.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::FileRecord;

pub const DEFAULT_API_BASE: &str = "https://api.fstack.io.vn/playground/api/v1";
const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug)]
pub enum ShareError {
    Transport(String),
    Status(u16),
    NotFound,
    Malformed(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::Transport(message) => {
                write!(f, "failed to reach the share service: {message}")
            }
            ShareError::Status(code) => {
                write!(f, "share service returned status {code}")
            }
            ShareError::NotFound => {
                write!(f, "shared code not found; the link may be invalid or expired")
            }
            ShareError::Malformed(message) => {
                write!(f, "unexpected share service response: {message}")
            }
        }
    }
}

impl std::error::Error for ShareError {}

impl From<reqwest::Error> for ShareError {
    fn from(error: reqwest::Error) -> Self {
        ShareError::Transport(error.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareReceipt {
    pub id: String,
    pub slug: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedInfo {
    pub id: String,
    pub slug: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub files_count: usize,
}

#[derive(Serialize)]
struct ShareEnvelope<'a> {
    files: &'a [FileRecord],
    timestamp: String,
    version: &'static str,
}

#[derive(Serialize)]
struct ShareRequest {
    value: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(rename = "statusCode")]
    status_code: u16,
    #[serde(default)]
    data: Option<ApiData>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    #[serde(default)]
    id: serde_json::Value,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default, rename = "createdAt")]
    created_at: Option<String>,
    #[serde(default, rename = "updatedAt")]
    updated_at: Option<String>,
}

#[derive(Deserialize)]
struct SharedProject {
    #[serde(default)]
    files: Vec<FileRecord>,
}

/// The id arrives as a number or a string depending on the backend
/// version; render both as text. An absent id is `None`.
fn render_id(id: &serde_json::Value) -> Option<String> {
    match id {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_share_response(body: ApiResponse, origin: &str) -> Result<ShareReceipt, ShareError> {
    match (body.status_code, body.data) {
        (200, Some(data)) => {
            let id = render_id(&data.id)
                .ok_or_else(|| ShareError::Malformed("response carries no id".to_string()))?;
            let slug = data
                .slug
                .ok_or_else(|| ShareError::Malformed("response carries no slug".to_string()))?;
            let url = format!("{origin}/shared/{slug}");
            Ok(ShareReceipt { id, slug, url })
        }
        (code, _) => Err(body
            .message
            .map(ShareError::Malformed)
            .unwrap_or(ShareError::Status(code))),
    }
}

fn parse_shared_value(value: &str) -> Result<Vec<FileRecord>, ShareError> {
    let project: SharedProject =
        serde_json::from_str(value).map_err(|_| ShareError::NotFound)?;
    Ok(project.files)
}

#[derive(Clone)]
pub struct ShareClient {
    base: String,
    origin: String,
    http: reqwest::Client,
}

impl ShareClient {
    pub fn new(base: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            origin: origin.into(),
            http: reqwest::Client::new(),
        }
    }

    pub async fn share(&self, files: &[FileRecord]) -> Result<ShareReceipt, ShareError> {
        let envelope = ShareEnvelope {
            files,
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: ENVELOPE_VERSION,
        };
        let value = serde_json::to_string_pretty(&envelope)
            .map_err(|error| ShareError::Malformed(error.to_string()))?;

        let response = self
            .http
            .post(format!("{}/code", self.base))
            .json(&ShareRequest { value })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShareError::Status(status.as_u16()));
        }

        let body: ApiResponse = response
            .json()
            .await
            .map_err(|error| ShareError::Malformed(error.to_string()))?;
        parse_share_response(body, &self.origin)
    }

    pub async fn load_shared(&self, slug: &str) -> Result<Vec<FileRecord>, ShareError> {
        let data = self.fetch(slug).await?;
        let value = data.value.ok_or(ShareError::NotFound)?;
        parse_shared_value(&value)
    }

    pub async fn shared_info(&self, slug: &str) -> Result<SharedInfo, ShareError> {
        let data = self.fetch(slug).await?;
        let files_count = data
            .value
            .as_deref()
            .and_then(|value| parse_shared_value(value).ok())
            .map(|files| files.len())
            .unwrap_or(0);
        Ok(SharedInfo {
            id: render_id(&data.id).unwrap_or_default(),
            slug: data.slug.unwrap_or_else(|| slug.to_string()),
            created_at: data.created_at,
            updated_at: data.updated_at,
            files_count,
        })
    }

    async fn fetch(&self, slug: &str) -> Result<ApiData, ShareError> {
        let response = self
            .http
            .get(format!("{}/code/{}", self.base, slug))
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ShareError::NotFound);
        }
        if !status.is_success() {
            return Err(ShareError::Status(status.as_u16()));
        }

        let body: ApiResponse = response.json().await.map_err(|_| ShareError::NotFound)?;
        match (body.status_code, body.data) {
            (200, Some(data)) => Ok(data),
            _ => Err(ShareError::NotFound),
        }
    }
}
