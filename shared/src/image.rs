//! Inline image payloads sent to the vision model

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// MIME type used when the payload carries no data-URI prefix
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

static DATA_URI_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:(image/\w+);base64,").unwrap());

/// Base64 image body plus its media type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 without any data-URI prefix
    pub data: String,
}

impl InlineImage {
    /// Parse a base64 string, stripping a `data:image/<kind>;base64,` prefix
    ///
    /// The prefix's media type is kept; a bare payload is assumed to be JPEG.
    pub fn from_encoded(input: &str) -> Self {
        let input = input.trim();
        match DATA_URI_PREFIX.captures(input) {
            Some(caps) => {
                let prefix_len = caps.get(0).map(|m| m.end()).unwrap_or(0);
                let mime_type = caps
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());
                Self {
                    mime_type,
                    data: input[prefix_len..].to_string(),
                }
            }
            None => Self {
                mime_type: DEFAULT_IMAGE_MIME.to_string(),
                data: input.to_string(),
            },
        }
    }

    /// Render back to a data URI, the form stored on a meal
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
