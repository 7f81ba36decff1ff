use std::fmt::Display;

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, Serialize};

/// A file embedded in a request as a `data:` URI, e.g. `data:image/png;base64,iVBORw0...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Attachment(pub String);

impl Base64Attachment {
    /// Encode raw file contents under the given MIME type.
    pub fn encode(file_type: &str, contents: &[u8]) -> Self {
        let encoded = BASE64_STANDARD.encode(contents);
        Base64Attachment(format!("data:{file_type};base64,{encoded}"))
    }
}

impl Serialize for Base64Attachment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Base64Attachment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Base64Attachment(s))
    }
}

impl Display for Base64Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wraps_in_data_uri() {
        let attachment = Base64Attachment::encode("text/plain", b"hello");
        assert_eq!(attachment.to_string(), "data:text/plain;base64,aGVsbG8=");
    }
}
