//! KYC documents attached to a user.
//!
//! A [`Document`] is either *pending* (built locally with [`Document::create`], carrying
//! the value to submit) or *hydrated* (decoded from an API response, carrying the id and
//! status the platform assigned). Pending documents are embedded in user payloads through
//! [`Document::to_payload`]:
//!
//! ```
//! use synapse_pay_rest::documents::{Document, DocumentCategory};
//!
//! let ssn = Document::create(DocumentCategory::Virtual, "ssn", "123-45-6789");
//! assert_eq!(ssn.doc_type(), "SSN");
//!
//! let json = serde_json::to_value(ssn.to_payload().unwrap()).unwrap();
//! assert_eq!(
//!     json,
//!     serde_json::json!({ "document_type": "SSN", "document_value": "123-45-6789" })
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{AnyJson, Timestamp};

/// The kind of evidence a document provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentCategory {
    /// Scans of physical ids, e.g. `GOV_ID`, `SELFIE`.
    Physical,
    /// Social profiles and contact details, e.g. `FACEBOOK`, `EMAIL`.
    Social,
    /// Numbers and identifiers, e.g. `SSN`, `PASSPORT`.
    Virtual,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 3] = [
        DocumentCategory::Physical,
        DocumentCategory::Social,
        DocumentCategory::Virtual,
    ];

    /// Key of this category's list inside a base document, e.g. `physical_docs`.
    pub fn collection_key(&self) -> &'static str {
        match self {
            DocumentCategory::Physical => "physical_docs",
            DocumentCategory::Social => "social_docs",
            DocumentCategory::Virtual => "virtual_docs",
        }
    }
}

/// Lifecycle state of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentState {
    /// Built locally and not yet accepted by the platform.
    Pending { value: String },
    /// Decoded from a platform response.
    ///
    /// The platform may leave out the id or status of an entry; a missing id is stored as
    /// empty and never matches another document.
    Hydrated {
        id: String,
        status: Option<String>,
        last_updated: Option<Timestamp>,
    },
}

/// A verification document belonging to a user's base document.
///
/// Equality is identity: two documents are equal only if they have the same category and
/// the same non-empty platform id. Documents without an id are never equal to anything,
/// including themselves, so `Document` does not implement `Eq` or `Hash`.
#[derive(Debug, Clone)]
pub struct Document {
    category: DocumentCategory,
    doc_type: String,
    state: DocumentState,
}

/// Wire form of a pending document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentPayload<'a> {
    pub document_type: &'a str,
    pub document_value: &'a str,
}

#[derive(Debug, Deserialize)]
struct DocumentResponse {
    document_type: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    last_updated: Option<Timestamp>,
}

impl Document {
    /// Build a pending document. It is not sent anywhere until it is embedded in a user
    /// payload and submitted.
    ///
    /// The type is normalized to upper case.
    pub fn create(
        category: DocumentCategory,
        doc_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Document {
            category,
            doc_type: doc_type.into().to_uppercase(),
            state: DocumentState::Pending {
                value: value.into(),
            },
        }
    }

    /// Hydrate a single document entry from an API response.
    pub(crate) fn from_response(
        category: DocumentCategory,
        data: &AnyJson,
    ) -> Result<Self, serde_json::Error> {
        let response = DocumentResponse::deserialize(data)?;
        Ok(Document {
            category,
            doc_type: response.document_type.to_uppercase(),
            state: DocumentState::Hydrated {
                id: response.id,
                status: response.status,
                last_updated: response.last_updated,
            },
        })
    }

    /// Hydrate every document found in a user response.
    ///
    /// Walks `documents[*].physical_docs`, `social_docs` and `virtual_docs`. A response with
    /// no `documents` field yields an empty list.
    pub fn from_user_response(user: &AnyJson) -> Result<Vec<Self>, serde_json::Error> {
        let Some(base_documents) = user.get("documents").and_then(AnyJson::as_array) else {
            return Ok(Vec::new());
        };

        let mut documents = Vec::new();
        for base in base_documents {
            for category in DocumentCategory::ALL {
                let entries = base
                    .get(category.collection_key())
                    .and_then(AnyJson::as_array)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for entry in entries {
                    documents.push(Document::from_response(category, entry)?);
                }
            }
        }
        Ok(documents)
    }

    pub fn category(&self) -> DocumentCategory {
        self.category
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DocumentState::Pending { .. })
    }

    /// The submitted value. Only pending documents have one.
    pub fn value(&self) -> Option<&str> {
        match &self.state {
            DocumentState::Pending { value } => Some(value),
            DocumentState::Hydrated { .. } => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match &self.state {
            DocumentState::Hydrated { id, .. } => Some(id),
            DocumentState::Pending { .. } => None,
        }
    }

    pub fn status(&self) -> Option<&str> {
        match &self.state {
            DocumentState::Hydrated { status, .. } => status.as_deref(),
            DocumentState::Pending { .. } => None,
        }
    }

    pub fn last_updated(&self) -> Option<&Timestamp> {
        match &self.state {
            DocumentState::Hydrated { last_updated, .. } => last_updated.as_ref(),
            DocumentState::Pending { .. } => None,
        }
    }

    /// The `{document_type, document_value}` form used in request bodies.
    ///
    /// Hydrated documents are never re-submitted and return `None`.
    pub fn to_payload(&self) -> Option<DocumentPayload<'_>> {
        self.value().map(|value| DocumentPayload {
            document_type: &self.doc_type,
            document_value: value,
        })
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        if self.category != other.category {
            return false;
        }
        match (self.id(), other.id()) {
            (Some(a), Some(b)) => !a.is_empty() && a == b,
            _ => false,
        }
    }
}
