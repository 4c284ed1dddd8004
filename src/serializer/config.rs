//! Model configuration
//!
//! Controls which field types a model accepts and how identifier values
//! are encoded when a record is serialized.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// String form used when serializing identifier (uuid) values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierEncoding {
    /// `67e55044-10b1-426f-9247-bb680e5fe0c8`
    #[default]
    Hyphenated,
    /// `67e5504410b1426f9247bb680e5fe0c8`
    Simple,
    /// `urn:uuid:67e55044-10b1-426f-9247-bb680e5fe0c8`
    Urn,
}

impl IdentifierEncoding {
    pub fn encode(&self, id: &Uuid) -> String {
        match self {
            IdentifierEncoding::Hyphenated => id.hyphenated().to_string(),
            IdentifierEncoding::Simple => id.simple().to_string(),
            IdentifierEncoding::Urn => id.urn().to_string(),
        }
    }
}

/// Configuration carried by every validation model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Accept field types outside the built-in set
    #[serde(default)]
    pub arbitrary_types_allowed: bool,

    /// Encoding applied to identifier values on serialization
    #[serde(default)]
    pub identifier_encoding: IdentifierEncoding,
}

impl ModelConfig {
    /// Configuration used for models derived from tables: arbitrary types
    /// are permitted and identifiers serialize to their string form.
    pub const fn api() -> Self {
        Self {
            arbitrary_types_allowed: true,
            identifier_encoding: IdentifierEncoding::Hyphenated,
        }
    }
}
