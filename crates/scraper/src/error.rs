//! Error types for component and match scraping.

use schema::ComponentKind;
use thiserror::Error;
use transport::TransportError;

/// Failure modes for a single component attempt.
///
/// `Transport` and `Decode` both originate below the schema-validation
/// layer; they are kept distinct because they are logged differently (a
/// decode failure — non-JSON-object body — is treated like a transport
/// failure for retry purposes but is worth a different log line to spot
/// upstream content-type regressions).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ComponentError {
    #[error("transport error fetching {component}: {source}")]
    Transport {
        component: ComponentKind,
        #[source]
        source: TransportError,
    },

    #[error("schema validation failed for {component}: {message}")]
    Schema {
        component: ComponentKind,
        message: String,
    },
}

impl ComponentError {
    pub fn component(&self) -> ComponentKind {
        match self {
            ComponentError::Transport { component, .. } => *component,
            ComponentError::Schema { component, .. } => *component,
        }
    }
}
