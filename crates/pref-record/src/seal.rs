//! Placeholder sealing
//!
//! Stands in for a real confidentiality scheme: the submission input is
//! serialized to JSON, base64-encoded, and tagged with a scheme prefix.
//! This is an opaque transform, not a security mechanism; anyone holding
//! the payload can invert it.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Scheme tag prefixed to every sealed payload
pub const SEAL_PREFIX: &str = "FHE-";

/// Sealing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SealError {
    /// Payload does not carry the scheme prefix
    #[error("payload is not a sealed envelope")]
    MissingPrefix,

    /// Envelope is not valid base64
    #[error("envelope encoding invalid: {0}")]
    Encoding(String),

    /// Envelope content is not a submission input
    #[error("envelope content malformed: {0}")]
    Malformed(String),
}

/// User-entered submission fields, sealed verbatim into the record payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionInput {
    /// Display vocabulary label (required)
    pub preference_type: String,
    /// Free-form preference details (required)
    pub details: String,
    /// Optional additional comments
    pub comments: String,
}

impl SubmissionInput {
    /// Create a submission input
    #[inline]
    #[must_use]
    pub fn new(
        preference_type: impl Into<String>,
        details: impl Into<String>,
        comments: impl Into<String>,
    ) -> Self {
        Self {
            preference_type: preference_type.into(),
            details: details.into(),
            comments: comments.into(),
        }
    }
}

/// Seal a submission input into the placeholder envelope
///
/// # Errors
/// `SealError::Malformed` if the input fails to serialize (not expected
/// for plain string fields).
pub fn seal(input: &SubmissionInput) -> Result<String, SealError> {
    let json = serde_json::to_vec(input).map_err(|e| SealError::Malformed(e.to_string()))?;
    Ok(format!("{SEAL_PREFIX}{}", STANDARD.encode(json)))
}

/// Invert the placeholder envelope back into a submission input
///
/// # Errors
/// - `SealError::MissingPrefix` when the scheme tag is absent
/// - `SealError::Encoding` on invalid base64
/// - `SealError::Malformed` when the decoded content is not a submission
///   input
pub fn unseal(payload: &str) -> Result<SubmissionInput, SealError> {
    let encoded = payload
        .strip_prefix(SEAL_PREFIX)
        .ok_or(SealError::MissingPrefix)?;
    let json = STANDARD
        .decode(encoded)
        .map_err(|e| SealError::Encoding(e.to_string()))?;
    serde_json::from_slice(&json).map_err(|e| SealError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_prefixes_scheme_tag() {
        let input = SubmissionInput::new("Dosage", "low dose", "");
        let sealed = seal(&input).unwrap();
        assert!(sealed.starts_with(SEAL_PREFIX));
    }

    #[test]
    fn seal_then_unseal_recovers_input() {
        let input = SubmissionInput::new("Visit Frequency", "monthly", "prefer mornings");
        let sealed = seal(&input).unwrap();
        assert_eq!(unseal(&sealed).unwrap(), input);
    }

    #[test]
    fn unseal_requires_prefix() {
        assert_eq!(unseal("eyJ4IjoxfQ=="), Err(SealError::MissingPrefix));
    }

    #[test]
    fn unseal_rejects_bad_base64() {
        assert!(matches!(
            unseal("FHE-%%%not-base64%%%"),
            Err(SealError::Encoding(_))
        ));
    }

    #[test]
    fn unseal_rejects_foreign_content() {
        let sealed = format!("{SEAL_PREFIX}{}", STANDARD.encode(b"[1,2]"));
        assert!(matches!(unseal(&sealed), Err(SealError::Malformed(_))));
    }
}
