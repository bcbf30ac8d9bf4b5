//! Transport encoding of secret payloads.
//!
//! Vault only reliably carries text in record fields, so secret bytes are
//! stored as standard padded base64.

use base64::{engine::general_purpose::STANDARD, Engine};

use super::error::{Result, SecretsError};

/// Encode raw secret bytes for storage in a backend record.
pub fn encode(value: &[u8]) -> String {
    STANDARD.encode(value)
}

/// Decode a stored payload back into raw secret bytes.
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    STANDARD.decode(encoded).map_err(|e| SecretsError::decode(format!("invalid base64 payload: {}", e)))
}
