//! Payload codec: application objects to transport-safe text and back.
//!
//! A payload is serialized to JSON and the JSON bytes are hex encoded, so a
//! block body is always plain lowercase ASCII regardless of what it carries.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;

/// Encode a payload into a body token.
pub fn encode<T: Serialize + ?Sized>(data: &T) -> Result<String, CoreError> {
    let json = serde_json::to_vec(data).map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(hex::encode(json))
}

/// Decode a body token back into a payload.
pub fn decode<T: DeserializeOwned>(token: &str) -> Result<T, CoreError> {
    let json = hex::decode(token).map_err(|e| CoreError::Decoding(e.to_string()))?;
    serde_json::from_slice(&json).map_err(|e| CoreError::Decoding(e.to_string()))
}
