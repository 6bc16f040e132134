use serde::{Serialize, de::DeserializeOwned};

use super::errors::{ProtocolError, Result};

/// Maximum allowed frame size. A snapshot for any reasonable secret name is
/// far below this.
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024;

/// Encodes a protocol message as a JSON text frame.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    let text = serde_json::to_string(value).map_err(ProtocolError::Encode)?;
    if text.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            actual: text.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    Ok(text)
}

/// Decodes a JSON text frame, rejecting oversized input before parsing.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
    if text.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            actual: text.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    serde_json::from_str(text).map_err(ProtocolError::Decode)
}
