//! Minimal hex codec shared by the key and salt types.
//!
//! Kept in-tree rather than pulling a hex crate: the surface is two
//! functions and the error paths matter more than the throughput.

use crate::error::CryptoError;

/// Render bytes as lowercase hex.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(hex: &str) -> Result<[u8; N], CryptoError> {
    let hex = hex.trim();
    if hex.len() != N * 2 {
        return Err(CryptoError::Encoding(format!(
            "expected {} hex chars, got {}",
            N * 2,
            hex.len()
        )));
    }
    let mut out = [0u8; N];
    for (i, chunk) in out.iter_mut().enumerate() {
        let pos = i * 2;
        *chunk = u8::from_str_radix(&hex[pos..pos + 2], 16)
            .map_err(|e| CryptoError::Encoding(format!("invalid hex at position {pos}: {e}")))?;
    }
    Ok(out)
}
