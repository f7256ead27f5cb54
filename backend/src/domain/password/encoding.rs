//! Base64 helpers for the `$`-separated hash fields.
//!
//! Stored hashes come from several historical writers, so decoding accepts
//! whitespace, missing padding and the URL-safe alphabet. Encoding always
//! emits padded standard base64.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

const TOLERANT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const STANDARD_TOLERANT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, TOLERANT);
const URL_SAFE_TOLERANT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, TOLERANT);

/// Decode a hash field, returning `None` when it is not valid base64.
pub(super) fn decode_field(raw: &str) -> Option<Vec<u8>> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD_TOLERANT
        .decode(compact.as_bytes())
        .or_else(|_| URL_SAFE_TOLERANT.decode(compact.as_bytes()))
        .ok()
}

/// Encode bytes as padded standard base64.
pub(super) fn encode_field(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
