//! Lenient base64 decoding for PDF payloads.
//!
//! Clients send base64 in several shapes: padded or unpadded, standard or
//! URL-safe alphabet, wrapped at 76 columns, or as a browser `data:` URL.
//! All of these decode to the same bytes here.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid base64 encoding: {0}")]
    Invalid(String),
    #[error("base64 payload decoded to zero bytes")]
    Empty,
}

/// Decode a base64 PDF payload into raw bytes.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, DecodeError> {
    let payload = strip_data_url(input.trim());
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    // '-' and '_' only appear in the URL-safe alphabet.
    let engine = if compact.contains(['-', '_']) {
        &URL_SAFE_LENIENT
    } else {
        &STANDARD_LENIENT
    };

    let bytes = engine
        .decode(compact.as_bytes())
        .map_err(|e| DecodeError::Invalid(e.to_string()))?;

    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(bytes)
}

/// Strip a `data:<mime>;base64,` prefix if present.
fn strip_data_url(input: &str) -> &str {
    if !input.starts_with("data:") {
        return input;
    }
    match input.split_once(',') {
        Some((header, rest)) if header.ends_with(";base64") => rest,
        _ => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // "%PDF-1.4\n" in its various encodings.
    const BYTES: &[u8] = b"%PDF-1.4\n";

    #[test]
    fn decodes_standard_padded() {
        assert_eq!(decode_base64("JVBERi0xLjQK").unwrap(), BYTES);
    }

    #[test]
    fn padding_is_optional() {
        assert_eq!(decode_base64("aGk=").unwrap(), b"hi");
        assert_eq!(decode_base64("aGk").unwrap(), b"hi");
    }

    #[test]
    fn tolerates_wrapped_lines() {
        assert_eq!(decode_base64("JVBE\r\nRi0x\nLjQK\n").unwrap(), BYTES);
    }

    #[test]
    fn accepts_url_safe_alphabet() {
        // 0xfb 0xff encodes to "+/8" in standard and "-_8" in URL-safe.
        assert_eq!(decode_base64("-_8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode_base64("+/8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn strips_data_url_prefix() {
        let url = "data:application/pdf;base64,JVBERi0xLjQK";
        assert_eq!(decode_base64(url).unwrap(), BYTES);
    }

    #[test]
    fn rejects_invalid_characters() {
        let err = decode_base64("not*valid*base64!").unwrap_err();
        assert!(matches!(err, DecodeError::Invalid(_)));
    }

    #[test]
    fn rejects_mixed_alphabets() {
        assert!(decode_base64("ab+-").is_err());
    }

    #[test]
    fn rejects_empty_payload() {
        assert_eq!(decode_base64("  \n ").unwrap_err(), DecodeError::Empty);
        assert_eq!(
            decode_base64("data:application/pdf;base64,").unwrap_err(),
            DecodeError::Empty
        );
    }
}
