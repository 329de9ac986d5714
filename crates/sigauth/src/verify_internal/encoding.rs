//! Signature text decoding.
//!
//! Contract target:
//! - turn the header's signature text into raw bytes
//! - no key handling, no verification

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD as BASE64};
use base64::engine::DecodePaddingMode;
use base64::{alphabet, Engine};

use crate::error::{VerifyError, VerifyResult};

/// URL-safe alphabet, padding optional.
const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How a signature is written in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// Standard alphabet, padded.
    Base64,
    /// URL-safe alphabet, padding optional.
    Base64Url,
    /// Hexadecimal, either case.
    Hex,
    /// One byte per character (`latin1` or `binary`).
    Latin1,
}

impl SignatureEncoding {
    /// Parse an encoding name (case-insensitive).
    pub fn parse(name: &str) -> VerifyResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            "hex" => Ok(Self::Hex),
            "latin1" | "binary" => Ok(Self::Latin1),
            _ => Err(VerifyError::UnsupportedEncoding(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
            Self::Hex => "hex",
            Self::Latin1 => "latin1",
        }
    }

    /// Decode signature text to bytes.
    pub fn decode(self, text: &str) -> VerifyResult<Vec<u8>> {
        let decoded = match self {
            Self::Base64 => BASE64.decode(text).map_err(|e| e.to_string()),
            Self::Base64Url => BASE64_URL.decode(text).map_err(|e| e.to_string()),
            Self::Hex => hex::decode(text).map_err(|e| e.to_string()),
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c))
                        .map_err(|_| format!("character {:?} is outside latin1", c))
                })
                .collect(),
        };

        decoded.map_err(|reason| VerifyError::InvalidEncoding {
            encoding: self.name().to_string(),
            reason,
        })
    }
}
