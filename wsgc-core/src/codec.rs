//! Save payload codec with format sniffing and fallback.
//!
//! Stands in for the host's `CompressBytes` / `DecompressBytes` routines.
//! On write it skips compression entirely: saves grow but serialize several
//! seconds faster. On read it inspects the first four bytes:
//!
//! | Header        | Tag          | Action                               |
//! |---------------|--------------|--------------------------------------|
//! | `1F 8B 08 00` | `Compressed` | gunzip into memory, decline on error |
//! | `08 01 12 3A` | `Raw`        | pass through untouched               |
//! | anything else | `Unknown`    | decline                              |
//!
//! Declining hands the payload back to the host's original routine, so a
//! broken override degrades to the host's own load path.

use std::borrow::Cow;
use std::io::Read;

use flate2::read::GzDecoder;
use tracing::{debug, info, warn};

use crate::config::WsgcConfig;
use crate::error::{Result, WsgcError};

/// gzip magic, deflate method, no flags.
pub const COMPRESSED_HEADER: [u8; 4] = [0x1F, 0x8B, 0x08, 0x00];

/// Leading bytes of an uncompressed host save.
pub const RAW_HEADER: [u8; 4] = [0x08, 0x01, 0x12, 0x3A];

// ---------------------------------------------------------------------------
// Format detection
// ---------------------------------------------------------------------------

/// Payload format, derived from the first four bytes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// gzip stream.
    Compressed,
    /// Uncompressed save.
    Raw,
    /// Neither header, or fewer than four bytes.
    Unknown,
}

impl FormatTag {
    /// Classify a payload by exact match of its first four bytes.
    #[must_use]
    pub fn sniff(payload: &[u8]) -> Self {
        match payload.get(..4) {
            Some(head) if head == COMPRESSED_HEADER => Self::Compressed,
            Some(head) if head == RAW_HEADER => Self::Raw,
            _ => Self::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// Interception result
// ---------------------------------------------------------------------------

/// Outcome of an intercepted host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception<'a> {
    /// The override produced the result; the host must not run its routine.
    Handled(Cow<'a, [u8]>),
    /// The host should run its original routine on the untouched input.
    Declined,
}

impl<'a> Interception<'a> {
    /// Whether the override handled the call.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    /// Borrow the produced bytes, if handled.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Handled(bytes) => Some(&**bytes),
            Self::Declined => None,
        }
    }

    /// Take ownership of the produced bytes, if handled.
    #[must_use]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Handled(bytes) => Some(bytes.into_owned()),
            Self::Declined => None,
        }
    }
}

// ---------------------------------------------------------------------------
// SaveCodec
// ---------------------------------------------------------------------------

/// Compression bypass and format-sniffing decompression.
#[derive(Debug, Clone, Copy)]
pub struct SaveCodec {
    enabled: bool,
}

impl SaveCodec {
    /// Build a codec gated by `override_save_codec`.
    #[must_use]
    pub fn new(config: &WsgcConfig) -> Self {
        Self {
            enabled: config.override_save_codec,
        }
    }

    /// Whether the codec intercepts at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Write path. When enabled, returns the payload unmodified so the save
    /// is written uncompressed.
    #[must_use]
    pub fn encode<'a>(&self, payload: &'a [u8]) -> Interception<'a> {
        if !self.enabled {
            return Interception::Declined;
        }
        info!(bytes = payload.len(), "Saving with no compression");
        Interception::Handled(Cow::Borrowed(payload))
    }

    /// Read path. Never mutates `payload`; either replaces it entirely or
    /// declines.
    #[must_use]
    pub fn decode<'a>(&self, payload: &'a [u8]) -> Interception<'a> {
        if !self.enabled {
            return Interception::Declined;
        }

        match FormatTag::sniff(payload) {
            FormatTag::Compressed => {
                info!(bytes = payload.len(), "Loading compressed save");
                match gunzip(payload) {
                    Ok(decoded) => {
                        debug!(decoded_bytes = decoded.len(), "Decompressed save");
                        Interception::Handled(Cow::Owned(decoded))
                    }
                    Err(e) => {
                        warn!(
                            bytes = payload.len(),
                            error = %e,
                            "Unable to read save, falling back to the host load process"
                        );
                        Interception::Declined
                    }
                }
            }
            FormatTag::Raw => {
                info!(bytes = payload.len(), "Loading uncompressed save");
                Interception::Handled(Cow::Borrowed(payload))
            }
            FormatTag::Unknown => {
                debug!(bytes = payload.len(), "Unrecognised save header, deferring to host");
                Interception::Declined
            }
        }
    }
}

/// Decompress a whole gzip member into memory.
fn gunzip(payload: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(payload.len().saturating_mul(4));
    GzDecoder::new(payload)
        .read_to_end(&mut out)
        .map_err(|e| WsgcError::Decode(e.to_string()))?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    fn enabled() -> SaveCodec {
        SaveCodec::new(&WsgcConfig {
            override_save_codec: true,
            ..WsgcConfig::default()
        })
    }

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).expect("in-memory write");
        enc.finish().expect("in-memory finish")
    }

    #[test]
    fn sniff_headers() {
        assert_eq!(FormatTag::sniff(&[0x1F, 0x8B, 0x08, 0x00, 0x01]), FormatTag::Compressed);
        assert_eq!(FormatTag::sniff(&RAW_HEADER), FormatTag::Raw);
        assert_eq!(FormatTag::sniff(&[0x1F, 0x8B, 0x08, 0x08]), FormatTag::Unknown);
        assert_eq!(FormatTag::sniff(&[0x08, 0x01, 0x12]), FormatTag::Unknown);
        assert_eq!(FormatTag::sniff(&[]), FormatTag::Unknown);
    }

    #[test]
    fn disabled_codec_declines_everything() {
        let codec = SaveCodec::new(&WsgcConfig::default());
        assert!(!codec.is_enabled());
        assert_eq!(codec.encode(&[1, 2, 3]), Interception::Declined);
        assert_eq!(codec.decode(&RAW_HEADER), Interception::Declined);
        assert_eq!(codec.decode(&gzip(b"save")), Interception::Declined);
    }

    #[test]
    fn encode_passes_payload_through_borrowed() {
        let payload = [0x08, 0x01, 0x12, 0x3A, 0x10];
        let result = enabled().encode(&payload);
        assert!(matches!(result, Interception::Handled(Cow::Borrowed(b)) if b == payload));
    }

    #[test]
    fn encode_handles_empty_payload() {
        assert_eq!(enabled().encode(&[]).as_bytes(), Some(&[][..]));
    }

    #[test]
    fn decode_gzip_payload() {
        let mut original = RAW_HEADER.to_vec();
        original.extend_from_slice(&[0x42; 1024]);
        let compressed = gzip(&original);
        let result = enabled().decode(&compressed);
        assert_eq!(result.into_bytes(), Some(original));
    }

    #[test]
    fn decode_raw_payload_is_borrowed() {
        let payload = [0x08, 0x01, 0x12, 0x3A, 0xAA, 0xBB];
        let result = enabled().decode(&payload);
        assert!(matches!(&result, Interception::Handled(Cow::Borrowed(_))));
        assert_eq!(result.as_bytes(), Some(&payload[..]));
    }

    #[test]
    fn decode_truncated_gzip_declines() {
        let payload = [0x1F, 0x8B, 0x08, 0x00, 0xDE, 0xAD];
        assert_eq!(enabled().decode(&payload), Interception::Declined);
    }

    #[test]
    fn decode_corrupt_deflate_declines() {
        let mut payload = gzip(b"some save data that compresses");
        // Keep the 10-byte gzip header, clobber the deflate stream.
        for b in payload.iter_mut().skip(10) {
            *b = 0xFF;
        }
        assert_eq!(enabled().decode(&payload), Interception::Declined);
    }

    #[test]
    fn decode_bad_crc_declines() {
        let mut payload = gzip(b"checksummed save");
        let crc_at = payload.len() - 8;
        payload[crc_at] ^= 0xFF;
        assert_eq!(enabled().decode(&payload), Interception::Declined);
    }

    #[test]
    fn decode_short_or_unknown_declines() {
        let codec = enabled();
        assert_eq!(codec.decode(&[]), Interception::Declined);
        assert_eq!(codec.decode(&[0x1F, 0x8B, 0x08]), Interception::Declined);
        assert_eq!(codec.decode(b"PK\x03\x04zip"), Interception::Declined);
    }
}
