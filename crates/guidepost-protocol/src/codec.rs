//! Codec trait and implementations for serializing/deserializing documents.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The store and the HTTP shell both go through the [`Codec`] trait, so
//! the document file and the request bodies always agree on a format.
//!
//! Currently we provide [`JsonCodec`]. The document file is JSON because
//! the dashboard page reads the same shape straight from `/home`.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → safe to share between threads (the store and the
///   dispatcher are reached from many request handlers at once).
/// - `'static` → the codec owns everything it needs, so it can live in
///   the long-lived server state.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the result doesn't
/// borrow from the input bytes. Request bodies and file buffers are
/// dropped right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Output is compact (not pretty-printed); the document file is rewritten
/// wholesale on every save and nobody diffs it by hand.
///
/// ## Example
///
/// ```rust
/// use guidepost_protocol::{Codec, JsonCodec, NavigationDocument};
///
/// let codec = JsonCodec;
/// let doc = NavigationDocument::titled("Nav");
///
/// let bytes = codec.encode(&doc).unwrap();
/// let decoded: NavigationDocument = codec.decode(&bytes).unwrap();
/// assert_eq!(doc, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{Guide, NavigationDocument, Tab};

    #[test]
    fn test_decode_garbage_returns_decode_error() {
        let result: Result<NavigationDocument, _> =
            JsonCodec.decode(b"{not json}");

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_empty_input_returns_decode_error() {
        let result: Result<NavigationDocument, _> = JsonCodec.decode(b"");

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_encode_produces_compact_json() {
        let doc = NavigationDocument {
            title: "Nav".into(),
            tabs: vec![Tab {
                title: "Dev".into(),
                guides: vec![Guide {
                    title: "Go".into(),
                    summary: String::new(),
                    color: "#fff".into(),
                    link: "https://go.dev".into(),
                    time: "2024".into(),
                }],
            }],
        };

        let bytes = JsonCodec.encode(&doc).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(!text.contains('\n'));
        assert!(text.starts_with(r#"{"title":"Nav","tabs":[{"title":"Dev""#));
    }
}
