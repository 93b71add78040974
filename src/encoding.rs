//! Image encoding for model transport
//!
//! Turns uploaded image bytes into the base64 inline representation the
//! vision model expects, and decodes it back for the media upload.

use crate::models::EncodedImage;
use crate::{Error, Result};
use base64::Engine as _;

/// Sniff the image MIME type from magic bytes.
///
/// Only the formats the upload form accepts are recognized; anything else
/// falls back to `image/jpeg`, which was the blanket label the original
/// service applied to every upload.
pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/jpeg",
                &bytes[..bytes.len().min(4)]
            );
            "image/jpeg"
        }
    }
}

/// Encode raw upload bytes into an [`EncodedImage`].
///
/// Pure transform apart from the one validation branch: empty input means the
/// user never supplied a file.
pub fn encode_image(bytes: &[u8]) -> Result<EncodedImage> {
    if bytes.is_empty() {
        return Err(Error::MissingInput("Please upload your image".to_string()));
    }

    Ok(EncodedImage {
        mime_type: detect_image_mime(bytes).to_string(),
        data: base64::engine::general_purpose::STANDARD.encode(bytes),
    })
}

/// Recover the raw bytes from an [`EncodedImage`] for the media upload.
pub fn decode_image(encoded: &EncodedImage) -> Result<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(&encoded.data)
        .map_err(|e| Error::Encoding(format!("Failed to decode base64 image: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_detect_jpeg() {
        assert_eq!(detect_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
    }

    #[test]
    fn test_detect_png() {
        assert_eq!(detect_image_mime(&PNG_HEADER), "image/png");
    }

    #[test]
    fn test_unknown_falls_back_to_jpeg() {
        assert_eq!(detect_image_mime(&[0x00, 0x01, 0x02, 0x03]), "image/jpeg");
        assert_eq!(detect_image_mime(&[0x42]), "image/jpeg");
    }

    #[test]
    fn test_encode_empty_is_missing_input() {
        let err = encode_image(&[]).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }

    #[test]
    fn test_encode_decode_round_trip_is_byte_exact() {
        let mut bytes = PNG_HEADER.to_vec();
        bytes.extend_from_slice(&[0x00, 0x11, 0x22, 0x33, 0xFE, 0xFF]);

        let encoded = encode_image(&bytes).unwrap();
        assert_eq!(encoded.mime_type, "image/png");
        assert_eq!(decode_image(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_encode_jpeg_round_trip() {
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        let encoded = encode_image(&bytes).unwrap();
        assert_eq!(encoded.mime_type, "image/jpeg");
        assert_eq!(decode_image(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let encoded = EncodedImage {
            mime_type: "image/jpeg".to_string(),
            data: "not base64!!!".to_string(),
        };
        let err = decode_image(&encoded).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }
}
