//! Base64 payload codec
//!
//! Byte-stream payloads travel on the wire as standard padded base64 so the
//! frame stays printable text. Encoding and decoding work on caller-provided
//! slices; nothing here allocates.
//!
//! Base64 groups decode to 1-3 trailing bytes depending on padding, so the
//! exact output length is only known after decoding. [`decoded_len_estimate`]
//! gives a conservative bound for sizing the output buffer and the actual
//! length is returned by [`decode`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Errors that can occur while encoding or decoding a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Input is not valid base64 (bad symbol, length or padding)
    InvalidInput,
    /// Output buffer too small for the result
    OutputTooSmall,
}

/// Exact encoded length for a payload of `len` bytes, `None` on overflow
pub fn encoded_len(len: usize) -> Option<usize> {
    base64::encoded_len(len, true)
}

/// Conservative upper bound on the decoded length of `len` encoded bytes
pub fn decoded_len_estimate(len: usize) -> usize {
    base64::decoded_len_estimate(len)
}

/// Encode `input` into `out`, returning the number of bytes written
pub fn encode(input: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
    STANDARD
        .encode_slice(input, out)
        .map_err(|_| CodecError::OutputTooSmall)
}

/// Decode base64 `input` into `out`, returning the actual decoded length
///
/// Rejects malformed input without reading past `input` or writing past
/// `out`. `out` should hold at least [`decoded_len_estimate`] bytes.
pub fn decode(input: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
    use base64::DecodeSliceError;

    STANDARD.decode_slice(input, out).map_err(|e| match e {
        DecodeSliceError::DecodeError(_) => CodecError::InvalidInput,
        DecodeSliceError::OutputSliceTooSmall => CodecError::OutputTooSmall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_known_vector() {
        let mut out = [0u8; 8];
        let n = encode(&[0x01, 0x02, 0x03], &mut out).unwrap();
        assert_eq!(&out[..n], b"AQID");
    }

    #[test]
    fn test_decode_known_vector() {
        let mut out = [0u8; 8];
        let n = decode(b"AQID", &mut out).unwrap();
        assert_eq!(&out[..n], &[0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_padding_one_byte() {
        let mut out = [0u8; 8];
        let n = decode(b"AQ==", &mut out).unwrap();
        assert_eq!(&out[..n], &[0x01]);
    }

    #[test]
    fn test_padding_two_bytes() {
        let mut out = [0u8; 8];
        let n = decode(b"AQI=", &mut out).unwrap();
        assert_eq!(&out[..n], &[0x01, 0x02]);
    }

    #[test]
    fn test_decode_rejects_bad_symbol() {
        let mut out = [0u8; 8];
        assert_eq!(decode(b"A*ID", &mut out), Err(CodecError::InvalidInput));
    }

    #[test]
    fn test_decode_rejects_bad_length() {
        let mut out = [0u8; 8];
        assert_eq!(decode(b"AQIDA", &mut out), Err(CodecError::InvalidInput));
    }

    #[test]
    fn test_encode_output_too_small() {
        let mut out = [0u8; 2];
        assert_eq!(
            encode(&[0x01, 0x02, 0x03], &mut out),
            Err(CodecError::OutputTooSmall)
        );
    }

    #[test]
    fn test_empty_payload() {
        let mut enc = [0u8; 4];
        let n = encode(&[], &mut enc).unwrap();
        assert_eq!(n, 0);
        let mut dec = [0u8; 4];
        assert_eq!(decode(&[], &mut dec), Ok(0));
    }

    proptest! {
        // Round-trip for every length 0..=64, including non-multiples of 3
        #[test]
        fn test_roundtrip(payload in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut enc = [0u8; 96];
            let enc_len = encode(&payload, &mut enc).unwrap();
            prop_assert_eq!(Some(enc_len), encoded_len(payload.len()));

            let mut dec = [0u8; 96];
            let dec_len = decode(&enc[..enc_len], &mut dec).unwrap();
            prop_assert!(dec_len <= decoded_len_estimate(enc_len));
            prop_assert_eq!(&dec[..dec_len], &payload[..]);
        }
    }
}
