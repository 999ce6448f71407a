//! Encoding and decoding of Raw Frame Format byte streams.
//!
//! A buffer is a plain concatenation of records. Each record is a 16 byte
//! little-endian header followed by the payload, padded with zeros to the
//! record stride (see [`record_size`]).

use alloc::vec::Vec;

use super::{HEADER_SIZE, MAX_PAYLOAD_LEN, RawFrame, record_size};
use crate::types::FrameType;
use crate::{Error, Result};

const TIMESTAMP_OFFSET: usize = 0;
const IDENTIFIER_OFFSET: usize = 8;
const TYPE_OFFSET: usize = 12;
const FLAGS_OFFSET: usize = 13;
const INFO_OFFSET: usize = 14;
const PAYLOAD_LEN_OFFSET: usize = 15;

// ============================================================================
// Byte Helpers
// ============================================================================

/// Read a u64 from a byte slice at the given offset (little-endian).
///
/// # Panics
/// Panics if `offset + 8 > bytes.len()`.
#[inline]
fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut le = [0u8; 8];
    le.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(le)
}

/// Read a u32 from a byte slice at the given offset (little-endian).
#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut le = [0u8; 4];
    le.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(le)
}

#[inline]
fn check_payload_len(len: usize) -> Result<()> {
    if len > MAX_PAYLOAD_LEN {
        return Err(Error::PayloadTooLarge {
            len,
            max: MAX_PAYLOAD_LEN,
        });
    }
    Ok(())
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode the record starting at `offset`.
///
/// Returns the frame and the number of bytes consumed, padding included. The
/// padding of the last record may be cut short by the end of the buffer;
/// only the header and the declared payload must be present.
///
/// # Errors
/// - [`Error::TruncatedRecord`] if the header or payload runs past the buffer
/// - [`Error::PayloadTooLarge`] if the declared payload exceeds the format maximum
/// - [`Error::UnsupportedFrameType`] if the type tag is not part of the format
pub fn decode_one(buffer: &[u8], offset: usize) -> Result<(RawFrame, usize)> {
    let available = buffer.len().saturating_sub(offset);
    if available < HEADER_SIZE {
        return Err(Error::TruncatedRecord {
            offset,
            needed: HEADER_SIZE,
            available,
        });
    }
    let header = &buffer[offset..offset + HEADER_SIZE];

    let payload_len = header[PAYLOAD_LEN_OFFSET] as usize;
    check_payload_len(payload_len)?;

    let needed = HEADER_SIZE + payload_len;
    if available < needed {
        return Err(Error::TruncatedRecord {
            offset,
            needed,
            available,
        });
    }

    let frame_type = FrameType::from_u8(header[TYPE_OFFSET])?;
    let payload_start = offset + HEADER_SIZE;
    let frame = RawFrame {
        timestamp: read_u64(header, TIMESTAMP_OFFSET),
        identifier: read_u32(header, IDENTIFIER_OFFSET),
        frame_type,
        flags: header[FLAGS_OFFSET],
        info: header[INFO_OFFSET],
        payload: buffer[payload_start..payload_start + payload_len].to_vec(),
    };

    let consumed = record_size(payload_len).min(available);
    Ok((frame, consumed))
}

/// Decode every complete record of `buffer`, in order.
///
/// Trailing bytes that do not form a complete record end the sequence
/// without an error.
pub fn decode_all(buffer: &[u8]) -> RawFrameIter<&[u8]> {
    RawFrameIter::new(buffer)
}

/// Iterator over the records of a Raw Frame Format buffer.
///
/// The iterator is finite and cannot be restarted. A record that is present
/// but malformed yields an `Err` and ends the iteration, since the stride of
/// the following records can no longer be trusted.
#[derive(Debug, Clone)]
pub struct RawFrameIter<B> {
    buffer: B,
    position: usize,
    done: bool,
}

impl<B: AsRef<[u8]>> RawFrameIter<B> {
    /// Iterate over the records of `buffer` from its first byte.
    pub fn new(buffer: B) -> Self {
        Self {
            buffer,
            position: 0,
            done: false,
        }
    }

    /// Byte offset of the next record.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes that have not been consumed yet.
    pub fn remaining(&self) -> &[u8] {
        &self.buffer.as_ref()[self.position..]
    }
}

impl<B: AsRef<[u8]>> Iterator for RawFrameIter<B> {
    type Item = Result<RawFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let bytes = self.buffer.as_ref();
        if self.position >= bytes.len() {
            self.done = true;
            return None;
        }
        match decode_one(bytes, self.position) {
            Ok((frame, consumed)) => {
                self.position += consumed;
                Some(Ok(frame))
            }
            Err(Error::TruncatedRecord { .. }) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<B: AsRef<[u8]>> core::iter::FusedIterator for RawFrameIter<B> {}

// ============================================================================
// Encoding
// ============================================================================

/// Encode one frame, appending it to `out`.
pub fn encode_into(frame: &RawFrame, out: &mut Vec<u8>) -> Result<()> {
    let payload_len = frame.payload.len();
    check_payload_len(payload_len)?;

    let start = out.len();
    out.extend_from_slice(&frame.timestamp.to_le_bytes());
    out.extend_from_slice(&frame.identifier.to_le_bytes());
    out.push(frame.frame_type.to_u8());
    out.push(frame.flags);
    out.push(frame.info);
    out.push(payload_len as u8);
    out.extend_from_slice(&frame.payload);
    out.resize(start + record_size(payload_len), 0);
    Ok(())
}

/// Encode one frame: header, payload and padding to the record stride.
///
/// # Errors
/// Returns [`Error::PayloadTooLarge`] if the payload exceeds the format maximum.
pub fn encode_one(frame: &RawFrame) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(frame.encoded_len());
    encode_into(frame, &mut out)?;
    Ok(out)
}

/// Encode a sequence of frames into one buffer, preserving input order.
///
/// Nothing is returned if any frame fails to encode.
pub fn encode_all<'a, I>(frames: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a RawFrame>,
{
    let mut out = Vec::new();
    for frame in frames {
        encode_into(frame, &mut out)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::BASE_UNIT_SIZE;
    use alloc::vec;

    fn sample(payload: Vec<u8>) -> RawFrame {
        RawFrame {
            timestamp: 0x0102_0304_0506_0708,
            identifier: 0x2000_0123,
            frame_type: FrameType::CanFdData,
            flags: 0x80,
            info: 0x05,
            payload,
        }
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode_one(&sample(vec![0xAA, 0xBB, 0xCC])).unwrap();
        assert_eq!(bytes.len(), BASE_UNIT_SIZE);
        assert_eq!(&bytes[0..8], &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[8..12], &[0x23, 0x01, 0x00, 0x20]);
        assert_eq!(bytes[12], 0x10);
        assert_eq!(bytes[13], 0x80);
        assert_eq!(bytes[14], 0x05);
        assert_eq!(bytes[15], 3);
        assert_eq!(&bytes[16..19], &[0xAA, 0xBB, 0xCC]);
        assert!(bytes[19..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_skips_padding() {
        let mut buffer = encode_one(&sample(vec![1, 2])).unwrap();
        buffer.extend(encode_one(&sample(vec![3; 12])).unwrap());

        let (first, consumed) = decode_one(&buffer, 0).unwrap();
        assert_eq!(first.payload, vec![1, 2]);
        assert_eq!(consumed, 24);

        let (second, consumed) = decode_one(&buffer, 24).unwrap();
        assert_eq!(second.payload, vec![3; 12]);
        assert_eq!(consumed, 32);
    }

    #[test]
    fn test_decode_truncated_payload() {
        let bytes = encode_one(&sample(vec![9; 20])).unwrap();
        let err = decode_one(&bytes[..30], 0).unwrap_err();
        assert_eq!(
            err,
            Error::TruncatedRecord {
                offset: 0,
                needed: 36,
                available: 30
            }
        );
    }

    #[test]
    fn test_decode_tolerates_short_padding() {
        let bytes = encode_one(&sample(vec![1, 2, 3])).unwrap();
        let (frame, consumed) = decode_one(&bytes[..19], 0).unwrap();
        assert_eq!(frame.payload, vec![1, 2, 3]);
        assert_eq!(consumed, 19);
    }

    #[test]
    fn test_decode_rejects_oversized_declaration() {
        let mut bytes = encode_one(&sample(vec![])).unwrap();
        bytes[15] = 65;
        bytes.resize(200, 0);
        assert_eq!(
            decode_one(&bytes, 0).unwrap_err(),
            Error::PayloadTooLarge { len: 65, max: 64 }
        );
    }

    #[test]
    fn test_encode_rejects_oversized_payload() {
        assert_eq!(
            encode_one(&sample(vec![0; 65])).unwrap_err(),
            Error::PayloadTooLarge { len: 65, max: 64 }
        );
    }

    #[test]
    fn test_iter_drops_partial_tail() {
        let mut buffer = encode_one(&sample(vec![1])).unwrap();
        buffer.extend_from_slice(&[0u8; 10]);

        let mut iter = decode_all(&buffer);
        assert_eq!(iter.next().unwrap().unwrap().payload, vec![1]);
        assert!(iter.next().is_none());
        assert_eq!(iter.position(), 24);
        assert_eq!(iter.remaining().len(), 10);
    }

    #[test]
    fn test_iter_stops_on_unknown_type() {
        let mut buffer = encode_one(&sample(vec![])).unwrap();
        let mut bad = encode_one(&sample(vec![])).unwrap();
        bad[12] = 0x7F;
        buffer.extend(bad);
        buffer.extend(encode_one(&sample(vec![])).unwrap());

        let results: Vec<_> = decode_all(&buffer).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(Error::UnsupportedFrameType(0x7F)));
    }
}
