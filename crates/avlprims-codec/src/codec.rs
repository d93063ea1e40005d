use serde::Serialize;

use crate::crc::crc16_ibm;
use crate::cursor::Cursor;
use crate::error::{DecodeError, Result};
use crate::io::IoWidth;
use crate::record::{decode_record, Record};

/// Preamble: 4 zero bytes.
pub const PREAMBLE_SIZE: usize = 4;

/// Frame header: preamble (4) + data length (4) = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Trailing CRC region.
pub const CRC_SIZE: usize = 4;

/// Codec ID of Codec 8.
pub const CODEC_8: u8 = 0x08;

/// Codec ID of Codec 8 Extended.
pub const CODEC_8_EXTENDED: u8 = 0x8E;

/// Default maximum declared frame size accepted by stream reassembly: 64 KiB.
pub const DEFAULT_MAX_FRAME: usize = 64 * 1024;

/// Wire variant selected by the codec ID byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Codec8,
    Codec8Extended,
    /// Any other ID. Decoded with Codec 8 field widths.
    Unknown(u8),
}

impl Codec {
    pub fn from_id(id: u8) -> Self {
        match id {
            CODEC_8 => Self::Codec8,
            CODEC_8_EXTENDED => Self::Codec8Extended,
            other => Self::Unknown(other),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Self::Codec8 => CODEC_8,
            Self::Codec8Extended => CODEC_8_EXTENDED,
            Self::Unknown(id) => id,
        }
    }

    pub fn is_extended(self) -> bool {
        matches!(self, Self::Codec8Extended)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Codec8 => "Codec 8",
            Self::Codec8Extended => "Codec 8 Extended",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// A decoded AVL data frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub codec_id: u8,
    /// Leading record count as sent; the trailing count is not enforced.
    pub record_count: u8,
    pub records: Vec<Record>,
    /// Bytes the frame occupies on the wire, CRC region included.
    pub consumed: usize,
}

impl Frame {
    pub fn codec(&self) -> Codec {
        Codec::from_id(self.codec_id)
    }
}

/// Configuration for frame decoding.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Verify the trailing CRC-16/IBM. Default: false.
    pub verify_crc: bool,
    /// Maximum declared frame size for stream reassembly. Default: 64 KiB.
    pub max_frame_size: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            verify_crc: false,
            max_frame_size: DEFAULT_MAX_FRAME,
        }
    }
}

/// Returns true when `buf` is not an AVL data frame.
///
/// AVL frames start with a 4-byte zero preamble. Anything else, including a
/// buffer too short to hold one, is treated as an IMEI handshake or unknown data.
pub fn is_imei(buf: &[u8]) -> bool {
    match buf.first_chunk::<PREAMBLE_SIZE>() {
        Some(preamble) => u32::from_be_bytes(*preamble) != 0,
        None => true,
    }
}

/// Decode an AVL frame with the default configuration.
///
/// Wire format (all integers big-endian):
/// ```text
/// ┌──────────────┬─────────────┬──────────┬──────────┬─────────┬──────────┬─────────┐
/// │ Preamble     │ Data length │ Codec ID │ Count 1  │ Records │ Count 2  │ CRC     │
/// │ (4B, zero)   │ (4B)        │ (1B)     │ (1B)     │         │ (1B)     │ (4B)    │
/// └──────────────┴─────────────┴──────────┴──────────┴─────────┴──────────┴─────────┘
/// ```
/// The data length covers the codec ID through count 2.
pub fn decode_frame(buf: &[u8]) -> Result<Frame> {
    decode_frame_with_config(buf, &DecoderConfig::default())
}

/// Decode an AVL frame with explicit configuration.
pub fn decode_frame_with_config(buf: &[u8], config: &DecoderConfig) -> Result<Frame> {
    if is_imei(buf) {
        return Err(DecodeError::NotAvlFrame);
    }
    decode_avl(buf, config)
}

/// Decode without classifying first. The preamble is still checked.
fn decode_avl(buf: &[u8], config: &DecoderConfig) -> Result<Frame> {
    let mut cur = Cursor::new(buf);

    if cur.read_u32()? != 0 {
        return Err(DecodeError::InvalidPreamble);
    }

    let data_length = cur.read_u32()? as usize;
    let expected_end = HEADER_SIZE.saturating_add(data_length);
    if buf.len() < expected_end {
        return Err(DecodeError::BufferTooShort {
            expected: expected_end,
            actual: buf.len(),
        });
    }

    let codec_id = cur.read_u8()?;
    let codec = Codec::from_id(codec_id);
    if let Codec::Unknown(id) = codec {
        tracing::warn!(codec_id = id, "unknown codec id, decoding as Codec 8");
    }

    let record_count = cur.read_u8()?;
    let width = IoWidth::from_extended(codec.is_extended());
    let mut records = Vec::with_capacity(usize::from(record_count));
    for _ in 0..record_count {
        records.push(decode_record(&mut cur, width)?);
    }

    let trailing_count = cur.read_u8()?;
    if trailing_count != record_count {
        tracing::warn!(
            leading = record_count,
            trailing = trailing_count,
            "record count mismatch"
        );
    }

    let consumed = expected_end + CRC_SIZE;
    if config.verify_crc {
        verify_crc(buf, expected_end)?;
    }

    tracing::debug!(
        codec = codec.name(),
        records = records.len(),
        consumed,
        "decoded AVL frame"
    );

    Ok(Frame {
        codec_id,
        record_count,
        records,
        consumed,
    })
}

fn verify_crc(buf: &[u8], expected_end: usize) -> Result<()> {
    let end = expected_end + CRC_SIZE;
    if buf.len() < end {
        return Err(DecodeError::BufferTooShort {
            expected: end,
            actual: buf.len(),
        });
    }

    let mut cur = Cursor::new(&buf[expected_end..end]);
    let expected = cur.read_u32()?;
    let actual = u32::from(crc16_ibm(&buf[HEADER_SIZE..expected_end]));
    if expected != actual {
        return Err(DecodeError::CrcMismatch { expected, actual });
    }
    Ok(())
}
