//! IO element decoding.
//!
//! The IO element follows the GPS element in every record:
//!
//! ```text
//! ┌──────────┬───────────┬─────────────────┬─────────────────┬─────────────────┬─────────────────┬───────────────────────┐
//! │ Event ID │ Total IO  │ N1 × (id, 1B)   │ N2 × (id, 2B)   │ N4 × (id, 4B)   │ N8 × (id, 8B)   │ NX × (id, len, bytes) │
//! │ (1B/2B)  │ (1B/2B)   │                 │                 │                 │                 │ (Extended only)       │
//! └──────────┴───────────┴─────────────────┴─────────────────┴─────────────────┴─────────────────┴───────────────────────┘
//! ```
//!
//! Ids and counts are 1 byte in Codec 8 and 2 bytes in Codec 8 Extended.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Serialize, Serializer};

use crate::cursor::Cursor;
use crate::error::Result;

/// Value widths of the fixed sub-blocks, in wire order.
pub const FIXED_VALUE_WIDTHS: [usize; 4] = [1, 2, 4, 8];

/// Width of IO ids and counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoWidth {
    /// Codec 8: 1-byte ids and counts.
    Standard,
    /// Codec 8 Extended: 2-byte ids and counts, plus a variable-length sub-block.
    Extended,
}

impl IoWidth {
    pub fn from_extended(extended: bool) -> Self {
        if extended {
            Self::Extended
        } else {
            Self::Standard
        }
    }

    pub fn is_extended(self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Read one id or count field.
    fn read(self, cur: &mut Cursor<'_>) -> Result<u16> {
        match self {
            Self::Standard => cur.read_u8().map(u16::from),
            Self::Extended => cur.read_u16(),
        }
    }
}

/// A single IO element value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Signed value from a 1, 2, 4 or 8 byte sub-block.
    Integer(i64),
    /// Raw bytes from the variable-length sub-block (Codec 8 Extended only).
    Bytes(#[serde(serialize_with = "serialize_hex")] Bytes),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Integer(_) => None,
            Self::Bytes(b) => Some(b.as_ref()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Bytes(b) => write!(f, "0x{}", hex(b)),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn serialize_hex<S: Serializer>(
    bytes: &Bytes,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex(bytes))
}

/// The IO element of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IoBlock {
    /// Id of the IO element that triggered the record (0 for periodic records).
    pub event_io_id: u16,
    /// Values keyed by IO id. A repeated id keeps the last value decoded.
    pub elements: BTreeMap<u16, Value>,
}

impl IoBlock {
    pub fn get(&self, id: u16) -> Option<&Value> {
        self.elements.get(&id)
    }
}

/// Decode a complete IO element, including the variable-length sub-block when
/// `width` is [`IoWidth::Extended`].
pub fn decode_io_block(cur: &mut Cursor<'_>, width: IoWidth) -> Result<IoBlock> {
    let FixedBlocks {
        mut block,
        declared_total,
        entries: mut decoded,
    } = decode_fixed_blocks(cur, width)?;
    if width.is_extended() {
        decoded += decode_variable_block(cur, &mut block.elements)?;
    }

    if usize::from(declared_total) != decoded {
        tracing::debug!(
            declared = declared_total,
            decoded,
            "total IO count does not match decoded entries"
        );
    }
    Ok(block)
}

/// Result of [`decode_fixed_blocks`].
#[derive(Debug)]
pub struct FixedBlocks {
    pub block: IoBlock,
    /// The "total IO count" field as sent. It is not validated.
    pub declared_total: u16,
    /// Number of (id, value) pairs read, duplicates included.
    pub entries: usize,
}

/// Decode the event header and the four fixed-width sub-blocks.
pub fn decode_fixed_blocks(cur: &mut Cursor<'_>, width: IoWidth) -> Result<FixedBlocks> {
    let event_io_id = width.read(cur)?;
    let declared_total = width.read(cur)?;

    let mut elements = BTreeMap::new();
    let mut entries = 0usize;
    for value_width in FIXED_VALUE_WIDTHS {
        let count = width.read(cur)?;
        for _ in 0..count {
            let id = width.read(cur)?;
            let value = read_signed(cur, value_width)?;
            elements.insert(id, Value::Integer(value));
        }
        entries += usize::from(count);
    }

    Ok(FixedBlocks {
        block: IoBlock {
            event_io_id,
            elements,
        },
        declared_total,
        entries,
    })
}

/// Decode the variable-length sub-block into `elements`.
///
/// Each value is copied out of the frame so the result owns its storage.
/// Returns the number of entries read.
pub fn decode_variable_block(
    cur: &mut Cursor<'_>,
    elements: &mut BTreeMap<u16, Value>,
) -> Result<usize> {
    let count = cur.read_u16()?;
    for _ in 0..count {
        let id = cur.read_u16()?;
        let len = cur.read_u16()?;
        let raw = cur.take(usize::from(len))?;
        elements.insert(id, Value::Bytes(Bytes::copy_from_slice(raw)));
    }
    Ok(usize::from(count))
}

fn read_signed(cur: &mut Cursor<'_>, width: usize) -> Result<i64> {
    Ok(match width {
        1 => i64::from(cur.read_i8()?),
        2 => i64::from(cur.read_i16()?),
        4 => i64::from(cur.read_i32()?),
        _ => cur.read_i64()?,
    })
}

#[cfg(test)]
mod tests {
    use bytes::{BufMut, BytesMut};

    use super::*;

    #[test]
    fn standard_fixed_blocks() {
        let mut buf = BytesMut::new();
        buf.put_u8(10); // event id
        buf.put_u8(4);
        buf.put_u8(1);
        buf.put_u8(10);
        buf.put_i8(50);
        buf.put_u8(1);
        buf.put_u8(11);
        buf.put_i16(300);
        buf.put_u8(1);
        buf.put_u8(12);
        buf.put_i32(70_000);
        buf.put_u8(1);
        buf.put_u8(13);
        buf.put_i64(1_234_567_890_123);

        let mut cur = Cursor::new(&buf);
        let block = decode_io_block(&mut cur, IoWidth::Standard).unwrap();

        assert_eq!(block.event_io_id, 10);
        assert_eq!(block.get(10), Some(&Value::Integer(50)));
        assert_eq!(block.get(11), Some(&Value::Integer(300)));
        assert_eq!(block.get(12), Some(&Value::Integer(70_000)));
        assert_eq!(block.get(13), Some(&Value::Integer(1_234_567_890_123)));
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn values_are_sign_extended() {
        let mut buf = BytesMut::new();
        buf.put_u8(0);
        buf.put_u8(2);
        buf.put_u8(1);
        buf.put_u8(1);
        buf.put_u8(0xFF);
        buf.put_u8(1);
        buf.put_u8(2);
        buf.put_u16(0x8000);
        buf.put_u8(0);
        buf.put_u8(0);

        let mut cur = Cursor::new(&buf);
        let block = decode_io_block(&mut cur, IoWidth::Standard).unwrap();
        assert_eq!(block.get(1).and_then(Value::as_integer), Some(-1));
        assert_eq!(block.get(2).and_then(Value::as_integer), Some(-32_768));
    }

    #[test]
    fn duplicate_id_keeps_last_value() {
        let mut buf = BytesMut::new();
        buf.put_u8(0);
        buf.put_u8(2);
        buf.put_u8(1);
        buf.put_u8(7);
        buf.put_i8(1);
        buf.put_u8(0);
        buf.put_u8(1);
        buf.put_u8(7);
        buf.put_i32(99);
        buf.put_u8(0);

        let mut cur = Cursor::new(&buf);
        let block = decode_io_block(&mut cur, IoWidth::Standard).unwrap();
        assert_eq!(block.elements.len(), 1);
        assert_eq!(block.get(7), Some(&Value::Integer(99)));
    }

    #[test]
    fn extended_with_variable_block() {
        let mut buf = BytesMut::new();
        buf.put_u16(256);
        buf.put_u16(2);
        buf.put_u16(1);
        buf.put_u16(500);
        buf.put_i8(123);
        buf.put_u16(0);
        buf.put_u16(0);
        buf.put_u16(0);
        buf.put_u16(1);
        buf.put_u16(1001);
        buf.put_u16(14);
        buf.put_slice(b"TEST_VIN_12345");

        let mut cur = Cursor::new(&buf);
        let block = decode_io_block(&mut cur, IoWidth::Extended).unwrap();

        assert_eq!(block.event_io_id, 256);
        assert_eq!(block.get(500), Some(&Value::Integer(123)));
        assert_eq!(
            block.get(1001).and_then(Value::as_bytes),
            Some(b"TEST_VIN_12345".as_ref())
        );
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn variable_value_past_end_is_truncated() {
        let mut buf = BytesMut::new();
        buf.put_u16(1);
        buf.put_u16(9);
        buf.put_u16(32);
        buf.put_slice(b"short");

        let mut elements = BTreeMap::new();
        let mut cur = Cursor::new(&buf);
        let err = decode_variable_block(&mut cur, &mut elements).unwrap_err();
        assert!(matches!(
            err,
            crate::DecodeError::Truncated { needed: 32, .. }
        ));
    }

    #[test]
    fn value_display_and_json() {
        assert_eq!(Value::Integer(-5).to_string(), "-5");
        let bytes = Value::Bytes(Bytes::from_static(b"\x01\xab"));
        assert_eq!(bytes.to_string(), "0x01ab");
        assert_eq!(
            serde_json::to_string(&bytes).unwrap(),
            r#"{"bytes":"01ab"}"#
        );
    }
}
