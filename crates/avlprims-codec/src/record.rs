use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::cursor::Cursor;
use crate::error::Result;
use crate::gps::{decode_gps, GpsFix};
use crate::io::{decode_io_block, IoBlock, IoWidth};

/// Record time in milliseconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Convert to a `SystemTime`, or `None` if it does not fit the platform clock.
    pub fn to_system_time(self) -> Option<SystemTime> {
        UNIX_EPOCH.checked_add(Duration::from_millis(self.0))
    }
}

/// One AVL data record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub timestamp: Timestamp,
    /// 0 = low, 1 = high, 2 = panic.
    pub priority: u8,
    pub gps: GpsFix,
    pub io: IoBlock,
}

/// Decode one record, advancing `cur` past it.
pub fn decode_record(cur: &mut Cursor<'_>, width: IoWidth) -> Result<Record> {
    let timestamp = Timestamp::from_millis(cur.read_u64()?);
    let priority = cur.read_u8()?;
    let gps = decode_gps(cur)?;
    let io = decode_io_block(cur, width)?;

    Ok(Record {
        timestamp,
        priority,
        gps,
        io,
    })
}

#[cfg(test)]
mod tests {
    use bytes::{BufMut, BytesMut};

    use super::*;
    use crate::io::Value;

    #[test]
    fn decodes_record_fields_in_order() {
        let mut buf = BytesMut::new();
        buf.put_u64(1_700_000_000_123);
        buf.put_u8(2);
        buf.put_i32(250_000_000);
        buf.put_i32(-340_000_000);
        buf.put_i16(512);
        buf.put_u16(90);
        buf.put_u8(11);
        buf.put_u16(42);
        buf.put_u8(239);
        buf.put_u8(1);
        buf.put_u8(1);
        buf.put_u8(239);
        buf.put_i8(1);
        buf.put_u8(0);
        buf.put_u8(0);
        buf.put_u8(0);
        buf.put_u8(0xAA); // next record

        let mut cur = Cursor::new(&buf);
        let record = decode_record(&mut cur, IoWidth::Standard).unwrap();

        assert_eq!(record.timestamp.as_millis(), 1_700_000_000_123);
        assert_eq!(record.priority, 2);
        assert!((record.gps.longitude - 25.0).abs() < 1e-9);
        assert!((record.gps.latitude + 34.0).abs() < 1e-9);
        assert_eq!(record.gps.altitude, 512);
        assert_eq!(record.io.event_io_id, 239);
        assert_eq!(record.io.get(239), Some(&Value::Integer(1)));
        assert_eq!(cur.remaining(), 1);
    }

    #[test]
    fn timestamp_to_system_time() {
        let ts = Timestamp::from_millis(1_500);
        assert_eq!(
            ts.to_system_time(),
            Some(UNIX_EPOCH + Duration::from_millis(1_500))
        );
    }
}
