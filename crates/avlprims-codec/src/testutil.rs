//! Wire builders shared by unit tests.

use bytes::{BufMut, BytesMut};

use crate::codec::HEADER_SIZE;
use crate::crc::crc16_ibm;

pub(crate) struct RecordBuilder {
    buf: BytesMut,
}

impl RecordBuilder {
    pub(crate) fn new(timestamp_ms: u64) -> Self {
        let mut buf = BytesMut::new();
        buf.put_u64(timestamp_ms);
        buf.put_u8(1);
        Self { buf }
    }

    pub(crate) fn gps(mut self, lon: i32, lat: i32) -> Self {
        self.buf.put_i32(lon);
        self.buf.put_i32(lat);
        self.buf.put_i16(100);
        self.buf.put_u16(200);
        self.buf.put_u8(5);
        self.buf.put_u16(60);
        self
    }

    /// Event id and total count (1 byte each), then whatever `blocks` writes.
    pub(crate) fn io_standard(&mut self, event_id: u8, blocks: impl FnOnce(&mut BytesMut)) {
        self.buf.put_u8(event_id);
        self.buf.put_u8(0);
        blocks(&mut self.buf);
    }

    /// Event id and total count (2 bytes each), then whatever `blocks` writes.
    pub(crate) fn io_extended(&mut self, event_id: u16, blocks: impl FnOnce(&mut BytesMut)) {
        self.buf.put_u16(event_id);
        self.buf.put_u16(0);
        blocks(&mut self.buf);
    }
}

pub(crate) fn empty_io_standard(record: &mut RecordBuilder) {
    record.io_standard(0, |io| io.put_bytes(0, 4));
}

pub(crate) struct FrameBuilder {
    codec_id: u8,
    records: Vec<BytesMut>,
    trailing_count: Option<u8>,
    valid_crc: bool,
}

impl FrameBuilder {
    pub(crate) fn new(codec_id: u8) -> Self {
        Self {
            codec_id,
            records: Vec::new(),
            trailing_count: None,
            valid_crc: false,
        }
    }

    pub(crate) fn record(mut self, record: RecordBuilder) -> Self {
        self.records.push(record.buf);
        self
    }

    pub(crate) fn trailing_count(mut self, count: u8) -> Self {
        self.trailing_count = Some(count);
        self
    }

    pub(crate) fn with_valid_crc(mut self) -> Self {
        self.valid_crc = true;
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let count = self.records.len() as u8;
        let mut body = BytesMut::new();
        body.put_u8(self.codec_id);
        body.put_u8(count);
        for record in &self.records {
            body.put_slice(record);
        }
        body.put_u8(self.trailing_count.unwrap_or(count));

        let mut wire = BytesMut::with_capacity(HEADER_SIZE + body.len() + 4);
        wire.put_u32(0);
        wire.put_u32(body.len() as u32);
        wire.put_slice(&body);
        let crc = if self.valid_crc {
            u32::from(crc16_ibm(&body))
        } else {
            0
        };
        wire.put_u32(crc);
        wire.to_vec()
    }
}
