use std::io::{ErrorKind, Read};

use bytes::{Buf, Bytes, BytesMut};

use crate::codec::{
    decode_frame_with_config, is_imei, DecoderConfig, Frame, CRC_SIZE, HEADER_SIZE,
};
use crate::error::{DecodeError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

/// Length prefix of an IMEI handshake.
const IMEI_LENGTH_SIZE: usize = 2;

/// A complete packet received from a device.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Device-identity handshake, length prefix included.
    Imei(Bytes),
    /// Decoded AVL data frame.
    Avl(Frame),
}

impl Packet {
    /// Classify and decode one complete packet.
    pub fn decode(raw: Bytes, config: &DecoderConfig) -> Result<Self> {
        if is_imei(&raw) {
            return Ok(Self::Imei(raw));
        }
        decode_frame_with_config(&raw, config).map(Self::Avl)
    }

    /// The IMEI digits of a handshake packet, if they are valid UTF-8.
    pub fn imei(&self) -> Option<&str> {
        match self {
            Self::Imei(raw) => raw
                .get(IMEI_LENGTH_SIZE..)
                .and_then(|digits| std::str::from_utf8(digits).ok()),
            Self::Avl(_) => None,
        }
    }
}

/// Split one complete packet off the front of `src`.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete packet yet.
/// AVL frames (zero preamble) span header + data length + CRC. Anything else is
/// read as an IMEI handshake: a 2-byte big-endian length followed by the digits.
pub fn split_frame(src: &mut BytesMut, max_frame_size: usize) -> Result<Option<Bytes>> {
    if src.len() < IMEI_LENGTH_SIZE {
        return Ok(None);
    }

    let length_prefix = u16::from_be_bytes([src[0], src[1]]);
    let total = if length_prefix == 0 {
        if src.len() < HEADER_SIZE {
            return Ok(None);
        }
        if src[2..4] != [0, 0] {
            return Err(DecodeError::InvalidPreamble);
        }
        let data_length = u32::from_be_bytes([src[4], src[5], src[6], src[7]]) as usize;
        HEADER_SIZE
            .saturating_add(data_length)
            .saturating_add(CRC_SIZE)
    } else {
        IMEI_LENGTH_SIZE + usize::from(length_prefix)
    };

    if total > max_frame_size {
        return Err(DecodeError::FrameTooLarge {
            size: total,
            max: max_frame_size,
        });
    }

    if src.len() < total {
        src.reserve(total - src.len());
        return Ok(None);
    }

    Ok(Some(src.split_to(total).freeze()))
}

/// Reads complete packets from any `Read` stream.
///
/// Handles partial reads internally, so callers always get complete packets.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: DecoderConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, DecoderConfig::default())
    }

    /// Create a new reader with explicit configuration.
    pub fn with_config(inner: T, config: DecoderConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete packet without decoding it (blocking).
    ///
    /// Returns `Err(DecodeError::ConnectionClosed)` when EOF is reached.
    pub fn read_packet(&mut self) -> Result<Bytes> {
        loop {
            if let Some(raw) = split_frame(&mut self.buf, self.config.max_frame_size)? {
                return Ok(raw);
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(DecodeError::Io(err)),
            };

            if read == 0 {
                return Err(DecodeError::ConnectionClosed);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read and decode the next packet (blocking).
    pub fn read_frame(&mut self) -> Result<Packet> {
        let raw = self.read_packet()?;
        Packet::decode(raw, &self.config)
    }

    /// Bytes received but not yet returned as a packet.
    pub fn buffered(&self) -> usize {
        self.buf.remaining()
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current reader configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}
