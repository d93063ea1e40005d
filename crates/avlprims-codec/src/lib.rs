//! Teltonika Codec 8 / Codec 8 Extended AVL frame decoding.
//!
//! This is the core of avlprims. A frame is classified, its header validated,
//! and its records decoded into owned values:
//! - A 4-byte zero preamble and 4-byte big-endian data length
//! - A codec ID selecting 1-byte (Codec 8) or 2-byte (Codec 8 Extended) IO ids
//! - GPS and IO elements per record, with IO values tagged as integers or bytes
//!
//! Decoding is pure and synchronous; every read is bounds-checked.

pub mod codec;
pub mod crc;
pub mod cursor;
pub mod error;
pub mod gps;
pub mod io;
pub mod reader;
pub mod record;

#[cfg(feature = "async")]
pub mod async_codec;

#[cfg(test)]
mod testutil;

#[cfg(feature = "async")]
pub use async_codec::AvlCodec;
pub use codec::{
    decode_frame, decode_frame_with_config, is_imei, Codec, DecoderConfig, Frame, CODEC_8,
    CODEC_8_EXTENDED, CRC_SIZE, DEFAULT_MAX_FRAME, HEADER_SIZE,
};
pub use error::{DecodeError, Result};
pub use gps::{GpsFix, COORDINATE_SCALE};
pub use io::{IoBlock, IoWidth, Value};
pub use reader::{split_frame, FrameReader, Packet};
pub use record::{Record, Timestamp};
