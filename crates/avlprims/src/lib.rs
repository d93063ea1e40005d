//! Teltonika AVL telemetry decoding primitives.
//!
//! avlprims turns Codec 8 and Codec 8 Extended frames sent by GPS trackers into
//! typed records: positions, timestamps and opaque IO id → value pairs.
//!
//! # Crate Structure
//!
//! - [`codec`] — Frame classification, decoding and stream reassembly

/// Re-export codec types.
pub mod codec {
    pub use avlprims_codec::*;
}

pub use avlprims_codec::{decode_frame, is_imei, DecodeError, Frame};
