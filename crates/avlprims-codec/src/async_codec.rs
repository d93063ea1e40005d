use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::codec::DecoderConfig;
use crate::error::DecodeError;
use crate::reader::{split_frame, Packet};

/// `tokio_util` decoder yielding classified, decoded packets.
#[derive(Debug, Clone, Default)]
pub struct AvlCodec {
    config: DecoderConfig,
}

impl AvlCodec {
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

impl Decoder for AvlCodec {
    type Item = Packet;
    type Error = DecodeError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match split_frame(src, self.config.max_frame_size)? {
            Some(raw) => Packet::decode(raw, &self.config).map(Some),
            None => Ok(None),
        }
    }
}
