/// Errors that can occur while decoding AVL frames.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The buffer is a device-identity handshake or otherwise not an AVL data frame.
    #[error("buffer contains IMEI or unknown data, not AVL records")]
    NotAvlFrame,

    /// The frame does not start with the 4-byte zero preamble.
    #[error("invalid preamble (expected 0x00000000)")]
    InvalidPreamble,

    /// The declared data length runs past the end of the buffer.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    /// A field inside the frame body runs past the end of the buffer.
    #[error("truncated field at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The trailing CRC does not match the frame contents (only with `verify_crc`).
    #[error("crc mismatch (frame carries {expected:#06x}, computed {actual:#06x})")]
    CrcMismatch { expected: u32, actual: u32 },

    /// A declared frame length exceeds the configured maximum.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading frames from a stream.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, DecodeError>;
