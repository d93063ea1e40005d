//! Read a capture of a device session (handshake followed by AVL frames) and
//! print each packet.
//!
//! Run with:
//!   cargo run --example stream-file -- capture.bin

use std::fs::File;

use avlprims::codec::{DecodeError, FrameReader, Packet};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: stream-file <capture.bin>")?;
    let mut reader = FrameReader::new(File::open(&path)?);

    loop {
        match reader.read_frame() {
            Ok(packet @ Packet::Imei(_)) => {
                eprintln!("handshake from {}", packet.imei().unwrap_or("<invalid>"));
            }
            Ok(Packet::Avl(frame)) => {
                eprintln!("frame with {} record(s)", frame.records.len());
            }
            Err(DecodeError::ConnectionClosed) if reader.buffered() == 0 => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
