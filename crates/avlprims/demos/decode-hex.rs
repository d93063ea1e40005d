//! Decode a single Codec 8 frame and print its records.
//!
//! Run with:
//!   cargo run --example decode-hex

use avlprims::codec::{decode_frame, Value};

const FRAME: &str = "000000000000003608010000016B40D8EA30010000000000000000000000000000000105021503010101425E0F01F10000601A014E0000000000000000010000C7CF";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let wire = (0..FRAME.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&FRAME[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()?;

    let frame = decode_frame(&wire)?;
    eprintln!(
        "{} record(s), codec {:#04x}, {} bytes",
        frame.record_count, frame.codec_id, frame.consumed
    );

    for record in &frame.records {
        println!(
            "t={} lat={} lon={} event={}",
            record.timestamp.as_millis(),
            record.gps.latitude,
            record.gps.longitude,
            record.io.event_io_id
        );
        for (id, value) in &record.io.elements {
            match value {
                Value::Integer(v) => println!("  io {id} = {v}"),
                Value::Bytes(b) => println!("  io {id} = {} bytes", b.len()),
            }
        }
    }

    Ok(())
}
