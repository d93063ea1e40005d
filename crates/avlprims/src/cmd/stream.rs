use std::fs::File;
use std::io::Read;

use avlprims_codec::{DecodeError, DecoderConfig, FrameReader};

use crate::cmd::StreamArgs;
use crate::exit::{decode_error, io_error, CliResult, SUCCESS};
use crate::output::{print_packet, OutputFormat};

pub fn run(args: StreamArgs, format: OutputFormat) -> CliResult<i32> {
    let source: Box<dyn Read> = match &args.file {
        Some(path) => Box::new(
            File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?,
        ),
        None => Box::new(std::io::stdin().lock()),
    };

    let config = DecoderConfig {
        verify_crc: args.verify_crc,
        max_frame_size: args.max_frame_size,
    };
    let mut reader = FrameReader::with_config(source, config);
    let mut printed = 0usize;

    loop {
        let packet = match reader.read_frame() {
            Ok(packet) => packet,
            Err(DecodeError::ConnectionClosed) if reader.buffered() == 0 => break,
            Err(err) => return Err(decode_error("stream decode failed", err)),
        };

        print_packet(&packet, format);
        printed = printed.saturating_add(1);

        if let Some(count) = args.count {
            if printed >= count {
                break;
            }
        }
    }

    tracing::info!(packets = printed, "stream finished");
    Ok(SUCCESS)
}
