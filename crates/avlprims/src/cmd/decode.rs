use avlprims_codec::{decode_frame_with_config, DecoderConfig};

use crate::cmd::DecodeArgs;
use crate::exit::{decode_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = args.input.read()?;
    let config = DecoderConfig {
        verify_crc: args.verify_crc,
        ..DecoderConfig::default()
    };

    let frame = decode_frame_with_config(&bytes, &config)
        .map_err(|err| decode_error("decode failed", err))?;

    if frame.consumed < bytes.len() {
        tracing::warn!(
            consumed = frame.consumed,
            size = bytes.len(),
            "input has trailing bytes after the frame"
        );
    }

    print_frame(&frame, format);
    Ok(SUCCESS)
}
