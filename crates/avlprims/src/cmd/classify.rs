use avlprims_codec::is_imei;

use crate::cmd::ClassifyArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_classification, OutputFormat};

pub fn run(args: ClassifyArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = args.input.read()?;
    let imei = is_imei(&bytes);
    tracing::debug!(imei, size = bytes.len(), "classified input");
    print_classification(imei, bytes.len(), format);
    Ok(SUCCESS)
}
