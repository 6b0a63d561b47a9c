use clap::Args;

use crate::error::Result;
use crate::utils::read_text;

#[derive(Args)]
pub(crate) struct Config {
    /// Encoded text. If not specified, reads from stdin
    text: Option<String>,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let text = read_text(config.text.as_deref())?;
    let (kind, bytes) = encoding::decode_any(&text)?;
    tracing::debug!(encoding = %kind, bytes = bytes.len(), "detected encoding");

    println!("{kind}");
    Ok(())
}
