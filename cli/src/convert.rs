use adapter::Document;
use clap::Args;

use crate::error::Result;
use crate::output::Encoding;
use crate::utils::read_text;

#[derive(Args)]
pub(crate) struct Config {
    /// Condition text in any supported encoding. If not specified, reads from stdin
    text: Option<String>,

    /// Output encoding
    #[arg(long, value_enum)]
    to: Encoding,

    /// Wrap the output in a `{"condition": ...}` JSON document
    #[arg(long)]
    document: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let text = read_text(config.text.as_deref())?;
    let document: Document = text.parse()?;
    tracing::debug!(from = %document.encoding(), "read condition");

    let document = document.with_encoding(config.to.into());
    if config.document {
        println!("{}", serde_json::to_string(&document)?);
    } else {
        println!("{}", document.text());
    }
    Ok(())
}
