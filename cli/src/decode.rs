use std::io::{self, Write};

use adapter::ConditionTextAdapter;
use clap::Args;
use condition::ConditionValue;

use crate::error::Result;
use crate::output::Encoding;
use crate::utils::{format_hex_dump, read_text};

#[derive(Args)]
pub(crate) struct Config {
    /// Condition text. If not specified, reads from stdin
    text: Option<String>,

    /// Read the text strictly as this encoding instead of detecting it
    #[arg(long, value_enum)]
    from: Option<Encoding>,

    /// Output as hexadecimal dump instead of binary
    #[arg(long)]
    hex: bool,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let text = read_text(config.text.as_deref())?;

    let condition = match config.from {
        Some(from) => {
            let der = encoding::decode(&text, from.into())?;
            ConditionValue::from_der(&der)?
        }
        None => ConditionTextAdapter::default().deserialize(&text)?,
    };
    tracing::debug!(bytes = condition.as_der().len(), "decoded condition");

    if config.hex {
        print!("{}", format_hex_dump(condition.as_der()));
    } else {
        io::stdout().write_all(condition.as_der())?;
    }
    Ok(())
}
