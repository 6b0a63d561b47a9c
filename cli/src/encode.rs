use adapter::ConditionTextAdapter;
use clap::Args;
use condition::ConditionValue;

use crate::error::Result;
use crate::output::Encoding;
use crate::utils::read_input;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the DER encoded condition. If not specified, reads from stdin
    file: Option<String>,

    /// Output encoding
    #[arg(long, value_enum, default_value = "hex")]
    to: Encoding,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let der = read_input(config.file.as_deref())?;
    let condition = ConditionValue::from_der(&der)?;
    tracing::debug!(condition_type = %condition.condition_type(), bytes = der.len(), "read condition");

    let text = ConditionTextAdapter::new(config.to.into()).serialize(&condition);
    println!("{text}");
    Ok(())
}
