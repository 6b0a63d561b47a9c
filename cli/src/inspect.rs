use adapter::Document;
use clap::Args;
use encoding::EncodingKind;
use serde::Serialize;

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_text;

#[derive(Args)]
pub(crate) struct Config {
    /// Condition text in any supported encoding. If not specified, reads from stdin
    text: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Serialize)]
struct Inspection {
    #[serde(rename = "type")]
    condition_type: String,
    fingerprint: String,
    cost: u32,
    subtypes: Vec<String>,
    uri: String,
    encoding: EncodingKind,
}

impl From<&Document> for Inspection {
    fn from(document: &Document) -> Self {
        let condition = document.condition();
        Inspection {
            condition_type: condition.condition_type().to_string(),
            fingerprint: encoding::encode(condition.fingerprint(), EncodingKind::Hex).into_string(),
            cost: condition.cost(),
            subtypes: condition.subtypes().iter().map(|t| t.to_string()).collect(),
            uri: condition.uri(),
            encoding: document.encoding(),
        }
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let text = read_text(config.text.as_deref())?;
    let document: Document = text.parse()?;
    let inspection = Inspection::from(&document);

    match config.output {
        OutputFormat::Text => {
            println!("Condition:");
            println!("    Type: {}", inspection.condition_type);
            println!("    Fingerprint: {}", inspection.fingerprint);
            println!("    Cost: {}", inspection.cost);
            if !inspection.subtypes.is_empty() {
                println!("    Subtypes: {}", inspection.subtypes.join(", "));
            }
            println!("    URI: {}", inspection.uri);
            println!("    Encoding: {}", inspection.encoding);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&inspection)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&inspection)?);
        }
    }
    Ok(())
}
