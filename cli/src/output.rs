#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Encoding names accepted by `--to` and `--from`.
#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum Encoding {
    Hex,
    Base64,
    Base64NoPadding,
    Base64url,
    Base64urlNoPadding,
}

impl From<Encoding> for encoding::EncodingKind {
    fn from(value: Encoding) -> Self {
        match value {
            Encoding::Hex => encoding::EncodingKind::Hex,
            Encoding::Base64 => encoding::EncodingKind::Base64,
            Encoding::Base64NoPadding => encoding::EncodingKind::Base64NoPadding,
            Encoding::Base64url => encoding::EncodingKind::Base64Url,
            Encoding::Base64urlNoPadding => encoding::EncodingKind::Base64UrlNoPadding,
        }
    }
}
