use std::fs;
use std::io::{self, Read};

use crate::error::Result;

/// Reads raw bytes from `file`, or from stdin when no file is given.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => Ok(fs::read(path)?),
        None => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Returns the condition text given on the command line, or reads it from
/// stdin. Surrounding whitespace is dropped either way.
pub(crate) fn read_text(text: Option<&str>) -> Result<String> {
    match text {
        Some(text) => Ok(text.trim().to_string()),
        None => {
            let contents = String::from_utf8(read_input(None)?)?;
            Ok(contents.trim().to_string())
        }
    }
}

/// Formats `data` like `xxd`: offset, 16 hex bytes split in two groups,
/// then the printable ASCII.
pub(crate) fn format_hex_dump(data: &[u8]) -> String {
    const BYTES_PER_LINE: usize = 16;
    let mut output = String::new();

    for (line, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        output.push_str(&format!("{:08x}  ", line * BYTES_PER_LINE));

        for i in 0..BYTES_PER_LINE {
            match chunk.get(i) {
                Some(byte) => output.push_str(&format!("{byte:02x} ")),
                None => output.push_str("   "),
            }
            if i == 7 {
                output.push(' ');
            }
        }

        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        output.push_str(&format!(" |{ascii}|\n"));
    }

    output
}
