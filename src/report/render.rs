//! CSV rendering for report records.
//!
//! Fields are written raw: nothing is quoted or escaped, so a field that
//! contains a comma or newline will shift columns. Lines are separated by a
//! single `\n` and the document has no trailing newline.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::fields::OutputRecord;
use crate::{Error, Result};

pub const FIELD_SEPARATOR: u8 = b',';
pub const LINE_SEPARATOR: u8 = b'\n';

/// Render `header` followed by one line per record.
///
/// Every record must have as many fields as the header.
pub fn render_csv(header: &[&str], records: &[OutputRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(FIELD_SEPARATOR)
        .terminator(Terminator::Any(LINE_SEPARATOR))
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    writer.write_record(header).map_err(render_error)?;
    for record in records {
        writer.write_record(record.fields()).map_err(render_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Render(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| Error::Render(e.to_string()))?;

    if text.ends_with(LINE_SEPARATOR as char) {
        text.pop();
    }
    Ok(text)
}

fn render_error(err: csv::Error) -> Error {
    Error::Render(err.to_string())
}
