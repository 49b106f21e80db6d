use crate::domain::model::Lead;
use crate::utils::error::{AppError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const EXPORT_FILENAME: &str = "leads.csv";

const EXPORT_HEADER: [&str; 10] = [
    "Name", "Position", "Email", "Phone", "Company", "Industry", "Size", "Location", "LinkedIn",
    "Website",
];

/// Re-serializes leads for download. Every data value is quoted with inner
/// quotes doubled; the header stays bare. Returns `None` for an empty list.
pub fn export_csv<'a, I>(leads: I) -> Result<Option<String>>
where
    I: IntoIterator<Item = &'a Lead>,
{
    let mut leads = leads.into_iter().peekable();
    if leads.peek().is_none() {
        return Ok(None);
    }

    let mut output = EXPORT_HEADER.join(",");

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for lead in leads {
        writer.write_record([
            lead.name.as_str(),
            lead.position.as_str(),
            lead.email.as_str(),
            lead.phone.as_str(),
            lead.company.as_str(),
            lead.industry.as_str(),
            lead.size.as_str(),
            lead.location.as_str(),
            lead.links.linkedin.as_deref().unwrap_or(""),
            lead.links.website.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::IoError(e.into_error()))?;
    let rows = String::from_utf8(bytes).map_err(|_| AppError::InvalidFileContent)?;

    output.push('\n');
    output.push_str(rows.trim_end_matches('\n'));
    Ok(Some(output))
}
