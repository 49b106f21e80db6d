use crate::domain::model::{CanonicalField, Lead, LeadLinks, RawRow};
use crate::domain::ports::IdGenerator;

pub const DEFAULT_COMPANY: &str = "Unknown Company";
pub const DEFAULT_POSITION: &str = "Business Owner";
pub const DEFAULT_PHONE: &str = "+62 812-0000-0000";
pub const PLACEHOLDER: &str = "-";

const ID_BASE_MAX_LEN: usize = 12;

/// Turns one raw CSV row into a fully populated lead.
///
/// `row_index` is the 0-based position among data rows; fallback names and
/// emails use `row_index + 1`.
pub fn normalize_row(raw: &RawRow, row_index: usize, ids: &dyn IdGenerator) -> Lead {
    let row_number = row_index + 1;
    let text = |field: CanonicalField| {
        raw.get(&field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    };

    let name = text(CanonicalField::Name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown Lead {}", row_number));
    let email_cell = text(CanonicalField::Email);
    let seed = email_cell
        .map(|email| email.to_lowercase())
        .unwrap_or_else(|| name.clone());

    let company_cell = text(CanonicalField::Company);
    let city = text(CanonicalField::City);
    let country = text(CanonicalField::Country);
    let location = text(CanonicalField::Location)
        .map(str::to_string)
        .or_else(|| compose_location(city, country))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    Lead {
        id: build_identifier(&seed, ids),
        position: or_default(text(CanonicalField::Position), DEFAULT_POSITION),
        email: email_cell
            .map(str::to_string)
            .unwrap_or_else(|| format!("unknown{}@example.com", row_number)),
        phone: or_default(text(CanonicalField::Phone), DEFAULT_PHONE),
        company: or_default(company_cell, DEFAULT_COMPANY),
        address: or_default(text(CanonicalField::Address).or(company_cell), PLACEHOLDER),
        industry: or_default(text(CanonicalField::Industry), PLACEHOLDER),
        size: or_default(text(CanonicalField::Size), PLACEHOLDER),
        location,
        city: or_default(city, PLACEHOLDER),
        country: or_default(country, PLACEHOLDER),
        rating: text(CanonicalField::Rating).and_then(|v| v.parse::<f64>().ok()),
        reviews: text(CanonicalField::Reviews).and_then(parse_count),
        type_business: or_default(text(CanonicalField::TypeBusiness), PLACEHOLDER),
        links: LeadLinks {
            linkedin: clean_link(raw.get(&CanonicalField::Linkedin).map(String::as_str)),
            website: clean_link(raw.get(&CanonicalField::Website).map(String::as_str)),
        },
        name,
    }
}

/// Trims a link, drops blank or literal `null` values, and prefixes
/// `https://` when no http(s) scheme is present.
pub fn clean_link(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

/// `{base}-{suffix}` where base is the seed's first 12 ASCII alphanumerics.
pub fn build_identifier(seed: &str, ids: &dyn IdGenerator) -> String {
    let base: String = seed
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(ID_BASE_MAX_LEN)
        .collect();
    let base = if base.is_empty() { "lead" } else { base.as_str() };
    format!("{}-{}", base, ids.next_id())
}

pub(crate) fn compose_location(city: Option<&str>, country: Option<&str>) -> Option<String> {
    match (city, country) {
        (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
        (Some(part), None) | (None, Some(part)) => Some(part.to_string()),
        (None, None) => None,
    }
}

/// Whole, non-negative numbers only; `"120.0"` counts, `"12.5"` does not.
fn parse_count(value: &str) -> Option<u64> {
    let number = value.parse::<f64>().ok()?;
    (number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= u64::MAX as f64)
        .then_some(number as u64)
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value.unwrap_or(default).to_string()
}
