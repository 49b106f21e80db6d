use crate::core::normalizer::normalize_row;
use crate::domain::model::{CanonicalField, Lead, RawRow};
use crate::domain::ports::IdGenerator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
        }
    }
}

/// Normalized header text (lowercase, no whitespace) to canonical field.
pub const HEADER_ALIASES: &[(&str, CanonicalField)] = &[
    ("name", CanonicalField::Name),
    ("fullname", CanonicalField::Name),
    ("position", CanonicalField::Position),
    ("title", CanonicalField::Position),
    ("email", CanonicalField::Email),
    ("mail", CanonicalField::Email),
    ("phone", CanonicalField::Phone),
    ("telephone", CanonicalField::Phone),
    ("company", CanonicalField::Company),
    ("organization", CanonicalField::Company),
    ("industry", CanonicalField::Industry),
    ("sector", CanonicalField::Industry),
    ("size", CanonicalField::Size),
    ("headcount", CanonicalField::Size),
    ("location", CanonicalField::Location),
    ("city", CanonicalField::City),
    ("country", CanonicalField::Country),
    ("rating", CanonicalField::Rating),
    ("reviews", CanonicalField::Reviews),
    ("typebusiness", CanonicalField::TypeBusiness),
    ("typebussiness", CanonicalField::TypeBusiness),
    ("type_business", CanonicalField::TypeBusiness),
    ("type_bussiness", CanonicalField::TypeBusiness),
    ("address", CanonicalField::Address),
    ("linkedin", CanonicalField::Linkedin),
    ("linkedinurl", CanonicalField::Linkedin),
    ("website", CanonicalField::Website),
    ("url", CanonicalField::Website),
];

/// Parses a whole CSV document into leads, one per non-blank data line.
///
/// Malformed rows are never rejected: missing cells fall back to defaults
/// and columns with unknown headers are dropped.
pub fn parse_csv(content: &str, ids: &dyn IdGenerator) -> Vec<Lead> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((header_line, rows)) = lines.split_first() else {
        return Vec::new();
    };

    let delimiter = detect_delimiter(header_line);
    let header_fields = map_headers(header_line, delimiter);

    tracing::debug!(
        "CSV header has {} columns ({} mapped), delimiter {:?}, {} data rows",
        header_fields.len(),
        header_fields.iter().filter(|f| f.is_some()).count(),
        delimiter,
        rows.len()
    );

    rows.iter()
        .enumerate()
        .map(|(row_index, line)| {
            let raw = build_raw_row(&split_line(line, delimiter), &header_fields);
            normalize_row(&raw, row_index, ids)
        })
        .collect()
}

/// Semicolon wins only when it strictly outnumbers commas.
pub fn detect_delimiter(header_line: &str) -> Delimiter {
    let commas = header_line.matches(',').count();
    let semicolons = header_line.matches(';').count();
    if semicolons > commas {
        Delimiter::Semicolon
    } else {
        Delimiter::Comma
    }
}

/// Splits one line into fields. `""` inside quotes is a literal quote;
/// unbalanced quotes are tolerated and the buffered text is emitted.
pub fn split_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    let separator = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if inside_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                inside_quotes = !inside_quotes;
            }
            continue;
        }

        if ch == separator && !inside_quotes {
            fields.push(std::mem::take(&mut current));
            continue;
        }

        current.push(ch);
    }

    fields.push(current);
    fields
}

/// Resolves each header cell to a canonical field, `None` for unknown columns.
pub fn map_headers(header_line: &str, delimiter: Delimiter) -> Vec<Option<CanonicalField>> {
    split_line(header_line, delimiter)
        .iter()
        .map(|raw| resolve_header(raw))
        .collect()
}

pub fn resolve_header(raw: &str) -> Option<CanonicalField> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, field)| *field)
}

/// Surplus cells past the header width are ignored. A later column mapped
/// to the same field overwrites an earlier one.
fn build_raw_row(cells: &[String], header_fields: &[Option<CanonicalField>]) -> RawRow {
    let mut raw = RawRow::new();
    for (cell, field) in cells.iter().zip(header_fields) {
        if let Some(field) = field {
            raw.insert(*field, cell.trim().to_string());
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::id_gen::SequentialIdGenerator;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("name,email"), Delimiter::Comma);
        assert_eq!(detect_delimiter("Name;Email"), Delimiter::Semicolon);
        assert_eq!(detect_delimiter("a;b,c"), Delimiter::Comma);
        assert_eq!(detect_delimiter("single"), Delimiter::Comma);
    }

    #[test]
    fn test_split_line_plain_and_quoted() {
        assert_eq!(
            split_line(r#""Jane Doe","jane@x.com""#, Delimiter::Comma),
            vec!["Jane Doe", "jane@x.com"]
        );
        assert_eq!(
            split_line(r#""Smith, Inc";smith@x.com"#, Delimiter::Semicolon),
            vec!["Smith, Inc", "smith@x.com"]
        );
        assert_eq!(split_line("a,,c,", Delimiter::Comma), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_split_line_escaped_quote() {
        assert_eq!(
            split_line(r#""She said ""hi""""#, Delimiter::Comma),
            vec![r#"She said "hi""#]
        );
    }

    #[test]
    fn test_split_line_delimiter_inside_quotes_is_literal() {
        assert_eq!(
            split_line(r#""a;b",c"#, Delimiter::Comma),
            vec!["a;b", "c"]
        );
        assert_eq!(
            split_line(r#"x;"1,2;3""#, Delimiter::Semicolon),
            vec!["x", "1,2;3"]
        );
    }

    #[test]
    fn test_split_line_unbalanced_quote_is_best_effort() {
        assert_eq!(
            split_line(r#"a,"unterminated, rest"#, Delimiter::Comma),
            vec!["a", "unterminated, rest"]
        );
    }

    #[test]
    fn test_split_line_empty_line_yields_one_field() {
        assert_eq!(split_line("", Delimiter::Comma), vec![""]);
    }

    #[test]
    fn test_map_headers_with_aliases_and_unknowns() {
        let fields = map_headers(
            "Full Name, E-Mail ,Mail,Organization,Head Count,Type Bussiness,URL,Favourite Color",
            Delimiter::Comma,
        );
        assert_eq!(
            fields,
            vec![
                Some(CanonicalField::Name),
                None,
                Some(CanonicalField::Email),
                Some(CanonicalField::Company),
                Some(CanonicalField::Size),
                Some(CanonicalField::TypeBusiness),
                Some(CanonicalField::Website),
                None,
            ]
        );
    }

    #[test]
    fn test_parse_csv_empty_inputs() {
        let ids = SequentialIdGenerator::default();
        assert!(parse_csv("", &ids).is_empty());
        assert!(parse_csv("   \n\r\n  ", &ids).is_empty());
        assert!(parse_csv("name,email\n", &ids).is_empty());
    }

    #[test]
    fn test_parse_csv_semicolon_file() {
        let ids = SequentialIdGenerator::default();
        let leads = parse_csv("Name;Email\r\n\"Smith, Inc\";smith@x.com\r\n", &ids);
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Smith, Inc");
        assert_eq!(leads[0].email, "smith@x.com");
    }

    #[test]
    fn test_parse_csv_skips_blank_lines_and_keeps_order() {
        let ids = SequentialIdGenerator::default();
        let content = "name,company\nAlpha,A Corp\n\n   \nBeta,B Corp\nGamma,C Corp\n";
        let names: Vec<String> = parse_csv(content, &ids)
            .into_iter()
            .map(|lead| lead.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_parse_csv_drops_unknown_and_surplus_columns() {
        let ids = SequentialIdGenerator::default();
        let leads = parse_csv("name,secret\nAlice,hunter2,extra,cells\n", &ids);
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Alice");
        let json = serde_json::to_string(&leads[0]).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("extra"));
    }

    #[test]
    fn test_parse_csv_later_duplicate_column_wins() {
        let ids = SequentialIdGenerator::default();
        let leads = parse_csv("email,mail\nfirst@x.com,second@x.com\n", &ids);
        assert_eq!(leads[0].email, "second@x.com");
    }
}
