//! CSV primitives
//!
//! Semicolon-delimited, Excel-friendly output: UTF-8 BOM, fields quoted
//! only when they contain the delimiter, a quote or a line break, quotes
//! escaped by doubling. Amounts use a space as thousands separator and no
//! decimals; dates render as `dd/mm/YYYY`.

use chrono::{NaiveDate, TimeZone, Utc};

/// UTF-8 byte order mark so Excel picks up the encoding.
pub const UTF8_BOM: &str = "\u{feff}";

pub const DELIMITER: char = ';';

/// Quote a single field when needed.
pub fn field(value: &str) -> String {
    if value.contains(DELIMITER) || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render one row, delimiter-joined with a trailing newline.
pub fn row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut out = String::new();
    for (i, f) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(&field(f.as_ref()));
    }
    out.push('\n');
    out
}

/// Empty line between the data block and the summary block.
pub fn blank_row() -> String {
    "\n".to_string()
}

/// Amount with space thousands separators and no decimals (e.g. FCFA).
pub fn format_montant(value: f64) -> String {
    let rounded = value.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `YYYY-MM-DD` → `dd/mm/YYYY`; empty on missing or unparsable input.
pub fn format_date(value: &str) -> String {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Millisecond timestamp → `dd/mm/YYYY HH:MM`.
pub fn format_datetime(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_default()
}

/// Uppercase the first character (role/status labels).
pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_quotes_only_when_needed() {
        assert_eq!(field("Awa Diop"), "Awa Diop");
        assert_eq!(field("a;b"), "\"a;b\"");
        assert_eq!(field("dit \"pape\""), "\"dit \"\"pape\"\"\"");
        assert_eq!(field("ligne\nsuite"), "\"ligne\nsuite\"");
    }

    #[test]
    fn row_joins_with_semicolons() {
        assert_eq!(row(&["a", "b;c", ""]), "a;\"b;c\";\n");
    }

    #[test]
    fn montant_groups_thousands_with_spaces() {
        assert_eq!(format_montant(0.0), "0");
        assert_eq!(format_montant(950.0), "950");
        assert_eq!(format_montant(1500.0), "1 500");
        assert_eq!(format_montant(1_234_567.0), "1 234 567");
        assert_eq!(format_montant(-25_000.0), "-25 000");
        // Rounds, never truncates.
        assert_eq!(format_montant(999.6), "1 000");
    }

    #[test]
    fn date_renders_french_order() {
        assert_eq!(format_date("2026-08-30"), "30/08/2026");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("pas-une-date"), "");
    }

    #[test]
    fn ucfirst_capitalizes() {
        assert_eq!(ucfirst("membre"), "Membre");
        assert_eq!(ucfirst(""), "");
    }
}
