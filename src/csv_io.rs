//! Readers for the legacy database's CSV exports.
//!
//! The export writes SQL NULL as an empty cell, `\N`, or the literal
//! `NULL`; every cell is normalized to `Option<String>` before use.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

const NULL_MARKERS: [&str; 2] = ["\\N", "NULL"];

/// Normalize a raw cell: empty cells and the export's NULL markers become
/// absent; any other value passes through unchanged.
pub fn normalize_cell(raw: &str) -> Option<String> {
    if raw.is_empty() || NULL_MARKERS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// One row of the shortcut export, after null normalization.
///
/// Headerless column order:
/// `SPACE_KEY,CUSTOM_TITLE,SPACEKEY,TITLE,HARDCODED_URL,POSITION`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRow {
    /// Space whose sidebar the shortcut belongs to.
    pub space_key: Option<String>,
    /// Display text; absent means the link target supplies its own.
    pub custom_title: Option<String>,
    /// Space of the linked page, for page-link rows.
    pub target_space_key: Option<String>,
    /// Title of the linked page, for page-link rows.
    pub target_title: Option<String>,
    /// Direct link target, for custom-URL rows.
    pub hardcoded_url: Option<String>,
}

/// One row of the template export, after null normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRow {
    pub name: Option<String>,
    pub content: Option<String>,
}

pub fn read_shortcuts(path: &Path, has_header: bool) -> Result<Vec<ShortcutRow>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open CSV file {}", path.display()))?;
    parse_shortcuts(file, has_header)
        .with_context(|| format!("failed to parse CSV file {}", path.display()))
}

pub fn parse_shortcuts<R: Read>(input: R, has_header: bool) -> Result<Vec<ShortcutRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("bad CSV record {}", index + 1))?;
        let cell = |idx: usize| normalize_cell(record.get(idx).unwrap_or(""));
        // Column 5 (POSITION) only ordered the legacy export; encounter
        // order is preserved by the grouping step instead.
        rows.push(ShortcutRow {
            space_key: cell(0),
            custom_title: cell(1),
            target_space_key: cell(2),
            target_title: cell(3),
            hardcoded_url: cell(4),
        });
    }
    Ok(rows)
}

pub fn read_templates(path: &Path, has_header: bool) -> Result<Vec<TemplateRow>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open CSV file {}", path.display()))?;
    parse_templates(file, has_header)
        .with_context(|| format!("failed to parse CSV file {}", path.display()))
}

pub fn parse_templates<R: Read>(input: R, has_header: bool) -> Result<Vec<TemplateRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("bad CSV record {}", index + 1))?;
        let cell = |idx: usize| normalize_cell(record.get(idx).unwrap_or(""));
        rows.push(TemplateRow {
            name: cell(0),
            content: cell(1),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn normalize_cell_maps_null_markers_to_absent() {
        assert_eq!(normalize_cell(""), None);
        assert_eq!(normalize_cell("\\N"), None);
        assert_eq!(normalize_cell("NULL"), None);
    }

    #[test]
    fn normalize_cell_is_identity_otherwise() {
        assert_eq!(normalize_cell("TEAM"), Some("TEAM".to_string()));
        assert_eq!(normalize_cell("null"), Some("null".to_string()));
        assert_eq!(normalize_cell(" "), Some(" ".to_string()));
        assert_eq!(normalize_cell("N"), Some("N".to_string()));
    }

    #[test]
    fn parse_shortcuts_reads_headerless_columns() {
        let data = "TEAM,Docs,\\N,NULL,https://x.com,1\nTEAM,,TEAM,Home,,2\n";
        let rows = parse_shortcuts(Cursor::new(data), false).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            ShortcutRow {
                space_key: Some("TEAM".to_string()),
                custom_title: Some("Docs".to_string()),
                target_space_key: None,
                target_title: None,
                hardcoded_url: Some("https://x.com".to_string()),
            }
        );
        assert_eq!(
            rows[1],
            ShortcutRow {
                space_key: Some("TEAM".to_string()),
                custom_title: None,
                target_space_key: Some("TEAM".to_string()),
                target_title: Some("Home".to_string()),
                hardcoded_url: None,
            }
        );
    }

    #[test]
    fn parse_shortcuts_skips_header_row_when_flagged() {
        let data = "SPACE_KEY,CUSTOM_TITLE,SPACEKEY,TITLE,HARDCODED_URL,POSITION\n\
                    TEAM,,,,https://x.com,1\n";
        let rows = parse_shortcuts(Cursor::new(data), true).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hardcoded_url, Some("https://x.com".to_string()));
    }

    #[test]
    fn parse_shortcuts_handles_quoted_cells() {
        let data = "TEAM,\"Links, useful\",TEAM,\"Team \"\"Home\"\"\",,1\n";
        let rows = parse_shortcuts(Cursor::new(data), false).unwrap();

        assert_eq!(rows[0].custom_title, Some("Links, useful".to_string()));
        assert_eq!(rows[0].target_title, Some("Team \"Home\"".to_string()));
    }

    #[test]
    fn parse_shortcuts_tolerates_short_records() {
        let rows = parse_shortcuts(Cursor::new("TEAM,Docs\n"), false).unwrap();

        assert_eq!(rows[0].space_key, Some("TEAM".to_string()));
        assert_eq!(rows[0].hardcoded_url, None);
    }

    #[test]
    fn parse_shortcuts_yields_nothing_for_empty_input() {
        assert!(parse_shortcuts(Cursor::new(""), false).unwrap().is_empty());
        assert!(parse_shortcuts(Cursor::new(""), true).unwrap().is_empty());
    }

    #[test]
    fn parse_templates_reads_name_and_content() {
        let data = "Onboarding,\"<p>Welcome</p>\"\nNULL,<p/>\n";
        let rows = parse_templates(Cursor::new(data), false).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, Some("Onboarding".to_string()));
        assert_eq!(rows[0].content, Some("<p>Welcome</p>".to_string()));
        assert_eq!(rows[1].name, None);
    }
}
