//! Space shortcut import.
//!
//! Rows are grouped by container space key, each row is resolved into a
//! shortcut item, and every space's sidebar shortcut list is overwritten
//! in one batch call. Grouping is explicit, so the export does not need
//! to arrive sorted by space key.

use anyhow::{bail, Result};
use indexmap::IndexMap;

use crate::csv_io::ShortcutRow;
use crate::import::ImportError;
use crate::remote::{Remote, ShortcutItem};

/// Result of a shortcut import run.
#[derive(Debug, Default)]
pub struct ShortcutImportResult {
    /// Space groups submitted successfully.
    pub groups_submitted: usize,
    /// Shortcut links contained in those groups.
    pub links_submitted: usize,
    /// Rows dropped because they could not be resolved.
    pub rows_skipped: usize,
    /// Errors encountered, one per failed row or group.
    pub errors: Vec<ImportError>,
}

/// Group rows by container space key, preserving first-seen key order and
/// row order within each group. Rows without a space key belong to no
/// group; their 1-based row numbers are returned separately.
pub fn group_by_space(
    rows: Vec<ShortcutRow>,
) -> (IndexMap<String, Vec<(usize, ShortcutRow)>>, Vec<usize>) {
    let mut groups: IndexMap<String, Vec<(usize, ShortcutRow)>> = IndexMap::new();
    let mut orphans = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let number = index + 1;
        match row.space_key.clone() {
            Some(key) => groups.entry(key).or_default().push((number, row)),
            None => orphans.push(number),
        }
    }

    (groups, orphans)
}

/// Build the shortcut item for one row.
///
/// Direct-URL rows need no lookups; page-link rows resolve the target
/// space id and then the page's web URL.
fn build_item<R: Remote>(remote: &R, row: &ShortcutRow) -> Result<ShortcutItem> {
    if let Some(url) = &row.hardcoded_url {
        return Ok(ShortcutItem {
            title: row.custom_title.clone(),
            url: url.clone(),
            id: None,
        });
    }

    let (Some(target_space), Some(title)) = (&row.target_space_key, &row.target_title) else {
        bail!("row carries neither a hardcoded URL nor a target page reference");
    };

    let space_id = remote.resolve_space_id(target_space)?;
    let url = remote.resolve_page_url(&space_id, title)?;

    Ok(ShortcutItem {
        title: row.custom_title.clone(),
        url,
        id: None,
    })
}

/// Shortcut import pipeline over a [`Remote`].
pub struct ShortcutImporter<'a, R: Remote> {
    remote: &'a R,
    dry_run: bool,
}

impl<'a, R: Remote> ShortcutImporter<'a, R> {
    pub fn new(remote: &'a R, dry_run: bool) -> Self {
        Self { remote, dry_run }
    }

    pub fn run(&self, rows: Vec<ShortcutRow>) -> ShortcutImportResult {
        let mut result = ShortcutImportResult::default();
        let (groups, orphans) = group_by_space(rows);

        for number in orphans {
            let error = ImportError::new(
                format!("row {number}"),
                "missing container space key".to_string(),
            );
            eprintln!("warning: skipping {error}");
            result.rows_skipped += 1;
            result.errors.push(error);
        }

        for (space_key, group_rows) in groups {
            let mut items = Vec::new();
            for (number, row) in &group_rows {
                match build_item(self.remote, row) {
                    Ok(item) => items.push(item),
                    Err(err) => {
                        let error = ImportError::new(format!("row {number}"), format!("{err:#}"));
                        eprintln!("warning: skipping {error}");
                        result.rows_skipped += 1;
                        result.errors.push(error);
                    }
                }
            }

            if self.dry_run {
                println!(
                    "dry-run: would set {} shortcut(s) on space {space_key}:",
                    items.len()
                );
                for item in &items {
                    match &item.title {
                        Some(title) => println!("  {title} -> {}", item.url),
                        None => println!("  {}", item.url),
                    }
                }
                continue;
            }

            match self.remote.push_shortcuts(&space_key, &items) {
                Ok(()) => {
                    println!("Set {} shortcut(s) on space {space_key}.", items.len());
                    result.groups_submitted += 1;
                    result.links_submitted += items.len();
                }
                Err(err) => {
                    let error = ImportError::new(format!("space {space_key}"), err.to_string());
                    eprintln!("error: {error}");
                    result.errors.push(error);
                }
            }
        }

        result
    }
}
