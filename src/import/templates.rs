//! Page template import. One API call per row, no grouping.

use crate::csv_io::TemplateRow;
use crate::import::ImportError;
use crate::remote::Remote;

/// Result of a template import run.
#[derive(Debug, Default)]
pub struct TemplateImportResult {
    /// Templates created successfully.
    pub created: usize,
    /// Rows dropped for missing name or content.
    pub rows_skipped: usize,
    /// Errors encountered, one per failed row.
    pub errors: Vec<ImportError>,
}

/// Template import pipeline over a [`Remote`].
pub struct TemplateImporter<'a, R: Remote> {
    remote: &'a R,
    dry_run: bool,
}

impl<'a, R: Remote> TemplateImporter<'a, R> {
    pub fn new(remote: &'a R, dry_run: bool) -> Self {
        Self { remote, dry_run }
    }

    pub fn run(&self, rows: Vec<TemplateRow>) -> TemplateImportResult {
        let mut result = TemplateImportResult::default();

        for (index, row) in rows.into_iter().enumerate() {
            let number = index + 1;

            let (Some(name), Some(content)) = (row.name, row.content) else {
                let error = ImportError::new(
                    format!("row {number}"),
                    "missing template name or content".to_string(),
                );
                eprintln!("warning: skipping {error}");
                result.rows_skipped += 1;
                result.errors.push(error);
                continue;
            };

            if self.dry_run {
                println!("dry-run: would create template \"{name}\"");
                continue;
            }

            match self.remote.create_template(&name, &content) {
                Ok(()) => {
                    println!("Created template \"{name}\".");
                    result.created += 1;
                }
                Err(err) => {
                    let error = ImportError::new(format!("row {number}"), err.to_string());
                    eprintln!("error: {error}");
                    result.errors.push(error);
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{RemoteError, ShortcutItem};
    use std::cell::RefCell;

    #[derive(Default)]
    struct StubRemote {
        failing_names: Vec<String>,
        created: RefCell<Vec<(String, String)>>,
    }

    impl Remote for StubRemote {
        fn resolve_space_id(&self, _key: &str) -> Result<String, RemoteError> {
            unreachable!("template import never resolves spaces")
        }

        fn resolve_page_url(&self, _space_id: &str, _title: &str) -> Result<String, RemoteError> {
            unreachable!("template import never resolves pages")
        }

        fn push_shortcuts(
            &self,
            _space_key: &str,
            _items: &[ShortcutItem],
        ) -> Result<(), RemoteError> {
            unreachable!("template import never pushes shortcuts")
        }

        fn create_template(&self, name: &str, content: &str) -> Result<(), RemoteError> {
            if self.failing_names.iter().any(|n| n == name) {
                return Err(RemoteError::Api {
                    context: "template creation",
                    status: 400,
                    body: "bad template".to_string(),
                });
            }
            self.created
                .borrow_mut()
                .push((name.to_string(), content.to_string()));
            Ok(())
        }
    }

    fn row(name: Option<&str>, content: Option<&str>) -> TemplateRow {
        TemplateRow {
            name: name.map(str::to_string),
            content: content.map(str::to_string),
        }
    }

    #[test]
    fn creates_one_template_per_row() {
        let remote = StubRemote::default();
        let rows = vec![
            row(Some("Onboarding"), Some("<p>Welcome</p>")),
            row(Some("Retro"), Some("<p>What went well</p>")),
        ];

        let result = TemplateImporter::new(&remote, false).run(rows);

        assert_eq!(result.created, 2);
        assert!(result.errors.is_empty());

        let created = remote.created.borrow();
        assert_eq!(
            created[0],
            ("Onboarding".to_string(), "<p>Welcome</p>".to_string())
        );
    }

    #[test]
    fn rows_missing_name_or_content_are_skipped() {
        let remote = StubRemote::default();
        let rows = vec![
            row(None, Some("<p/>")),
            row(Some("Empty"), None),
            row(Some("Good"), Some("<p/>")),
        ];

        let result = TemplateImporter::new(&remote, false).run(rows);

        assert_eq!(result.created, 1);
        assert_eq!(result.rows_skipped, 2);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].subject, "row 1");
        assert_eq!(result.errors[1].subject, "row 2");
    }

    #[test]
    fn a_failed_creation_does_not_stop_the_run() {
        let remote = StubRemote {
            failing_names: vec!["Bad".to_string()],
            ..Default::default()
        };
        let rows = vec![
            row(Some("Bad"), Some("<p/>")),
            row(Some("Good"), Some("<p/>")),
        ];

        let result = TemplateImporter::new(&remote, false).run(rows);

        assert_eq!(result.created, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("status 400"));
        assert_eq!(remote.created.borrow().len(), 1);
    }

    #[test]
    fn dry_run_creates_nothing() {
        let remote = StubRemote::default();
        let rows = vec![row(Some("Onboarding"), Some("<p/>"))];

        let result = TemplateImporter::new(&remote, true).run(rows);

        assert_eq!(result.created, 0);
        assert!(remote.created.borrow().is_empty());
    }
}
