mod config;
mod csv_io;
mod import;
mod remote;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use config::Config;
use import::shortcuts::ShortcutImporter;
use import::templates::TemplateImporter;
use remote::confluence::ConfluenceRemote;

#[derive(Parser, Debug)]
#[command(name = "confluence-migrate")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set per-space sidebar shortcuts from a legacy export.
    /// Overwrites each listed space's existing shortcuts.
    Shortcuts(ImportArgs),
    /// Create page templates from a legacy export
    Templates(ImportArgs),
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Treat the first CSV row as a header and skip it
    #[arg(long, default_value_t = false)]
    has_header: bool,

    /// Resolve and report without issuing any writes
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// TOML config file with domain/email/token
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cloud site domain, e.g. example.atlassian.net
    #[arg(long)]
    domain: Option<String>,

    /// Account email for Basic auth
    #[arg(long)]
    email: Option<String>,

    /// API token paired with the email
    #[arg(long)]
    token: Option<String>,

    #[arg(value_name = "CSV")]
    input: PathBuf,
}

impl ImportArgs {
    fn resolve_config(&self) -> Result<Config> {
        Config::resolve(
            self.config.as_deref(),
            self.domain.clone(),
            self.email.clone(),
            self.token.clone(),
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Shortcuts(args) => handle_shortcuts(args),
        Command::Templates(args) => handle_templates(args),
    }
}

fn handle_shortcuts(args: ImportArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let rows = csv_io::read_shortcuts(&args.input, args.has_header)?;
    let remote = ConfluenceRemote::new(&config)?;

    let result = ShortcutImporter::new(&remote, args.dry_run).run(rows);

    if args.dry_run {
        println!("Dry run: no changes were made.");
    } else {
        println!(
            "Submitted {} space group(s) with {} shortcut(s).",
            result.groups_submitted, result.links_submitted
        );
    }
    if result.rows_skipped > 0 {
        println!("Skipped {} row(s) that could not be resolved.", result.rows_skipped);
    }
    if !result.errors.is_empty() {
        println!("Encountered {} error(s); see messages above.", result.errors.len());
    }

    // Partial failures are reported above; only startup errors change the
    // exit code.
    Ok(())
}

fn handle_templates(args: ImportArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let rows = csv_io::read_templates(&args.input, args.has_header)?;
    let remote = ConfluenceRemote::new(&config)?;

    let result = TemplateImporter::new(&remote, args.dry_run).run(rows);

    if args.dry_run {
        println!("Dry run: no changes were made.");
    } else {
        println!("Created {} template(s).", result.created);
    }
    if result.rows_skipped > 0 {
        println!("Skipped {} row(s) with missing fields.", result.rows_skipped);
    }
    if !result.errors.is_empty() {
        println!("Encountered {} error(s); see messages above.", result.errors.len());
    }

    Ok(())
}
