//! filedrop-check: run the upload validator over local files.
//!
//! Applies the same size and type rules as the browser widget, so a
//! batch of files can be checked before anyone drags it onto the page.
//! The MIME type of each file is guessed from its extension.
//!
//! # Usage
//!
//! ```text
//! cargo run --bin filedrop-check -- [--max-size-mb N] [--allow TYPE]... [--json] <PATH>...
//! ```
//!
//! Exits with status 1 when any file is rejected or cannot be read.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use filedrop_core::{SelectedFile, UploadConfig, format_file_size, guess_mime_type};
use serde::Serialize;

/// Check files against the filedrop upload constraints.
#[derive(Parser)]
#[command(name = "filedrop-check", version)]
struct Cli {
    /// Files to check.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Maximum file size in megabytes.
    #[arg(long, default_value_t = UploadConfig::DEFAULT_MAX_SIZE_MB)]
    max_size_mb: f64,

    /// Allowed MIME type; repeat for several.
    ///
    /// Defaults to the widget's built-in list when omitted.
    #[arg(long = "allow", value_name = "TYPE")]
    allowed_types: Vec<String>,

    /// Print a JSON array instead of the human-readable report.
    #[arg(long)]
    json: bool,
}

/// Outcome for a single file.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct FileReport {
    path: String,
    size: Option<u64>,
    #[serde(rename = "type")]
    mime_type: String,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    warnings: Vec<String>,
}

/// Build the validator configuration from the command line.
fn config_from_cli(cli: &Cli) -> Result<UploadConfig, String> {
    let mut config = UploadConfig::default();
    config
        .set_max_size_mb(cli.max_size_mb)
        .map_err(|e| format!("--max-size-mb: {e}"))?;
    if !cli.allowed_types.is_empty() {
        config.allowed_types.clear();
        for mime in &cli.allowed_types {
            config
                .allow_type(mime)
                .map_err(|e| format!("--allow: {e}"))?;
        }
    }
    Ok(config)
}

/// Validate a file described by name, size and type.
fn check_entry(path: &Path, size: u64, config: &UploadConfig) -> FileReport {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mime_type = guess_mime_type(&path.to_string_lossy());
    let file = SelectedFile::new(name, size, mime_type.clone());

    let (accepted, error, warnings) = match config.validate(&file) {
        Ok(warnings) => (true, None, warnings.iter().map(ToString::to_string).collect()),
        Err(e) => (false, Some(e.to_string()), Vec::new()),
    };

    FileReport {
        path: path.display().to_string(),
        size: Some(size),
        mime_type,
        accepted,
        error,
        warnings,
    }
}

/// Stat and validate a file on disk.
fn check_path(path: &Path, config: &UploadConfig) -> FileReport {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => check_entry(path, meta.len(), config),
        Ok(_) => unreadable(path, "not a regular file".to_owned()),
        Err(e) => unreadable(path, e.to_string()),
    }
}

fn unreadable(path: &Path, reason: String) -> FileReport {
    FileReport {
        path: path.display().to_string(),
        size: None,
        mime_type: guess_mime_type(&path.to_string_lossy()),
        accepted: false,
        error: Some(format!("cannot read file: {reason}")),
        warnings: Vec::new(),
    }
}

/// Human-readable block for one file.
fn render(report: &FileReport) -> String {
    let mut out = String::new();
    let size = report.size.map_or_else(|| "?".to_owned(), format_file_size);
    let mime = if report.mime_type.is_empty() {
        "unknown type"
    } else {
        &report.mime_type
    };
    let _ = writeln!(out, "{} ({size}, {mime})", report.path);
    match report.error {
        None => {
            let _ = writeln!(out, "  accepted");
        }
        Some(ref err) => {
            let _ = writeln!(out, "  rejected: {err}");
        }
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "  warning: {warning}");
    }
    out
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let reports: Vec<FileReport> = cli.paths.iter().map(|p| check_path(p, &config)).collect();

    if cli.json {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for report in &reports {
            print!("{}", render(report));
        }
        let rejected = reports.iter().filter(|r| !r.accepted).count();
        eprintln!("{} checked, {rejected} rejected", reports.len());
    }

    if reports.iter().all(|r| r.accepted) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("filedrop-check").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_widget() {
        let config = config_from_cli(&cli(&["a.png"])).unwrap();
        assert_eq!(config, UploadConfig::default());
    }

    #[test]
    fn allow_flags_replace_the_default_list() {
        let args = ["--allow", "Text/CSV ", "--allow", "text/csv", "a.csv"];
        let config = config_from_cli(&cli(&args)).unwrap();
        assert_eq!(config.allowed_types, vec!["text/csv".to_owned()]);
    }

    #[test]
    fn invalid_limit_is_reported() {
        let err = config_from_cli(&cli(&["--max-size-mb", "0", "a.png"])).unwrap_err();
        assert!(err.starts_with("--max-size-mb"), "{err}");
    }

    #[test]
    fn paths_are_required() {
        assert!(Cli::try_parse_from(["filedrop-check"]).is_err());
    }

    #[test]
    fn oversized_png_is_rejected() {
        let config = UploadConfig {
            max_size_mb: 1.0,
            ..UploadConfig::default()
        };
        let report = check_entry(Path::new("shots/big.png"), 2 * 1024 * 1024, &config);
        assert!(!report.accepted);
        assert_eq!(report.mime_type, "image/png");
        assert_eq!(report.error.as_deref(), Some("File size exceeds the 1 MB limit"));
    }

    #[test]
    fn accepted_file_carries_warnings() {
        let config = UploadConfig {
            max_size_mb: 1.0,
            ..UploadConfig::default()
        };
        let report = check_entry(Path::new("notes.txt"), 900 * 1024, &config);
        assert!(report.accepted);
        assert_eq!(report.warnings.len(), 1);
        assert!(render(&report).contains("  accepted\n  warning: "));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let report = check_path(Path::new("/definitely/not/here.pdf"), &UploadConfig::default());
        assert!(!report.accepted);
        assert_eq!(report.size, None);
        assert!(report.error.unwrap().starts_with("cannot read file"));
    }

    #[test]
    fn json_uses_type_key() {
        let report = check_entry(Path::new("a.pdf"), 10, &UploadConfig::default());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["type"], "application/pdf");
        assert!(value.get("error").is_none());
    }
}
