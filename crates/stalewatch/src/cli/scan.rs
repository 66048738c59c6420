//! `stalewatch [PATH]` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use stalewatch::{
    Config, ConfigLayer, Finding, ScanError, Stalewatch, format_canonical,
    parse_excludes, resolve_reference_date, scan_root,
};
use tracing::debug;

use super::display;

/// Command-line inputs for a scan.
pub struct ScanOptions {
    pub path: String,
    pub today: Option<String>,
    pub exclude: Option<String>,
    pub fail_on_expired: bool,
    pub default_expiry_days: Option<u32>,
    pub date_format: Option<String>,
    pub config: Option<PathBuf>,
    pub json: bool,
}

/// What the caller needs to pick an exit code.
pub struct ScanOutcome {
    any_expired: bool,
    fail_on_expired: bool,
}

impl ScanOutcome {
    /// Whether the run should exit with the expired status.
    pub fn should_fail(&self) -> bool {
        self.fail_on_expired && self.any_expired
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    reference_date: String,
    findings: &'a [Finding],
    any_expired: bool,
    files_scanned: usize,
    errors: &'a [ScanError],
}

/// Run the scan command.
pub fn run(options: &ScanOptions) -> Result<ScanOutcome, stalewatch::Error> {
    let root = scan_root(&options.path);
    let config = load_config(options, &root)?;
    let reference = resolve_reference_date(options.today.as_deref(), &config.date_pattern)?;

    let fail_on_expired = config.fail_on_expired;
    let scanner = Stalewatch::new(config);
    let report = scanner.scan(&root)?;
    let classification = scanner.classify(&report, reference);
    let findings = classification.findings(&report.annotations);

    if options.json {
        let doc = JsonReport {
            reference_date: format_canonical(reference),
            findings: &findings,
            any_expired: classification.any_expired,
            files_scanned: report.files_scanned,
            errors: &report.errors,
        };
        let mut out = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &doc).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        for finding in &findings {
            display::print_finding(finding);
        }
        display::print_summary(&report, &classification);
    }

    Ok(ScanOutcome {
        any_expired: classification.any_expired,
        fail_on_expired,
    })
}

/// Build the run configuration from the config file and the flags.
fn load_config(options: &ScanOptions, root: &Path) -> Result<Config, stalewatch::Error> {
    let file_layer = match &options.config {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration file");
            Some(ConfigLayer::load(path)?)
        }
        None => ConfigLayer::discover(config_dir(root))?,
    };

    let flag_layer = ConfigLayer {
        date_format: options.date_format.clone(),
        default_expiry_days: options.default_expiry_days,
        exclude: options.exclude.as_deref().map(parse_excludes),
        fail_on_expired: options.fail_on_expired.then_some(true),
    };

    Config::from_layers(file_layer.into_iter().chain([flag_layer]))
}

/// Directory searched for `.stalewatch.yaml`: the root itself, or the
/// directory holding it when the root is a file.
fn config_dir(root: &Path) -> &Path {
    if root.is_file() {
        match root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    } else {
        root
    }
}
