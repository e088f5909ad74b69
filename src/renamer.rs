//! Batch rename orchestration
//!
//! Applies an [`Engine`] to the base name of every input path, checks the
//! batch for conflicting destinations, previews, confirms, and finally moves
//! or copies the files.

use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

use crate::cli::Settings;
use crate::engine::Engine;
use crate::error_helpers;
use crate::highlight::HighlightFormatter;

/// A planned move or copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromTo {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl FromTo {
    /// Source and destination are the same path
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Overwrite existing destinations
    pub force: bool,
    /// Copy instead of move
    pub copy: bool,
}

/// Outcome counts of [`apply_renames`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub renamed: usize,
    pub copied: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Split a path into its directory and base name
fn split_path(path: &Path) -> Result<(&Path, &str)> {
    let name = path
        .file_name()
        .with_context(|| format!("'{}' has no file name to rename", path.display()))?;
    let name = name
        .to_str()
        .with_context(|| format!("'{}' is not valid UTF-8", path.display()))?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok((dir, name))
}

/// `path` without `.` components, so `./a.txt` and `a.txt` compare equal
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Compute the destination of every file.
///
/// Only the base name is substituted; the directory is kept. Fails before
/// anything is touched when two files would end up at the same destination.
pub fn plan_renames<S: AsRef<str>>(engine: &Engine, files: &[S]) -> Result<Vec<FromTo>> {
    let mut destinations: HashSet<PathBuf> = HashSet::with_capacity(files.len());
    let mut replacements = Vec::with_capacity(files.len());

    for file in files {
        let from = PathBuf::from(file.as_ref());
        let (dir, name) = split_path(&from)?;
        let to = dir.join(engine.run(name));

        if !destinations.insert(without_cur_dir(&to)) {
            bail!(
                "Conflicting rename pattern, multiple files will be renamed to the same destination '{}'",
                to.display()
            );
        }

        debug!(from = %from.display(), to = %to.display(), "planned");
        replacements.push(FromTo { from, to });
    }

    Ok(replacements)
}

/// Preview line for one pair, or None when the file keeps its name
pub fn preview_line(
    engine: &Engine,
    formatter: &HighlightFormatter,
    fromto: &FromTo,
) -> Result<Option<String>> {
    let (dir, name) = split_path(&fromto.from)?;
    let (from, to) = engine.highlight(name, formatter);
    if from == to {
        return Ok(None);
    }

    let line = if dir.as_os_str().is_empty() {
        format!("{}\t-> {}", from, to)
    } else {
        let dir = dir.display();
        format!("{}/{}\t-> {}/{}", dir, from, dir, to)
    };
    Ok(Some(line))
}

/// Write a preview line for every pair that changes
pub fn print_renames<W: Write>(
    out: &mut W,
    engine: &Engine,
    formatter: &HighlightFormatter,
    replacements: &[FromTo],
) -> Result<()> {
    for fromto in replacements {
        if let Some(line) = preview_line(engine, formatter, fromto)? {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Ask a yes/no question; only "y" or "yes" confirms
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Plan, preview, confirm and apply one batch.
///
/// The preview goes to `output` when `settings` asks for one. In no-action
/// mode, or when the confirmation is declined, nothing is touched and an
/// empty report is returned.
pub fn execute<S, R, W>(
    engine: &Engine,
    files: &[S],
    settings: &Settings,
    input: &mut R,
    output: &mut W,
) -> Result<ApplyReport>
where
    S: AsRef<str>,
    R: BufRead,
    W: Write,
{
    let replacements = plan_renames(engine, files)?;

    if settings.show_preview() {
        let formatter = HighlightFormatter::detect(settings.color);
        print_renames(output, engine, &formatter, &replacements)?;
        output.flush()?;
    }

    if settings.no_action {
        debug!(planned = replacements.len(), "no action requested");
        return Ok(ApplyReport::default());
    }

    if settings.interactive && !confirm(input, output, "Continue?")? {
        writeln!(output, "No files renamed.")?;
        return Ok(ApplyReport::default());
    }

    Ok(apply_renames(&replacements, settings.apply))
}

/// Move or copy every pair.
///
/// Existing destinations are left alone unless `force` is set. A failure on
/// one file is reported and counted, and the rest of the batch still runs.
pub fn apply_renames(replacements: &[FromTo], options: ApplyOptions) -> ApplyReport {
    let mut report = ApplyReport::default();

    for fromto in replacements {
        if fromto.is_noop() {
            report.unchanged += 1;
            continue;
        }

        if !options.force && fromto.to.symlink_metadata().is_ok() {
            println!("Not overwriting file: '{}'", fromto.to.display());
            warn!(to = %fromto.to.display(), "destination exists, not overwriting");
            report.skipped += 1;
            continue;
        }

        let result = if options.copy {
            fs::copy(&fromto.from, &fromto.to).map(|_| ())
        } else {
            fs::rename(&fromto.from, &fromto.to)
        };

        match result {
            Ok(()) => {
                if options.copy {
                    info!(from = %fromto.from.display(), to = %fromto.to.display(), "copied");
                    report.copied += 1;
                } else {
                    info!(from = %fromto.from.display(), to = %fromto.to.display(), "renamed");
                    report.renamed += 1;
                }
            }
            Err(err) => {
                let message =
                    error_helpers::file_operation_error(&fromto.from, &fromto.to, options.copy, &err);
                eprintln!("{}", message);
                warn!(from = %fromto.from.display(), error = %err, "file operation failed");
                report.failed += 1;
            }
        }
    }

    report
}
