use anyhow::{Context, Result};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

use crate::config::{ColorMode, Config};
use crate::renamer::ApplyOptions;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser, Debug)]
#[command(name = "rename")]
#[command(about = "Rename files through a sed-replace expression")]
#[command(long_about = "rename moves (or copies) files to new names computed by a sed-replace
expression applied to each file's base name. Directories are never changed.

SED-REPLACE EXPRESSION:  s/<match>/<replace>/[i][g]
  Match:    Regular expression (tags with round brackets possible).
  Replace:  Replacement, with $0: whole original and $1...: tag.
            ${1} separates a tag from following digits, $$ is a literal '$'.
  i:        Case insensitive match of regular expression.
  g:        Global: keep looking for match after first match.

  Any character may replace '/' as the delimiter (s#a#b#). A delimiter inside
  <match> or <replace> must be escaped with a backslash.

FILES:
  If none are given, file names are read from stdin, one per line.

CONFIGURATION:
  Defaults are read from ~/.rename/config.toml:
    [output]   color = \"auto\" | \"always\" | \"never\", verbose = false
    [behavior] force = false, copy = false, interactive = false
    [logging]  debug = false

EXAMPLES:
  rename 's/\\.jpeg$/.jpg/i' *.jpeg          Normalize extensions
  rename -n 's/ /_/g' *                      Preview replacing spaces
  rename -c 's/(.+)\\.txt/$1.bak/' *.txt     Make .bak copies
  find . -name '*.log' | rename 's/^/old-/'  Read file names from stdin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
struct Cli {
    /// Sed-replace expression (e.g., 's/old/new/g')
    #[arg(value_name = "EXPRESSION")]
    expression: String,

    /// Files to rename (read from stdin when omitted)
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Copy instead of move
    #[arg(short = 'c', long)]
    copy: bool,

    /// Overwrite existing files
    #[arg(short = 'f', long)]
    force: bool,

    /// Ask for confirmation before renaming
    #[arg(short = 'i', long)]
    interactive: bool,

    /// No changes, just show what would have been done
    #[arg(short = 'n', long = "noaction", aliases = ["no-action", "dry-run"])]
    no_action: bool,

    /// Show which files were renamed, if any
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Colorize the preview
    #[arg(long, value_enum, value_name = "WHEN")]
    color: Option<ColorMode>,

    /// Use an alternate configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a debug log to ~/.rename/rename.log
    #[arg(long)]
    debug: bool,
}

/// Command-line arguments, before config defaults are merged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub expression: String,
    /// Empty means: read file names from stdin
    pub files: Vec<String>,
    pub copy: bool,
    pub force: bool,
    pub interactive: bool,
    pub no_action: bool,
    pub verbose: bool,
    pub color: Option<ColorMode>,
    pub config: Option<PathBuf>,
    pub debug: bool,
}

/// Effective settings for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub apply: ApplyOptions,
    pub interactive: bool,
    pub no_action: bool,
    pub verbose: bool,
    pub color: ColorMode,
    pub debug: bool,
}

impl Args {
    /// Combine flags with config defaults; a flag can only switch a setting on
    pub fn settings(&self, config: &Config) -> Result<Settings> {
        let color = match self.color {
            Some(color) => color,
            None => config.output.color_mode()?,
        };

        Ok(Settings {
            apply: ApplyOptions {
                force: self.force || config.behavior.force,
                copy: self.copy || config.behavior.copy,
            },
            interactive: self.interactive || config.behavior.interactive,
            no_action: self.no_action,
            verbose: self.verbose || config.output.verbose,
            color,
            debug: self.debug || config.logging.debug,
        })
    }
}

impl Settings {
    /// Whether planned renames are printed before anything happens
    pub fn show_preview(&self) -> bool {
        self.interactive || self.verbose || self.no_action
    }
}

pub fn parse_args() -> Args {
    Args::from_cli(Cli::parse())
}

pub fn try_parse_args_from<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map(Args::from_cli)
}

impl Args {
    fn from_cli(cli: Cli) -> Self {
        Args {
            expression: cli.expression,
            files: cli.files,
            copy: cli.copy,
            force: cli.force,
            interactive: cli.interactive,
            no_action: cli.no_action,
            verbose: cli.verbose,
            color: cli.color,
            config: cli.config,
            debug: cli.debug,
        }
    }
}

/// Read file names, one per line, skipping empty lines
pub fn read_file_list<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read file names from stdin")?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if !line.is_empty() {
            files.push(line.to_string());
        }
    }
    Ok(files)
}
