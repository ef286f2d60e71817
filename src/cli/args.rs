//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Minify, fingerprint and rewrite the local assets of a built static site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Directory holding the assets referenced by the HTML files
    #[arg(value_name = "ASSET_DIR", value_hint = clap::ValueHint::DirPath)]
    pub asset_dir: PathBuf,

    /// Glob pattern selecting the HTML files to process (e.g. "public/**/*.html")
    #[arg(value_name = "HTML_GLOB")]
    pub html_glob: String,

    /// Gzip compression level (1-9), 0 means disabled [default: 0]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub gzip: Option<u32>,

    /// Minify and optimize inline SVGs [default: true]
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub svgo: Option<bool>,

    /// Config file supplying defaults for gzip, svgo and verbose
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
