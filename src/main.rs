//! bin-bundler - minify, fingerprint and rewrite the local assets of a built static site.

mod asset;
mod cli;
mod config;
mod error;
mod image;
mod logger;
mod page;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, bundle::bundle};
use config::BundleConfig;
use error::BundleError;
use utils::plural_count;

fn main() {
    // Usage errors exit with 1 (clap defaults to 2); help and version exit with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print().ok();
            std::process::exit(code);
        }
    };

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Err(e) = run(&cli) {
        log!("error"; "{:#}", e);
        if e.downcast_ref::<BundleError>().is_some_and(BundleError::is_usage) {
            log!("error"; "run with --help for usage");
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = BundleConfig::load(cli).context("failed to load configuration")?;
    logger::set_verbose(config.verbose);

    let report = bundle(&config, &asset::Minifier)?;

    log!(
        "bundle";
        "bundled {} across {} ({} rewritten)",
        plural_count(report.assets.total(), "asset"),
        plural_count(report.documents, "HTML file"),
        report.written
    );
    Ok(())
}
