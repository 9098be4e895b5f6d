//! Core library entry for the `ndvi-change` CLI.
//!
//! Compares Landsat 8 NDVI composites of two years over a fixed region in
//! northern Colombia. All raster work runs on Earth Engine; this crate builds
//! the request graphs, renders the resulting tiles into a Leaflet page, and
//! submits Drive exports of the change layer.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod earthengine;
pub mod map;
pub mod ndvi;
pub mod ports;
pub mod workflow;

use clap::Parser;

use crate::config::Settings;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version are not failures
        Err(err) if !err.use_stderr() => {
            return err.print().map_err(|e| format!("Failed to print usage: {e}"));
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command, &Settings::from_env())
}
