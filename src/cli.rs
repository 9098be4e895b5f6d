//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::map::DEFAULT_HEIGHT;
use crate::ndvi::years::{
    parse_base_year, parse_current_year, YearSelection, DEFAULT_BASE_YEAR, DEFAULT_CURRENT_YEAR,
};

/// Default path of the generated map page.
pub const DEFAULT_OUTPUT: &str = "ndvi_map.html";

/// Top-level CLI parser for `ndvi-change`.
#[derive(Debug, Parser)]
#[command(
    name = "ndvi-change",
    version,
    about = "Compare Landsat 8 NDVI between two years to spot vegetation loss or gain"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// The pair of years every command works on.
#[derive(Debug, Clone, Copy, Args)]
pub struct YearArgs {
    /// Baseline year (2015-2020).
    #[arg(long, value_parser = parse_base_year, default_value_t = DEFAULT_BASE_YEAR)]
    pub year1: i32,
    /// Current year (2021-2023).
    #[arg(long, value_parser = parse_current_year, default_value_t = DEFAULT_CURRENT_YEAR)]
    pub year2: i32,
}

impl YearArgs {
    /// The validated selection.
    ///
    /// # Errors
    ///
    /// Returns an error if either year is outside its list.
    pub fn selection(self) -> Result<YearSelection, String> {
        YearSelection::new(self.year1, self.year2)
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render both composites and their difference into an HTML map.
    Map {
        /// Years to compare.
        #[command(flatten)]
        years: YearArgs,
        /// Where to write the page.
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Map panel height in pixels.
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,
    },
    /// Export the NDVI difference to Google Drive.
    Export {
        /// Years to compare.
        #[command(flatten)]
        years: YearArgs,
    },
    /// Print the requests a run would send, without contacting the service.
    Show {
        /// Years to compare.
        #[command(flatten)]
        years: YearArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn map_defaults_to_first_and_last_years() {
        let cli = Cli::parse_from(["ndvi-change", "map"]);
        match cli.command {
            Command::Map { years, output, height } => {
                assert_eq!((years.year1, years.year2), (2015, 2023));
                assert_eq!(output.to_str(), Some("ndvi_map.html"));
                assert_eq!(height, 600);
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn parses_export_years() {
        let cli = Cli::parse_from([
            "ndvi-change",
            "export",
            "--year1",
            "2018",
            "--year2",
            "2022",
        ]);
        assert!(matches!(
            cli.command,
            Command::Export { years } if years.year1 == 2018 && years.year2 == 2022
        ));
    }

    #[test]
    fn rejects_year_outside_its_list() {
        assert!(Cli::try_parse_from(["ndvi-change", "show", "--year1", "2021"]).is_err());
        assert!(Cli::try_parse_from(["ndvi-change", "show", "--year2", "2020"]).is_err());
    }
}
