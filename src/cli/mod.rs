//! Command-line parsing for the salary predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the prediction code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Level;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "salary",
    version,
    about = "Predict min, average, and max salary from experience, level, and role"
)]
pub struct Cli {
    /// Directory containing the model and encoder JSON artifacts.
    ///
    /// Defaults to `SALARY_ARTIFACTS_DIR` (environment or `.env`), then `.`.
    #[arg(long, short = 'a', global = true, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive form (default).
    Tui,
    /// Predict salaries for one level/role/experience combination.
    Predict(PredictArgs),
    /// Predict salaries for every known role at one level and experience.
    Table(TableArgs),
    /// Print the experience range allowed for each level.
    Levels,
    /// Print the roles offered by the form.
    Roles,
    /// Write an illustrative (untrained) artifact set.
    DemoArtifacts(DemoArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    /// Seniority level (Associate, Junior, Mid, Senior, Lead, Manager).
    ///
    /// Other labels are accepted and encoded with the default class.
    #[arg(short = 'l', long)]
    pub level: String,

    /// Job role, e.g. "Data Scientist".
    #[arg(short = 'r', long)]
    pub role: String,

    /// Years of experience; must lie within the level's range.
    #[arg(short = 'y', long)]
    pub years: u32,

    /// Print the prediction as JSON.
    #[arg(long)]
    pub json: bool,

    /// Also write the prediction to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[arg(short = 'l', long, value_enum, ignore_case = true)]
    pub level: Level,

    /// Years of experience; must lie within the level's range.
    #[arg(short = 'y', long)]
    pub years: u32,

    /// Also write the predictions to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Output directory (created if missing).
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_predict() {
        let cli = Cli::parse_from([
            "salary", "predict", "--level", "Mid", "--role", "Data Scientist", "--years", "5",
        ]);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.level, "Mid");
        assert_eq!(args.role, "Data Scientist");
        assert_eq!(args.years, 5);
        assert!(!args.json);
        assert!(cli.artifacts.is_none());
    }

    #[test]
    fn artifacts_flag_is_global() {
        let cli = Cli::parse_from(["salary", "levels", "--artifacts", "models"]);
        assert_eq!(cli.artifacts, Some(PathBuf::from("models")));
        assert!(matches!(cli.command, Command::Levels));
    }

    #[test]
    fn table_level_is_a_value_enum() {
        let cli = Cli::parse_from(["salary", "table", "-l", "senior", "-y", "6"]);
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        assert_eq!(args.level, Level::Senior);
        assert!(Cli::try_parse_from(["salary", "table", "-l", "Principal", "-y", "6"]).is_err());
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
