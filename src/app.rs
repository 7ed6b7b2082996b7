//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves configuration
//! - installs logging
//! - loads the artifact directory once
//! - dispatches to the TUI or a one-shot command

use std::path::Path;

use clap::Parser;

use crate::cli::{Command, DemoArgs, PredictArgs, TableArgs};
use crate::config::AppConfig;
use crate::domain::{Prediction, ROLES, experience_range_for};
use crate::error::AppError;
use crate::io::export::{PredictionExport, write_predictions_json};
use crate::logging::LogTarget;

pub mod predictor;

use predictor::Predictor;

/// Entry point for the `salary` binary.
pub fn run() -> Result<(), AppError> {
    // `salary` and `salary --artifacts DIR` behave like `salary tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let config = AppConfig::resolve(cli.artifacts.as_deref());

    let target = match (&cli.command, &config.log_file) {
        (Command::Tui, Some(path)) => LogTarget::File(path),
        (Command::Tui, None) => LogTarget::Discard,
        _ => LogTarget::Stderr,
    };
    crate::logging::init(target)?;

    match cli.command {
        Command::Tui => handle_tui(&config),
        Command::Predict(args) => handle_predict(&config, args),
        Command::Table(args) => handle_table(&config, args),
        Command::Levels => {
            print!("{}", crate::report::format_levels());
            Ok(())
        }
        Command::Roles => {
            for role in ROLES {
                println!("{role}");
            }
            Ok(())
        }
        Command::DemoArtifacts(args) => handle_demo(args),
    }
}

fn load_predictor(config: &AppConfig) -> Result<Predictor, AppError> {
    Predictor::load(&config.artifacts_dir)
}

fn handle_tui(config: &AppConfig) -> Result<(), AppError> {
    let predictor = load_predictor(config)?;
    crate::tui::run(&predictor)
}

fn handle_predict(config: &AppConfig, args: PredictArgs) -> Result<(), AppError> {
    check_years(&args.level, args.years)?;
    let predictor = load_predictor(config)?;
    let prediction = predictor.predict_salaries(f64::from(args.years), &args.level, &args.role)?;

    for warning in &prediction.warnings {
        eprintln!("warning: {warning}");
    }

    print!("{}", render_prediction(&prediction, args.json)?);

    if let Some(path) = &args.export {
        let export = PredictionExport::new(&config.artifacts_dir, vec![prediction]);
        write_predictions_json(path, &export)?;
    }
    Ok(())
}

/// Text printed by `salary predict`: the report, or pretty JSON with `--json`.
fn render_prediction(prediction: &Prediction, json: bool) -> Result<String, AppError> {
    if !json {
        return Ok(crate::report::format_prediction(prediction));
    }
    let mut text = serde_json::to_string_pretty(prediction)
        .map_err(|e| AppError::runtime(format!("Failed to encode prediction: {e}")))?;
    text.push('\n');
    Ok(text)
}

fn handle_table(config: &AppConfig, args: TableArgs) -> Result<(), AppError> {
    let level = args.level.label();
    check_years(level, args.years)?;
    let predictor = load_predictor(config)?;
    let rows = predictor.predict_table(f64::from(args.years), level, &ROLES)?;

    println!("{level}, {} years of experience", args.years);
    print!("{}", crate::report::format_table(&rows));

    if let Some(path) = &args.export {
        let export = PredictionExport::new(&config.artifacts_dir, rows);
        write_predictions_json(path, &export)?;
    }
    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let set = crate::io::artifacts::demo_artifacts()?;
    let paths = crate::io::artifacts::write_artifacts(&args.out, &set)?;
    for path in &paths {
        println!("wrote {}", pretty_path(path));
    }
    Ok(())
}

/// The CLI is an input surface too, so it enforces the same bounds as the slider.
fn check_years(level: &str, years: u32) -> Result<(), AppError> {
    let range = experience_range_for(level);
    if range.contains(years) {
        return Ok(());
    }
    Err(AppError::usage(format!(
        "{years} years is outside the range for {level} ({}..={}).",
        range.min, range.max
    )))
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}

/// Rewrite argv so `salary` defaults to `salary tui`.
///
/// Rules:
/// - `salary`                     -> `salary tui`
/// - `salary --artifacts DIR ...` -> `salary tui --artifacts DIR ...`
/// - `salary --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::io::artifacts::{demo_artifacts, write_artifacts};

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["salary"])), argv(&["salary", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["salary", "-a", "models"])),
            argv(&["salary", "tui", "-a", "models"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["salary", "--help"]),
            argv(&["salary", "-V"]),
            argv(&["salary", "levels"]),
            argv(&["salary", "predict", "-l", "Mid", "-r", "HR", "-y", "3"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn years_outside_level_range_are_rejected() {
        assert!(check_years("Mid", 2).is_ok());
        assert!(check_years("Mid", 7).is_ok());
        let err = check_years("Mid", 8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unknown_level_uses_fallback_range() {
        assert!(check_years("Principal", 20).is_ok());
        assert!(check_years("Principal", 21).is_err());
    }

    #[test]
    fn json_output_carries_inputs_results_and_warnings() {
        let predictor = Predictor::new(demo_artifacts().unwrap());
        let prediction = predictor.predict_salaries(5.0, "Mid", "Astronaut").unwrap();

        let text = render_prediction(&prediction, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["level"], "Mid");
        assert_eq!(value["role"], "Astronaut");
        assert_eq!(value["years_of_experience"], 5.0);
        assert_eq!(value["features"]["role_code"], 0);
        assert_eq!(value["result"]["avg"], prediction.result.avg);
        assert_eq!(value["warnings"][0]["category_type"], "role");
        assert_eq!(value["warnings"][0]["label"], "Astronaut");

        let back: Prediction = serde_json::from_str(&text).unwrap();
        assert_eq!(back, prediction);

        let report = render_prediction(&prediction, false).unwrap();
        assert!(report.starts_with("Predicted Salaries for 5 years of experience, Mid, Astronaut:"));
    }

    #[test]
    fn predict_command_writes_export() {
        let dir = std::env::temp_dir().join(format!("salary-predict-app-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        write_artifacts(&dir, &demo_artifacts().unwrap()).unwrap();
        let export = dir.join("out.json");

        let config = AppConfig {
            artifacts_dir: dir.clone(),
            log_file: None,
        };
        let args = PredictArgs {
            level: "Senior".to_string(),
            role: "HR".to_string(),
            years: 6,
            json: true,
            export: Some(export.clone()),
        };
        handle_predict(&config, args).unwrap();

        let text = std::fs::read_to_string(&export).unwrap();
        let saved: PredictionExport = serde_json::from_str(&text).unwrap();
        assert_eq!(saved.artifacts_dir, dir.display().to_string());
        assert_eq!(saved.predictions.len(), 1);
        assert_eq!(saved.predictions[0].level, "Senior");
        assert_eq!(saved.predictions[0].years_of_experience, 6.0);
        assert!(saved.predictions[0].warnings.is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
