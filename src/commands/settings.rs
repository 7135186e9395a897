//! `ted settings`: interactive editor for the settings file.

use std::io::BufRead;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::{flush_stdout, read_line};
use crate::config::{self, AVAILABLE_MODELS, DEFAULT_MODEL, Settings};
use crate::ui::style;

const API_KEY_URL: &str = "https://makersuite.google.com/app/apikey";

fn ask<I: BufRead>(input: &mut I, prompt: &str) -> Result<String> {
    print!("{} ", style::prompt(prompt));
    flush_stdout()?;
    read_line(input)
}

fn key_status(settings: &Settings) -> String {
    match settings.api_key() {
        Some(_) => style::success("[CONFIGURED]").to_string(),
        None => style::error("[NOT SET]").to_string(),
    }
}

/// Walk through API key, model and temperature and return the result.
/// Blank answers keep the current value; invalid answers are reported and
/// ignored.
pub fn edit_settings<I: BufRead>(mut settings: Settings, input: &mut I) -> Result<Settings> {
    println!("{} {}", style::header("Current API key:"), key_status(&settings));
    let key = ask(input, "Enter new API key (or press Enter to keep current):")?;
    if !key.is_empty() {
        settings.api_key = Some(key);
        println!("{}", style::success("✓ API key updated"));
    }

    println!("\n{} {}", style::header("Current model:"), style::value(&settings.model));
    println!("{}", style::header("Available models:"));
    for (i, model) in AVAILABLE_MODELS.iter().enumerate() {
        let default = if *model == DEFAULT_MODEL {
            format!(" {}", style::success("(default)"))
        } else {
            String::new()
        };
        println!("  {}{}", style::info(format!("{}. {}", i + 1, model)), default);
    }
    let choice = ask(
        input,
        &format!("Enter number (1-{}) or press Enter to keep current:", AVAILABLE_MODELS.len()),
    )?;
    if !choice.is_empty() {
        match config::parse_model_choice(&choice) {
            Some(model) => {
                settings.model = model.to_string();
                println!("{}", style::success("✓ Model updated"));
            }
            None => println!(
                "{}",
                style::warning(format!(
                    "Invalid selection '{choice}'. Please enter a number between 1 and {}.",
                    AVAILABLE_MODELS.len()
                ))
            ),
        }
    }

    println!("\n{} {:.2}", style::header("Current temperature:"), settings.temperature);
    println!("{}", style::header("Temperature affects AI response determinism:"));
    println!(
        "  {}",
        style::info("• Lower values (0.0-0.3): More deterministic, consistent responses")
    );
    println!("  {}", style::info("• Higher values (0.4-1.0): More creative, varied responses"));
    println!("  {}", style::info("• Default: 0.3 (recommended for command generation)"));
    let temperature = ask(input, "Enter temperature (0.0-1.0) or press Enter to keep current:")?;
    if !temperature.is_empty() {
        match config::parse_temperature(&temperature) {
            Some(t) => {
                settings.temperature = t;
                println!("{}", style::success("✓ Temperature updated"));
            }
            None => println!(
                "{}",
                style::warning("Invalid temperature. Please enter a value between 0.0 and 1.0.")
            ),
        }
    }

    Ok(settings)
}

/// Run the editor against the file at `config_path` and save the result.
pub fn run_settings<I: BufRead>(config_path: &Path, input: &mut I) -> Result<Settings> {
    let current = Settings::load(config_path).context("error loading config")?;
    let updated = edit_settings(current, input)?;
    updated.save(config_path).context("error saving config")?;
    tracing::info!(model = %updated.model, temperature = updated.temperature, "Settings saved");

    println!("\n{}", style::success("✓ Settings saved successfully!"));
    println!("{} {}", style::info("Config location:"), style::value(config_path.display()));
    println!("\n{}", style::header("Current configuration:"));
    println!("  {} {}", style::header("API Key:"), key_status(&updated));
    println!("  {} {}", style::header("Model:"), style::value(&updated.model));
    println!("  {} {:.2}", style::header("Temperature:"), updated.temperature);

    if updated.api_key().is_none() {
        println!(
            "\n{}",
            style::warning("Warning: API key is not set. You'll need to configure it to use ted.")
        );
        println!("{} {}", style::info("Get your API key from:"), API_KEY_URL);
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_answers_keep_everything() {
        let current = Settings {
            api_key: Some("old".to_string()),
            ..Settings::default()
        };
        let mut input = "\n\n\n".as_bytes();

        let updated = edit_settings(current.clone(), &mut input).unwrap();

        assert_eq!(updated, current);
    }

    #[test]
    fn test_answers_update_fields() {
        let mut input = "new-key\n2\n0.8\n".as_bytes();

        let updated = edit_settings(Settings::default(), &mut input).unwrap();

        assert_eq!(updated.api_key(), Some("new-key"));
        assert_eq!(updated.model, "gemini-2.0-flash-lite");
        assert_eq!(updated.temperature, 0.8);
    }

    #[test]
    fn test_invalid_answers_are_ignored() {
        let mut input = "\n9\nhot\n".as_bytes();

        let updated = edit_settings(Settings::default(), &mut input).unwrap();

        assert_eq!(updated, Settings::default());
    }

    #[test]
    fn test_run_settings_saves_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut input = "abc\n\n0.1\n".as_bytes();

        run_settings(&path, &mut input).unwrap();

        let saved = Settings::load(&path).unwrap();
        assert_eq!(saved.api_key(), Some("abc"));
        assert_eq!(saved.temperature, 0.1);
        assert_eq!(saved.model, DEFAULT_MODEL);
    }
}
