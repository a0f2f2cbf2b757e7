pub mod evaluate;
pub mod maintain;
pub mod parse;
pub mod preview;
pub mod serialize;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use skip_logic::{EngineConfig, QuestionItem, SurveyItem};

/// Engine limits from an optional TOML file; defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::from_toml_str(&raw)
        .with_context(|| format!("invalid engine config {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn read_survey(path: &Path) -> Result<SurveyItem> {
    read_json(path)
}

pub fn find_question<'a>(survey: &'a SurveyItem, question_id: &str) -> Result<&'a QuestionItem> {
    survey
        .question(question_id)
        .ok_or_else(|| anyhow!("question '{question_id}' not found in survey '{}'", survey.id))
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to encode output")
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", to_json(value)?);
    Ok(())
}
