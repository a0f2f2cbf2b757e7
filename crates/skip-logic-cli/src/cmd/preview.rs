use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use skip_logic::{DefaultQuestionHandler, EngineConfig, SurveyAnswers, build_preview_with};

use crate::cmd::{print_json, read_json, read_survey};

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[arg(long = "survey", value_name = "survey.json")]
    pub survey: PathBuf,
    /// Answers recorded so far; an empty walkthrough when omitted
    #[arg(long = "answers", value_name = "answers.json")]
    pub answers: Option<PathBuf>,
}

pub fn run(args: PreviewArgs, config: &EngineConfig) -> Result<()> {
    let survey = read_survey(&args.survey)?;
    let answers: SurveyAnswers = match &args.answers {
        Some(path) => read_json(path)?,
        None => SurveyAnswers::new(),
    };
    let screens = build_preview_with(&survey, &answers, &DefaultQuestionHandler, config);
    print_json(&screens)
}
