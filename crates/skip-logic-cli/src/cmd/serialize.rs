use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use skip_logic::{ApiQuestionSkipLogic, SurveyItem, skip_logic_to_api};

use crate::cmd::{find_question, print_json, read_survey};

#[derive(Args, Debug, Clone)]
pub struct SerializeArgs {
    #[arg(long = "survey", value_name = "survey.json")]
    pub survey: PathBuf,
    /// Only this question; every question owning rules when omitted
    #[arg(long = "question", value_name = "ID")]
    pub question: Option<String>,
}

pub fn run(args: SerializeArgs) -> Result<()> {
    let survey = read_survey(&args.survey)?;
    match args.question {
        Some(question_id) => {
            find_question(&survey, &question_id)?;
            let api = skip_logic_to_api(&survey, &question_id).unwrap_or_default();
            print_json(&api)
        }
        None => print_json(&survey_to_api(&survey)),
    }
}

/// Persisted forms of every question that owns rules, keyed by question id.
pub fn survey_to_api(survey: &SurveyItem) -> BTreeMap<String, ApiQuestionSkipLogic> {
    survey
        .questions()
        .filter_map(|question| {
            skip_logic_to_api(survey, &question.id).map(|api| (question.id.clone(), api))
        })
        .collect()
}
