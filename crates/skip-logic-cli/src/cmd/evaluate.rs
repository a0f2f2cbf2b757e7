use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use skip_logic::{EngineConfig, QuestionAnswers, SurveyAnswers, evaluate_with};

use crate::cmd::{find_question, print_json, read_json, read_survey};

#[derive(Args, Debug, Clone)]
pub struct EvaluateArgs {
    #[arg(long = "survey", value_name = "survey.json")]
    pub survey: PathBuf,
    /// Answers keyed by question id, then option id
    #[arg(long = "answers", value_name = "answers.json")]
    pub answers: PathBuf,
    #[arg(long = "question", value_name = "ID")]
    pub question: String,
}

/// Prints the destination of the matching rule, or `null`.
pub fn run(args: EvaluateArgs, config: &EngineConfig) -> Result<()> {
    let survey = read_survey(&args.survey)?;
    let answers: SurveyAnswers = read_json(&args.answers)?;
    let question = find_question(&survey, &args.question)?;

    let unanswered = QuestionAnswers::new();
    let question_answers = answers.get(&question.id).unwrap_or(&unanswered);
    print_json(&evaluate_with(question, question_answers, config))
}
