use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use skip_logic::{
    EngineConfig, SequentialIds, conditions_from_expression_with, try_conditions_from_expression,
};

use crate::cmd::{find_question, print_json, read_survey};

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    #[arg(long = "survey", value_name = "survey.json")]
    pub survey: PathBuf,
    /// Question whose options the expression refers to
    #[arg(long = "question", value_name = "ID")]
    pub question: String,
    /// Fail instead of printing an empty list when the expression is invalid
    #[arg(long = "strict", default_value_t = false)]
    pub strict: bool,
    /// Prefix expression, e.g. `and eq val1 "A1" gt cnt1 2`
    #[arg(value_name = "EXPRESSION")]
    pub expression: String,
}

pub fn run(args: ParseArgs, config: &EngineConfig) -> Result<()> {
    let survey = read_survey(&args.survey)?;
    let question = find_question(&survey, &args.question)?;
    let mut ids = SequentialIds::new("condition-");

    let conditions = if args.strict {
        try_conditions_from_expression(&args.expression, question, &mut ids, config)
            .with_context(|| format!("cannot decode expression '{}'", args.expression))?
    } else {
        conditions_from_expression_with(&args.expression, question, &mut ids, config)
    };
    print_json(&conditions)
}
