use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use skip_logic::{SplitOutcome, SurveyItem, UuidIds, auto_split_sections, maintain_survey};
use tracing::info;

use crate::cmd::{read_survey, to_json};

#[derive(Args, Debug, Clone)]
pub struct MaintainArgs {
    #[arg(long = "survey", value_name = "survey.json")]
    pub survey: PathBuf,
    /// Recompute section boundaries before maintenance
    #[arg(long = "split", default_value_t = false)]
    pub split: bool,
    /// Write the maintained survey here instead of stdout
    #[arg(long = "out", value_name = "survey.json")]
    pub out: Option<PathBuf>,
}

pub fn run(args: MaintainArgs) -> Result<()> {
    let mut survey = read_survey(&args.survey)?;
    let outcome = maintain(&mut survey, args.split);
    if outcome.needs_advisory() {
        eprintln!(
            "Sections were added so that every question with skip logic ends its section. \
Review the new section titles."
        );
    }

    let encoded = to_json(&survey)?;
    match args.out {
        Some(path) => {
            fs::write(&path, format!("{encoded}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote maintained survey");
        }
        None => println!("{encoded}"),
    }
    Ok(())
}

/// Optional split, then reference maintenance. Splitting first lets the
/// maintainer see the final section layout.
pub fn maintain(survey: &mut SurveyItem, split: bool) -> SplitOutcome {
    let outcome = auto_split_sections(survey, &mut UuidIds, || split);
    maintain_survey(survey);
    outcome
}
