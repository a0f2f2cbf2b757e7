use tracing::debug;

use crate::ids::IdGenerator;
use crate::spec::{SurveyItem, SurveySection};

/// Result of [`auto_split_sections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutcome {
    /// The caller's gate suppressed recomputation (e.g. a drag is in progress).
    Suppressed,
    /// The section count did not change; the survey was left untouched.
    Unchanged,
    /// The section list was replaced.
    Replaced { before: usize, after: usize },
}

impl SplitOutcome {
    /// True when new sections were created and the user should be told once.
    pub fn needs_advisory(&self) -> bool {
        matches!(self, SplitOutcome::Replaced { before, after } if after > before)
    }
}

/// Recomputes section boundaries so that every question owning skip logic is
/// the last question of its section.
///
/// `should_recompute` is consulted first; when it returns false nothing runs.
pub fn auto_split_sections(
    survey: &mut SurveyItem,
    ids: &mut dyn IdGenerator,
    should_recompute: impl FnOnce() -> bool,
) -> SplitOutcome {
    if !should_recompute() {
        return SplitOutcome::Suppressed;
    }

    let before = survey.sections.len();
    let sections = split_sections(&survey.sections, ids);
    let after = sections.len();
    if after == before {
        return SplitOutcome::Unchanged;
    }

    debug!(survey_id = %survey.id, before, after, "replacing survey sections");
    survey.sections = sections;
    SplitOutcome::Replaced { before, after }
}

/// Splits each section after every question that owns skip logic.
///
/// The first chunk of a section keeps its id and title; later chunks become new
/// untitled sections. Sections without questions disappear.
pub fn split_sections(sections: &[SurveySection], ids: &mut dyn IdGenerator) -> Vec<SurveySection> {
    let mut out = Vec::with_capacity(sections.len());
    for section in sections {
        let last = section.questions.len().saturating_sub(1);
        let mut start = 0;
        for (idx, question) in section.questions.iter().enumerate() {
            if !(question.has_skip_logic() || idx == last) {
                continue;
            }
            let questions = section.questions[start..=idx].to_vec();
            let chunk = if start == 0 {
                SurveySection {
                    id: section.id.clone(),
                    title: section.title.clone(),
                    questions,
                }
            } else {
                SurveySection {
                    id: ids.next_id(),
                    title: None,
                    questions,
                }
            };
            out.push(chunk);
            start = idx + 1;
        }
    }
    out
}
