#![allow(dead_code)]

use skip_logic::{
    AnswerOption, AnswerValue, Clause, ConditionKind, CountCondition, OptionCondition,
    QuestionAnswers, QuestionItem, QuestionItemSkipLogic, QuestionType, SkipLogicCondition,
    SkipLogicDestination, SkipLogicRule, SurveyItem, SurveySection, TargetType,
};

/// Choice question whose options are `<id>-1`, `<id>-2`, ... with the given values.
pub fn choice_question(id: &str, kind: QuestionType, values: &[&str]) -> QuestionItem {
    QuestionItem {
        id: id.into(),
        kind,
        title: format!("Question {id}"),
        answers: values
            .iter()
            .enumerate()
            .map(|(idx, value)| AnswerOption {
                id: format!("{id}-{}", idx + 1),
                value: (*value).into(),
            })
            .collect(),
        skip_logic: None,
    }
}

pub fn single(id: &str) -> QuestionItem {
    choice_question(id, QuestionType::Single, &["A1", "A2", "A3"])
}

pub fn multiple(id: &str) -> QuestionItem {
    choice_question(id, QuestionType::Multiple, &["A1", "A2", "A3", "A4"])
}

pub fn option_condition(
    id: &str,
    option_id: &str,
    option_condition: OptionCondition,
    clause: Clause,
) -> SkipLogicCondition {
    SkipLogicCondition {
        id: id.into(),
        clause,
        kind: ConditionKind::SpecificOption {
            option_id: Some(option_id.into()),
            option_condition: Some(option_condition),
        },
    }
}

pub fn count_condition(
    id: &str,
    count_condition: CountCondition,
    count: u32,
    clause: Clause,
) -> SkipLogicCondition {
    SkipLogicCondition {
        id: id.into(),
        clause,
        kind: ConditionKind::SelectedCount {
            count_condition: Some(count_condition),
            count: Some(count),
        },
    }
}

pub fn rule(
    id: &str,
    conditions: Vec<SkipLogicCondition>,
    target: (TargetType, &str),
) -> SkipLogicRule {
    SkipLogicRule {
        id: id.into(),
        conditions,
        destination: SkipLogicDestination::new(target.0, target.1),
    }
}

pub fn with_rules(mut question: QuestionItem, rules: Vec<SkipLogicRule>) -> QuestionItem {
    question.skip_logic = Some(QuestionItemSkipLogic { rules });
    question
}

pub fn section(id: &str, questions: Vec<QuestionItem>) -> SurveySection {
    SurveySection {
        id: id.into(),
        title: Some(format!("Section {id}")),
        questions,
    }
}

pub fn survey(sections: Vec<SurveySection>) -> SurveyItem {
    SurveyItem {
        id: "survey".into(),
        title: "Survey".into(),
        sections,
    }
}

/// Answers selecting exactly the given option ids.
pub fn selected(option_ids: &[&str]) -> QuestionAnswers {
    option_ids
        .iter()
        .map(|id| ((*id).to_string(), AnswerValue::Selected))
        .collect()
}

/// Condition ids are regenerated by the decoder; blank them for comparison.
pub fn without_ids(conditions: &[SkipLogicCondition]) -> Vec<SkipLogicCondition> {
    conditions
        .iter()
        .map(|condition| SkipLogicCondition {
            id: String::new(),
            ..condition.clone()
        })
        .collect()
}
