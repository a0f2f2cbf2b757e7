mod support;

use std::io;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use skip_logic::{
    Clause, ConditionKind, CountCondition, DecodeError, EngineConfig, OptionCondition,
    ParseError, QuestionType, SequentialIds, SkipLogicCondition, SkipLogicError,
    conditions_from_expression, expression_from_conditions, try_conditions_from_expression,
};

use support::{choice_question, count_condition, multiple, option_condition, single, without_ids};

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn warnings_while(f: impl FnOnce()) -> usize {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    text.lines().filter(|line| line.contains("WARN")).count()
}

fn decode(expression: &str, question: &skip_logic::QuestionItem) -> Vec<SkipLogicCondition> {
    let mut ids = SequentialIds::new("c");
    conditions_from_expression(expression, question, &mut ids)
}

fn try_decode(
    expression: &str,
    question: &skip_logic::QuestionItem,
) -> Result<Vec<SkipLogicCondition>, SkipLogicError> {
    let mut ids = SequentialIds::new("c");
    try_conditions_from_expression(expression, question, &mut ids, &EngineConfig::default())
}

#[test]
fn single_selection_conjunction_serializes() {
    let question = single("q1");
    let conditions = vec![
        option_condition("a", "q1-1", OptionCondition::Selected, Clause::And),
        count_condition("b", CountCondition::Greater, 2, Clause::And),
    ];

    let expression = expression_from_conditions(&conditions, &question, 1);
    insta::assert_snapshot!(expression, @r#"and eq val1 "A1" gt cnt1 2"#);

    let decoded = decode(&expression, &question);
    assert_eq!(without_ids(&decoded), without_ids(&conditions));
}

#[test]
fn multi_selection_mixed_clauses_serialize() {
    let question = multiple("q1");
    let conditions = vec![
        option_condition("a", "q1-1", OptionCondition::Selected, Clause::And),
        option_condition("b", "q1-2", OptionCondition::NotSelected, Clause::Or),
        count_condition("c", CountCondition::LessOrEqual, 3, Clause::And),
    ];

    let expression = expression_from_conditions(&conditions, &question, 1);
    insta::assert_snapshot!(
        expression,
        @r#"or and contains val1 "A1" notcontains val1 "A2" lte cnt1 3"#
    );

    let decoded = decode(&expression, &question);
    assert_eq!(without_ids(&decoded), without_ids(&conditions));
}

#[test]
fn clauses_come_from_the_shared_ancestor() {
    let question = single("q1");
    let decoded = decode(r#"or eq val1 "A1" and gt cnt1 0 lt cnt1 3"#, &question);
    let clauses: Vec<Clause> = decoded.iter().map(|condition| condition.clause).collect();
    assert_eq!(clauses, vec![Clause::Or, Clause::And, Clause::And]);
}

#[test]
fn decoded_conditions_get_fresh_ids() {
    let question = single("q1");
    let decoded = decode(r#"and eq val1 "A1" neq val1 "A2""#, &question);
    let ids: Vec<&str> = decoded.iter().map(|condition| condition.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c2"]);
}

#[test]
fn sequence_number_is_rendered_but_not_required_to_match() {
    let question = single("q3");
    let conditions = vec![option_condition(
        "a",
        "q3-2",
        OptionCondition::NotSelected,
        Clause::And,
    )];
    let expression = expression_from_conditions(&conditions, &question, 3);
    assert_eq!(expression, r#"neq val3 "A2""#);

    let decoded = decode(r#"neq val7 "A2""#, &question);
    assert_eq!(without_ids(&decoded), without_ids(&conditions));
}

#[test]
fn numeric_operands_match_option_values() {
    let question = choice_question("q1", QuestionType::Dropdown, &["10", "20"]);
    let decoded = decode("eq val1 20", &question);
    assert_eq!(
        decoded[0].kind,
        ConditionKind::SpecificOption {
            option_id: Some("q1-2".into()),
            option_condition: Some(OptionCondition::Selected),
        }
    );
}

#[test]
fn decimal_operands_match_option_values_as_written() {
    let question = choice_question("q1", QuestionType::Dropdown, &["1.5", "1.50"]);
    let decoded = decode("eq val1 1.50", &question);
    assert_eq!(
        decoded[0].kind,
        ConditionKind::SpecificOption {
            option_id: Some("q1-2".into()),
            option_condition: Some(OptionCondition::Selected),
        }
    );
}

#[test]
fn long_rules_survive_the_round_trip() {
    let question = multiple("q1");
    let conditions: Vec<SkipLogicCondition> = (0..200)
        .map(|idx| {
            count_condition(
                &format!("c{idx}"),
                CountCondition::GreaterOrEqual,
                0,
                Clause::And,
            )
        })
        .collect();

    let expression = expression_from_conditions(&conditions, &question, 1);
    let decoded = try_decode(&expression, &question).expect("long rule decodes");
    assert_eq!(decoded.len(), 200);
    assert_eq!(without_ids(&decoded), without_ids(&conditions));
}

#[test]
fn quoted_values_with_spaces_and_quotes_survive() {
    let question = choice_question("q1", QuestionType::Image, &["a \"red\" car", "boat"]);
    let conditions = vec![option_condition(
        "a",
        "q1-1",
        OptionCondition::Selected,
        Clause::And,
    )];
    let expression = expression_from_conditions(&conditions, &question, 1);
    assert_eq!(expression, r#"contains val1 "a \"red\" car""#);
    assert_eq!(without_ids(&decode(&expression, &question)), without_ids(&conditions));
}

#[test]
fn unresolved_operands_are_dropped() {
    let question = single("q1");
    let conditions = vec![
        option_condition("a", "q1-1", OptionCondition::Selected, Clause::And),
        option_condition("b", "removed", OptionCondition::Selected, Clause::Or),
        SkipLogicCondition {
            id: "c".into(),
            clause: Clause::Or,
            kind: ConditionKind::SelectedCount {
                count_condition: Some(CountCondition::Less),
                count: None,
            },
        },
        count_condition("d", CountCondition::Greater, 1, Clause::And),
    ];
    assert_eq!(
        expression_from_conditions(&conditions, &question, 1),
        r#"and eq val1 "A1" gt cnt1 1"#
    );
}

#[test]
fn empty_input_serializes_to_empty_string() {
    let question = single("q1");
    assert_eq!(expression_from_conditions(&[], &question, 1), "");
    let empty = vec![SkipLogicCondition::empty(&mut SequentialIds::default())];
    assert_eq!(expression_from_conditions(&empty, &question, 1), "");
}

#[test]
fn unsupported_question_types_serialize_nothing() {
    let mut question = single("q1");
    question.kind = QuestionType::OpenEnded;
    let conditions = vec![count_condition("a", CountCondition::Equal, 1, Clause::And)];
    assert_eq!(expression_from_conditions(&conditions, &question, 1), "");
    assert_eq!(
        try_decode("eq cnt1 1", &question),
        Err(SkipLogicError::Decode(DecodeError::UnsupportedQuestionType(
            QuestionType::OpenEnded
        )))
    );
}

#[test]
fn invalid_expressions_decode_to_nothing() {
    let question = single("q1");
    for expression in [
        "invalid",
        "and contains",
        r#"not contains val1 "A1""#,
        r#"gt val1 "A1""#,
        r#"contains val1 "A1""#,
        "contains cnt1 2",
        r#"eq val1 "Z9""#,
        "gt cnt1 1.5",
        "gt cnt1 -1",
        r#"and eq val1 "A1""#,
    ] {
        assert!(
            decode(expression, &question).is_empty(),
            "{expression} should decode to nothing"
        );
        assert!(try_decode(expression, &question).is_err());
    }
}

#[test]
fn invalid_expressions_report_the_failure() {
    let question = single("q1");
    assert!(matches!(
        try_decode("invalid", &question),
        Err(SkipLogicError::Parse(ParseError::InvalidToken { position: 0, .. }))
    ));
    assert_eq!(
        try_decode("and contains", &question),
        Err(SkipLogicError::Parse(ParseError::UnexpectedEnd {
            expected: "an identifier"
        }))
    );
    assert_eq!(
        try_decode(r#"contains val1 "A1""#, &question),
        Err(SkipLogicError::Decode(DecodeError::OperatorMismatch {
            operator: "contains",
            identifier: "val1".into()
        }))
    );
    assert_eq!(
        try_decode(r#"eq val1 "Z9""#, &question),
        Err(SkipLogicError::Decode(DecodeError::UnknownOption("Z9".into())))
    );

    let question = multiple("q1");
    assert_eq!(
        try_decode(r#"eq val1 "A1""#, &question),
        Err(SkipLogicError::Decode(DecodeError::OperatorMismatch {
            operator: "eq",
            identifier: "val1".into()
        }))
    );
}

#[test]
fn one_bad_leaf_discards_the_whole_expression() {
    let question = single("q1");
    let decoded = decode(r#"or eq val1 "A1" and gt cnt1 0 eq val1 "gone""#, &question);
    assert!(decoded.is_empty());
}

#[test]
fn each_invalid_expression_logs_exactly_once() {
    let question = single("q1");
    for expression in [
        "invalid",
        "and contains",
        r#"not contains val1 "A1""#,
        r#"gt val1 "A1""#,
    ] {
        let warnings = warnings_while(|| {
            assert!(decode(expression, &question).is_empty());
        });
        assert_eq!(warnings, 1, "{expression}");
    }
}

#[test]
fn blank_expressions_are_empty_without_logging() {
    let question = single("q1");
    let warnings = warnings_while(|| {
        assert!(decode("   ", &question).is_empty());
    });
    assert_eq!(warnings, 0);
}

fn condition_strategy() -> impl Strategy<Value = (bool, usize, bool, usize, u32, bool)> {
    (
        any::<bool>(),
        0usize..4,
        any::<bool>(),
        0usize..CountCondition::ALL.len(),
        0u32..10,
        any::<bool>(),
    )
}

fn build_conditions(
    specs: &[(bool, usize, bool, usize, u32, bool)],
    question_id: &str,
) -> Vec<SkipLogicCondition> {
    let last = specs.len() - 1;
    specs
        .iter()
        .enumerate()
        .map(|(idx, (is_option, option, selected, comparison, count, or))| {
            let clause = if *or && idx != last {
                Clause::Or
            } else {
                Clause::And
            };
            if *is_option {
                let condition = if *selected {
                    OptionCondition::Selected
                } else {
                    OptionCondition::NotSelected
                };
                option_condition("", &format!("{question_id}-{}", option + 1), condition, clause)
            } else {
                count_condition("", CountCondition::ALL[*comparison], *count, clause)
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn serialized_conditions_decode_to_themselves(
        specs in prop::collection::vec(condition_strategy(), 1..7),
        multi in any::<bool>(),
    ) {
        let kind = if multi { QuestionType::Multiple } else { QuestionType::Single };
        let question = choice_question("q1", kind, &["A1", "A2", "A3", "A4"]);
        let conditions = build_conditions(&specs, "q1");

        let expression = expression_from_conditions(&conditions, &question, 1);
        let decoded = decode(&expression, &question);
        prop_assert_eq!(without_ids(&decoded), without_ids(&conditions));
    }
}
