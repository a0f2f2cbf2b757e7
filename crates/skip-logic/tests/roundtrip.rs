use schemars::schema_for;

use skip_logic::{
    ApiQuestionSkipLogic, DefaultQuestionHandler, EngineConfig, PreviewScreen, SurveyAnswers,
    SurveyItem, build_preview, maintain_survey, skip_logic_to_api,
};

fn fixture(name: &str) -> &'static str {
    match name {
        "branching_survey" => include_str!("../tests/fixtures/branching_survey.json"),
        "store_answers" => include_str!("../tests/fixtures/store_answers.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

fn survey() -> SurveyItem {
    serde_json::from_str(fixture("branching_survey")).expect("deserialize survey")
}

#[test]
fn survey_roundtrip() {
    let parsed = survey();
    let serialized = serde_json::to_string_pretty(&parsed).expect("serialize");
    let re_parsed: SurveyItem = serde_json::from_str(&serialized).expect("roundtrip");
    assert_eq!(parsed, re_parsed);
}

#[test]
fn answers_roundtrip() {
    let parsed: SurveyAnswers =
        serde_json::from_str(fixture("store_answers")).expect("deserialize");
    let serialized = serde_json::to_string(&parsed).expect("serialize");
    let re_parsed: SurveyAnswers = serde_json::from_str(&serialized).expect("roundtrip");
    assert_eq!(parsed, re_parsed);
}

#[test]
fn schemas_compile() {
    let schemas = [
        serde_json::to_string(&schema_for!(SurveyItem)).expect("survey schema serializes"),
        serde_json::to_string(&schema_for!(SurveyAnswers)).expect("answers schema serializes"),
        serde_json::to_string(&schema_for!(ApiQuestionSkipLogic)).expect("api schema serializes"),
        serde_json::to_string(&schema_for!(PreviewScreen)).expect("preview schema serializes"),
        serde_json::to_string(&schema_for!(EngineConfig)).expect("config schema serializes"),
    ];
    assert!(schemas.iter().all(|schema| schema.starts_with('{')));
    assert!(schemas[0].contains("specific_option"));
}

#[test]
fn fixture_is_already_maintained() {
    let mut maintained = survey();
    maintain_survey(&mut maintained);
    assert_eq!(maintained, survey());
}

#[test]
fn fixture_persists_only_authored_rules() {
    let survey = survey();
    let api = skip_logic_to_api(&survey, "q-channel").expect("q-channel owns rules");
    assert_eq!(api.rules.len(), 1);
    assert_eq!(api.rules[0].id.as_deref(), Some("rule-store-only"));
    assert_eq!(api.rules[0].expression, r#"and contains val1 "Store" eq cnt1 1"#);
}

#[test]
fn fixture_preview_jumps_to_wrap_up() {
    let answers: SurveyAnswers =
        serde_json::from_str(fixture("store_answers")).expect("deserialize answers");
    let screens = build_preview(&survey(), &answers, &DefaultQuestionHandler);

    let ids: Vec<&str> = screens.iter().map(|screen| screen.id.as_str()).collect();
    assert_eq!(ids, vec!["s-basics", "s-wrapup"]);
    assert!(screens.iter().all(|screen| screen.is_complete));
}
