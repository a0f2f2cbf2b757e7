#![allow(missing_docs)]

pub mod answers;
pub mod api;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod expr;
pub mod handler;
pub mod ids;
pub mod maintain;
pub mod preview;
pub mod sections;
pub mod serialize;
pub mod spec;
pub mod transform;

pub use answers::{AnswerValue, QuestionAnswers, SurveyAnswers};
pub use api::{
    ApiQuestionSkipLogic, ApiSkipLogicRule, rules_to_api, skip_logic_from_api, skip_logic_to_api,
};
pub use config::EngineConfig;
pub use error::{DecodeError, ParseError, ReductionError, SkipLogicError};
pub use evaluate::{condition_holds, evaluate, evaluate_with};
pub use expr::{Expr, parse_expression, parse_expression_with};
pub use handler::{DefaultQuestionHandler, QuestionHandler};
pub use ids::{IdGenerator, SequentialIds, UuidIds};
pub use maintain::{
    DestinationTarget, allowed_counts, allowed_destinations, allowed_options, maintain_survey,
};
pub use preview::{PreviewQuestion, PreviewScreen, ScreenKind, build_preview, build_preview_with};
pub use sections::{SplitOutcome, auto_split_sections, split_sections};
pub use serialize::expression_from_conditions;
pub use spec::{
    AnswerOption, Clause, ConditionKind, CountCondition, OptionCondition, QuestionItem,
    QuestionItemSkipLogic, QuestionType, SelectionMode, SkipLogicCondition, SkipLogicDestination,
    SkipLogicRule, SurveyItem, SurveySection, TargetType,
};
pub use transform::{
    conditions_from_expression, conditions_from_expression_with, try_conditions_from_expression,
};
