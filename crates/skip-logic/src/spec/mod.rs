pub mod skip_logic;
pub mod survey;

pub use skip_logic::{
    Clause, ConditionKind, CountCondition, OptionCondition, QuestionItemSkipLogic,
    SkipLogicCondition, SkipLogicDestination, SkipLogicRule, TargetType,
};
pub use survey::{
    AnswerOption, QuestionItem, QuestionType, SelectionMode, SurveyItem, SurveySection,
};
