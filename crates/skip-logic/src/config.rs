use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_REDUCTION_ITERATIONS: usize = 50;
pub const DEFAULT_MAX_EXPRESSION_DEPTH: usize = 1024;

/// Limits applied while parsing and evaluating skip-logic expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Cap on triple collapses per reduction phase (`and`, then `or`).
    #[serde(default = "default_max_reduction_iterations")]
    pub max_reduction_iterations: usize,
    /// Deepest logical nesting accepted by the parser.
    #[serde(default = "default_max_expression_depth")]
    pub max_expression_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_reduction_iterations: DEFAULT_MAX_REDUCTION_ITERATIONS,
            max_expression_depth: DEFAULT_MAX_EXPRESSION_DEPTH,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

fn default_max_reduction_iterations() -> usize {
    DEFAULT_MAX_REDUCTION_ITERATIONS
}

fn default_max_expression_depth() -> usize {
    DEFAULT_MAX_EXPRESSION_DEPTH
}
