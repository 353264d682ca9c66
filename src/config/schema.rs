use serde::{Deserialize, Serialize};

use crate::model::QuestionKind;

/// Optional application configuration.
///
/// Holds reusable question templates offered at the start of wizard step 2,
/// so recurring evaluations don't retype the same question set.
///
/// Example YAML:
/// ```yaml
/// templates:
///   - text: "Does the account have an in-house engineering team?"
///     type: boolean
///     weight: 10
///   - text: "How many employees use a comparable product today?"
///     type: number
///     weight: 5
///   - text: "Which region is the account based in?"
///     type: multiple_choice
///     weight: 5
///     options: ["North America", "EMEA", "APAC"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub templates: Vec<QuestionTemplate>,
}

/// One predefined question, minus the ids and timestamps a session assigns
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct QuestionTemplate {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub weight: f64,
    #[serde(default)]
    pub options: Vec<String>,
}
