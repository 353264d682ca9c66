use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company profile captured in wizard step 1.
///
/// Display-only: the scoring engine never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub target_market: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The kind of answer a question expects.
///
/// Serialized as `boolean` / `number` / `multiple_choice` to stay compatible
/// with session files exported by the hosted frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Boolean,
    Number,
    MultipleChoice,
}

impl QuestionKind {
    /// Human-readable label for prompts and error messages
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::Boolean => "yes/no",
            QuestionKind::Number => "number",
            QuestionKind::MultipleChoice => "multiple choice",
        }
    }
}

/// A weighted evaluation question built in wizard step 2.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    /// Relative importance; contributes to both earned and maximum score
    pub weight: f64,
    /// Selectable options, present only for multiple choice questions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A target account to be scored, captured in wizard step 3.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub company_size: String,
    pub revenue: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Time since the account was added
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }
}

/// A recorded answer value, typed by the owning question's kind.
///
/// Untagged so the JSON wire shape stays the plain `boolean|number|string`
/// union that prior exports used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Choice(String),
}

impl AnswerValue {
    /// The question kind this value belongs to
    pub fn kind(&self) -> QuestionKind {
        match self {
            AnswerValue::Bool(_) => QuestionKind::Boolean,
            AnswerValue::Number(_) => QuestionKind::Number,
            AnswerValue::Choice(_) => QuestionKind::MultipleChoice,
        }
    }

    /// Render the value the way the wizard collected it
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Bool(true) => "yes".to_string(),
            AnswerValue::Bool(false) => "no".to_string(),
            AnswerValue::Number(n) => format!("{}", n),
            AnswerValue::Choice(s) => s.clone(),
        }
    }
}

/// One account's answer to one question.
///
/// At most one exists per (account, question) pair; re-recording replaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAnswer {
    pub id: String,
    pub account_id: String,
    pub question_id: String,
    #[serde(rename = "answer")]
    pub value: AnswerValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_value_kind() {
        assert_eq!(AnswerValue::Bool(true).kind(), QuestionKind::Boolean);
        assert_eq!(AnswerValue::Number(3.0).kind(), QuestionKind::Number);
        assert_eq!(
            AnswerValue::Choice("NA".to_string()).kind(),
            QuestionKind::MultipleChoice
        );
    }

    #[test]
    fn test_answer_value_untagged_json() {
        let bool_val: AnswerValue = serde_json::from_str("true").unwrap();
        assert_eq!(bool_val, AnswerValue::Bool(true));

        let num_val: AnswerValue = serde_json::from_str("5").unwrap();
        assert_eq!(num_val, AnswerValue::Number(5.0));

        let choice_val: AnswerValue = serde_json::from_str("\"EMEA\"").unwrap();
        assert_eq!(choice_val, AnswerValue::Choice("EMEA".to_string()));
    }

    #[test]
    fn test_question_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&QuestionKind::MultipleChoice).unwrap(),
            "\"multiple_choice\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionKind::Boolean).unwrap(),
            "\"boolean\""
        );
    }

    #[test]
    fn test_question_type_field_name() {
        let question = Question {
            id: "q1".to_string(),
            text: "Has an engineering team?".to_string(),
            kind: QuestionKind::Boolean,
            weight: 10.0,
            options: Vec::new(),
            company_id: None,
            owner_id: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"type\":\"boolean\""));
        // Empty options are omitted entirely
        assert!(!json.contains("options"));
    }

    #[test]
    fn test_answer_field_name() {
        let answer = AccountAnswer {
            id: "ans1".to_string(),
            account_id: "a1".to_string(),
            question_id: "q1".to_string(),
            value: AnswerValue::Bool(true),
            owner_id: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&answer).unwrap();
        assert!(json.contains("\"answer\":true"));
        assert!(json.contains("\"accountId\":\"a1\""));
    }
}
