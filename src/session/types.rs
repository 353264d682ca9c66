use anyhow::{bail, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::{Account, AccountAnswer, AnswerValue, Company, Question, QuestionKind};
use crate::scoring::{self, EvaluationResult};

pub const SESSION_VERSION: u32 = 1;

/// Everything one wizard run collects: company profile, question set,
/// accounts, and their answers.
///
/// Scores are never part of the session; they are recomputed from it. Any
/// mutation invalidates previously returned results, so callers re-run
/// [`Session::evaluate`] after each change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub answers: Vec<AccountAnswer>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a new empty session with the current format version
    pub fn new() -> Self {
        Self {
            version: SESSION_VERSION,
            company: None,
            questions: Vec::new(),
            accounts: Vec::new(),
            answers: Vec::new(),
        }
    }

    /// Set the company profile, assigning an id and timestamp
    pub fn set_company(
        &mut self,
        name: String,
        description: String,
        industry: String,
        target_market: String,
    ) {
        self.company = Some(Company {
            id: "c1".to_string(),
            name,
            description,
            industry,
            target_market,
            owner_id: None,
            created_at: Utc::now(),
        });
    }

    /// Add a question and return its assigned id
    pub fn add_question(
        &mut self,
        text: String,
        kind: QuestionKind,
        weight: f64,
        options: Vec<String>,
    ) -> String {
        let id = next_id("q", self.questions.iter().map(|q| q.id.as_str()));
        self.questions.push(Question {
            id: id.clone(),
            text,
            kind,
            weight,
            options,
            company_id: self.company.as_ref().map(|c| c.id.clone()),
            owner_id: None,
            created_at: Utc::now(),
        });
        id
    }

    /// Add an account and return its assigned id
    #[allow(clippy::too_many_arguments)]
    pub fn add_account(
        &mut self,
        name: String,
        industry: String,
        company_size: String,
        revenue: String,
        location: String,
        website: Option<String>,
        notes: Option<String>,
    ) -> String {
        let id = next_id("a", self.accounts.iter().map(|a| a.id.as_str()));
        self.accounts.push(Account {
            id: id.clone(),
            name,
            industry,
            company_size,
            revenue,
            location,
            website,
            notes,
            owner_id: None,
            created_at: Utc::now(),
        });
        id
    }

    /// Remove a question and every answer recorded against it.
    /// Returns true if the question existed.
    pub fn remove_question(&mut self, question_id: &str) -> bool {
        let before = self.questions.len();
        self.questions.retain(|q| q.id != question_id);
        if self.questions.len() == before {
            return false;
        }
        self.answers.retain(|a| a.question_id != question_id);
        true
    }

    /// Remove an account and every answer it recorded.
    /// Returns true if the account existed.
    pub fn remove_account(&mut self, account_id: &str) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != account_id);
        if self.accounts.len() == before {
            return false;
        }
        self.answers.retain(|a| a.account_id != account_id);
        true
    }

    /// Record an answer for an (account, question) pair.
    ///
    /// The value's variant must match the question kind; unknown ids are
    /// rejected. Re-recording a pair replaces the previous answer, keeping at
    /// most one answer per pair.
    pub fn record_answer(
        &mut self,
        account_id: &str,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<()> {
        if !self.accounts.iter().any(|a| a.id == account_id) {
            bail!("Unknown account id: {}", account_id);
        }
        let Some(question) = self.questions.iter().find(|q| q.id == question_id) else {
            bail!("Unknown question id: {}", question_id);
        };
        if value.kind() != question.kind {
            bail!(
                "Answer type '{}' does not match question type '{}'",
                value.kind().label(),
                question.kind.label()
            );
        }

        if let Some(existing) = self
            .answers
            .iter_mut()
            .find(|a| a.account_id == account_id && a.question_id == question_id)
        {
            existing.value = value;
            existing.created_at = Utc::now();
            return Ok(());
        }

        let id = next_id("ans", self.answers.iter().map(|a| a.id.as_str()));
        self.answers.push(AccountAnswer {
            id,
            account_id: account_id.to_string(),
            question_id: question_id.to_string(),
            value,
            owner_id: None,
            created_at: Utc::now(),
        });
        Ok(())
    }

    /// Look up the answer for an (account, question) pair
    pub fn answer_for(&self, account_id: &str, question_id: &str) -> Option<&AccountAnswer> {
        self.answers
            .iter()
            .find(|a| a.account_id == account_id && a.question_id == question_id)
    }

    /// Run the scoring engine over the current state.
    ///
    /// Must be called again after any mutation; results are snapshots, not
    /// live views.
    pub fn evaluate(&self) -> Vec<EvaluationResult> {
        scoring::evaluate(&self.accounts, &self.questions, &self.answers)
    }
}

/// Next id for a prefix: one past the highest existing numeric suffix, so ids
/// stay unique across removals
fn next_id<'a>(prefix: &str, taken: impl Iterator<Item = &'a str>) -> String {
    let max = taken
        .filter_map(|id| id.strip_prefix(prefix)?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{}", prefix, max + 1)
}
