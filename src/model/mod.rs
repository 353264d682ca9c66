mod types;

pub use types::{Account, AccountAnswer, AnswerValue, Company, Question, QuestionKind};
