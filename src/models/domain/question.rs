use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trivia question. The text travels as `question` on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    #[serde(rename = "question")]
    pub text: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(id: i64, text: &str, answer: &str, category: i64, difficulty: i32) -> Self {
        Question {
            id,
            text: text.to_string(),
            answer: answer.to_string(),
            category,
            difficulty,
            created_at: Some(Utc::now()),
        }
    }
}

/// Fields of a question that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl QuestionDraft {
    pub fn into_question(self, id: i64) -> Question {
        Question {
            id,
            text: self.text,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
            created_at: Some(Utc::now()),
        }
    }
}
