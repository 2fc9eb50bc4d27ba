use serde::{Deserialize, Serialize};

/// Category id that stands for "every category" when playing a quiz.
pub const ALL_CATEGORIES: i64 = 0;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: &str) -> Self {
        Category {
            id,
            name: name.to_string(),
        }
    }
}
