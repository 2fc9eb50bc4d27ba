use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Drink {
    pub id: i64,
    pub title: String, // Unique across the menu
    pub recipe: Vec<RecipePart>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecipePart {
    pub name: String,
    pub color: String,
    pub parts: i32,
}

impl Drink {
    pub fn new(id: i64, title: &str, recipe: Vec<RecipePart>) -> Self {
        Drink {
            id,
            title: title.to_string(),
            recipe,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}
