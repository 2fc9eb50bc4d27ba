use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::domain::{Category, Drink, Question, RecipePart};

/// Categories keyed by id, serialized as `{"1": "Science", ...}`.
pub type CategoryMap = BTreeMap<i64, String>;

pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories
        .iter()
        .map(|c| (c.id, c.name.clone()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionDto {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl From<Question> for QuestionDto {
    fn from(question: Question) -> Self {
        QuestionDto {
            id: question.id,
            question: question.text,
            answer: question.answer,
            category: question.category,
            difficulty: question.difficulty,
        }
    }
}

pub fn question_dtos(questions: Vec<Question>) -> Vec<QuestionDto> {
    questions.into_iter().map(QuestionDto::from).collect()
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
}

#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<QuestionDto>,
    pub total_questions: u64,
    pub categories: CategoryMap,
    pub current_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<QuestionDto>,
    pub total_questions: u64,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<QuestionDto>,
    pub total_questions: u64,
    pub current_category: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionCreatedResponse {
    pub success: bool,
    pub created: i64,
    pub question_created: String,
    pub questions: Vec<QuestionDto>,
    pub total_questions: u64,
}

#[derive(Debug, Serialize)]
pub struct QuestionDeletedResponse {
    pub success: bool,
    pub deleted: i64,
}

/// `question` is left out entirely once the quiz has run out of questions.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipePartShort {
    pub color: String,
    pub parts: i32,
}

/// Public view of a drink: colors and proportions only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<RecipePartShort>,
}

/// Full view of a drink, including ingredient names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrinkLong {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<RecipePart>,
}

impl From<Drink> for DrinkShort {
    fn from(drink: Drink) -> Self {
        DrinkShort {
            id: drink.id,
            title: drink.title,
            recipe: drink
                .recipe
                .into_iter()
                .map(|part| RecipePartShort {
                    color: part.color,
                    parts: part.parts,
                })
                .collect(),
        }
    }
}

impl From<Drink> for DrinkLong {
    fn from(drink: Drink) -> Self {
        DrinkLong {
            id: drink.id,
            title: drink.title,
            recipe: drink.recipe,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T: Serialize> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T: Serialize> DrinksResponse<T> {
    pub fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkDeletedResponse {
    pub success: bool,
    pub delete: i64,
}
