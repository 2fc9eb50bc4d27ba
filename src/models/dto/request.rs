use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{QuestionDraft, RecipePart},
};

/// Browser clients send select-box values as strings, so ids and scores are
/// accepted either as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(n)) => Ok(Some(n)),
        Some(IntOrString::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn missing(field: &str) -> AppError {
    AppError::ValidationError(format!("missing field '{}'", field))
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PageParams {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: Some(1) }
    }
}

impl PageParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Offset of the first item of this page. A page too far out to be
    /// addressed is reported as not found, like any other page past the end.
    pub fn offset(&self, per_page: u64) -> AppResult<u64> {
        (self.page() - 1)
            .checked_mul(per_page)
            .filter(|offset| *offset <= i64::MAX as u64)
            .ok_or_else(|| AppError::NotFound(format!("Page {} is out of range", self.page())))
    }
}

/// Body of `POST /questions`, which either searches or creates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsPostRequest {
    #[serde(rename = "searchTerm", alias = "search_term", default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub difficulty: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub category: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionsPost {
    Search(String),
    Create(CreateQuestionRequest),
}

impl QuestionsPostRequest {
    pub fn into_action(self) -> AppResult<QuestionsPost> {
        if let Some(term) = self.search_term.filter(|t| !t.is_empty()) {
            return Ok(QuestionsPost::Search(term));
        }

        let request = CreateQuestionRequest {
            question: self.question.ok_or_else(|| missing("question"))?,
            answer: self.answer.ok_or_else(|| missing("answer"))?,
            difficulty: self.difficulty.ok_or_else(|| missing("difficulty"))?,
            category: self.category.ok_or_else(|| missing("category"))?,
        };
        request.validate()?;

        Ok(QuestionsPost::Create(request))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    #[validate(length(min = 1, max = 1000))]
    pub answer: String,

    #[validate(range(min = 1, max = 5))]
    pub difficulty: i64,

    #[validate(range(min = 1))]
    pub category: i64,
}

impl From<CreateQuestionRequest> for QuestionDraft {
    fn from(request: CreateQuestionRequest) -> Self {
        QuestionDraft {
            text: request.question,
            answer: request.answer,
            category: request.category,
            // Range-checked to 1..=5 by validation
            difficulty: request.difficulty as i32,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategoryRef {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<i64>,
    #[serde(rename = "type", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<i64>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategoryRef>,
}

impl QuizRequest {
    /// Returns the category id and the ids already played.
    pub fn into_parts(self) -> AppResult<(i64, Vec<i64>)> {
        let previous = self.previous_questions.ok_or_else(|| {
            AppError::BadRequest("missing field 'previous_questions'".to_string())
        })?;
        let category = self
            .quiz_category
            .and_then(|c| c.id)
            .ok_or_else(|| AppError::BadRequest("missing field 'quiz_category.id'".to_string()))?;

        Ok((category, previous))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipePartInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub color: String,

    #[validate(range(min = 1, max = 100))]
    pub parts: i32,
}

/// A recipe may be posted as a single part or as a list of parts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<RecipePartInput>),
    One(RecipePartInput),
}

impl RecipeInput {
    pub fn into_recipe(self) -> AppResult<Vec<RecipePart>> {
        let parts = match self {
            RecipeInput::Many(parts) => parts,
            RecipeInput::One(part) => vec![part],
        };

        if parts.is_empty() {
            return Err(AppError::ValidationError(
                "recipe needs at least one part".to_string(),
            ));
        }

        parts
            .into_iter()
            .map(|part| -> AppResult<RecipePart> {
                part.validate()?;
                Ok(RecipePart {
                    name: part.name,
                    color: part.color,
                    parts: part.parts,
                })
            })
            .collect()
    }
}

fn validate_title(title: String) -> AppResult<String> {
    let title = title.trim().to_string();
    if title.is_empty() || title.chars().count() > 100 {
        return Err(AppError::ValidationError(
            "title must be between 1 and 100 characters".to_string(),
        ));
    }
    Ok(title)
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDrinkRequest {
    #[serde(alias = "titel", default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

impl CreateDrinkRequest {
    pub fn into_parts(self) -> AppResult<(String, Vec<RecipePart>)> {
        let title = validate_title(self.title.ok_or_else(|| missing("title"))?)?;
        let recipe = self.recipe.ok_or_else(|| missing("recipe"))?.into_recipe()?;
        Ok((title, recipe))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkChanges {
    pub title: Option<String>,
    pub recipe: Option<Vec<RecipePart>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDrinkRequest {
    #[serde(alias = "titel", default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

impl UpdateDrinkRequest {
    pub fn into_changes(self) -> AppResult<DrinkChanges> {
        if self.title.is_none() && self.recipe.is_none() {
            return Err(AppError::ValidationError(
                "nothing to update: provide a title or a recipe".to_string(),
            ));
        }

        Ok(DrinkChanges {
            title: self.title.map(validate_title).transpose()?,
            recipe: self.recipe.map(RecipeInput::into_recipe).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_selects_search() {
        let body: QuestionsPostRequest =
            serde_json::from_str(r#"{"searchTerm":"title"}"#).unwrap();

        assert_eq!(
            body.into_action().unwrap(),
            QuestionsPost::Search("title".to_string())
        );
    }

    #[test]
    fn test_empty_search_term_falls_through_to_create() {
        let body: QuestionsPostRequest = serde_json::from_str(
            r#"{"searchTerm":"","question":"Q?","answer":"A","difficulty":"2","category":"3"}"#,
        )
        .unwrap();

        match body.into_action().unwrap() {
            QuestionsPost::Create(request) => {
                assert_eq!(request.difficulty, 2);
                assert_eq!(request.category, 3);
            }
            other => panic!("Expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_create_with_missing_answer_is_unprocessable() {
        let body: QuestionsPostRequest =
            serde_json::from_str(r#"{"question":"Q?","difficulty":1,"category":1}"#).unwrap();

        assert!(matches!(
            body.into_action(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_create_with_out_of_range_difficulty() {
        let body: QuestionsPostRequest = serde_json::from_str(
            r#"{"question":"Q?","answer":"A","difficulty":9,"category":1}"#,
        )
        .unwrap();

        assert!(matches!(
            body.into_action(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_page_offset() {
        let params = PageParams { page: Some(3) };
        assert_eq!(params.offset(10).unwrap(), 20);
        assert_eq!(PageParams::default().offset(10).unwrap(), 0);
        assert!(PageParams { page: Some(0) }.validate().is_err());
    }

    #[test]
    fn test_huge_page_is_not_found() {
        let params = PageParams {
            page: Some(u64::MAX),
        };
        assert!(params.validate().is_ok());
        assert!(matches!(params.offset(10), Err(AppError::NotFound(_))));

        let params = PageParams {
            page: Some(i64::MAX as u64),
        };
        assert!(matches!(params.offset(10), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_quiz_request_accepts_string_category_id() {
        let body: QuizRequest = serde_json::from_str(
            r#"{"previous_questions":[1,2],"quiz_category":{"type":"Science","id":"1"}}"#,
        )
        .unwrap();

        assert_eq!(body.into_parts().unwrap(), (1, vec![1, 2]));
    }

    #[test]
    fn test_quiz_request_requires_both_fields() {
        let body: QuizRequest =
            serde_json::from_str(r#"{"quiz_category":{"id":0}}"#).unwrap();
        assert!(matches!(body.into_parts(), Err(AppError::BadRequest(_))));

        let body: QuizRequest = serde_json::from_str(r#"{"previous_questions":[]}"#).unwrap();
        assert!(matches!(body.into_parts(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_drink_recipe_single_part_and_titel_alias() {
        let body: CreateDrinkRequest = serde_json::from_str(
            r#"{"titel":"Water","recipe":{"name":"Water","color":"blue","parts":1}}"#,
        )
        .unwrap();

        let (title, recipe) = body.into_parts().unwrap();
        assert_eq!(title, "Water");
        assert_eq!(recipe.len(), 1);
        assert_eq!(recipe[0].color, "blue");
    }

    #[test]
    fn test_drink_without_recipe_is_unprocessable() {
        let body: CreateDrinkRequest = serde_json::from_str(r#"{"title":"Latte"}"#).unwrap();
        assert!(matches!(
            body.into_parts(),
            Err(AppError::ValidationError(_))
        ));

        let body: CreateDrinkRequest =
            serde_json::from_str(r#"{"title":"Latte","recipe":[]}"#).unwrap();
        assert!(matches!(
            body.into_parts(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_empty_drink_update_is_rejected() {
        let body: UpdateDrinkRequest = serde_json::from_str("{}").unwrap();
        assert!(body.into_changes().is_err());

        let body: UpdateDrinkRequest =
            serde_json::from_str(r#"{"title":"  Flat white "}"#).unwrap();
        let changes = body.into_changes().unwrap();
        assert_eq!(changes.title.as_deref(), Some("Flat white"));
        assert!(changes.recipe.is_none());
    }
}
