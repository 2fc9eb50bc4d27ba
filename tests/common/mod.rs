#![allow(dead_code, unused_macros, unused_imports)]

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use trivia_cafe_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Category, Drink, Question, QuestionDraft, RecipePart},
    repositories::{CategoryRepository, DrinkRepository, QuestionRepository},
};

pub const TEST_SECRET: &str = "integration_secret_that_is_long_enough_123";

/// Builds the full actix app around `$state`, as `main` does.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(trivia_cafe_server::middleware::RequestIdMiddleware)
                .configure(trivia_cafe_server::handlers::configure)
                .default_service(actix_web::web::to(trivia_cafe_server::handlers::not_found)),
        )
        .await
    };
}
pub(crate) use init_app;

pub fn test_config() -> Config {
    Config {
        app_env: "test".to_string(),
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "trivia-cafe-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        jwt_secret: SecretString::from(TEST_SECRET.to_string()),
        auth_public_key_pem: None,
        auth_audience: None,
        auth_issuer: None,
        questions_per_page: 10,
        cors_allowed_origin: "*".to_string(),
    }
}

pub struct TestContext {
    pub state: AppState,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub drinks: Arc<InMemoryDrinkRepository>,
}

impl TestContext {
    pub fn seeded() -> Self {
        Self::build(seed_categories(), seed_questions(), seed_drinks())
    }

    pub fn empty() -> Self {
        Self::build(vec![], vec![], vec![])
    }

    fn build(categories: Vec<Category>, questions: Vec<Question>, drinks: Vec<Drink>) -> Self {
        let questions = Arc::new(InMemoryQuestionRepository::with(questions));
        let categories = Arc::new(InMemoryCategoryRepository::with(categories));
        let drinks = Arc::new(InMemoryDrinkRepository::with(drinks));

        let state = AppState::with_repositories(
            test_config(),
            questions.clone(),
            categories.clone(),
            drinks.clone(),
        )
        .expect("state should build");

        Self {
            state,
            questions,
            categories,
            drinks,
        }
    }
}

pub fn seed_categories() -> Vec<Category> {
    ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .iter()
        .enumerate()
        .map(|(i, name)| Category::new(i as i64 + 1, name))
        .collect()
}

/// 14 questions; category 1 (Science) holds ids 1, 2 and 3.
pub fn seed_questions() -> Vec<Question> {
    vec![
        Question::new(1, "What is the heaviest organ in the human body?", "The Liver", 1, 4),
        Question::new(2, "Who discovered penicillin?", "Alexander Fleming", 1, 3),
        Question::new(3, "Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
        Question::new(4, "Which Dutch graphic artist made mathematical lithographs?", "Escher", 2, 1),
        Question::new(5, "La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        Question::new(6, "How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
        Question::new(7, "What is the largest lake in Africa?", "Lake Victoria", 3, 2),
        Question::new(8, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
        Question::new(9, "The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
        Question::new(10, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
        Question::new(11, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
        Question::new(12, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
        Question::new(13, "What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
        Question::new(14, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    ]
}

pub fn seed_drinks() -> Vec<Drink> {
    vec![
        Drink::new(
            1,
            "Water",
            vec![RecipePart {
                name: "Water".to_string(),
                color: "blue".to_string(),
                parts: 1,
            }],
        ),
        Drink::new(
            2,
            "Matcha Shake",
            vec![
                RecipePart {
                    name: "milk".to_string(),
                    color: "grey".to_string(),
                    parts: 1,
                },
                RecipePart {
                    name: "matcha".to_string(),
                    color: "green".to_string(),
                    parts: 3,
                },
            ],
        ),
    ]
}

pub fn mint_token(secret: &str, payload: &Value) -> String {
    encode(
        &Header::default(),
        payload,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token should encode")
}

pub fn bearer(permissions: &[&str]) -> String {
    let now = Utc::now();
    let token = mint_token(
        TEST_SECRET,
        &json!({
            "sub": "auth0|barista",
            "permissions": permissions,
            "iat": now.timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
        }),
    );
    format!("Bearer {}", token)
}

pub fn expired_bearer(permissions: &[&str]) -> String {
    let now = Utc::now();
    let token = mint_token(
        TEST_SECRET,
        &json!({
            "sub": "auth0|barista",
            "permissions": permissions,
            "iat": (now - Duration::hours(3)).timestamp(),
            "exp": (now - Duration::hours(2)).timestamp(),
        }),
    );
    format!("Bearer {}", token)
}

fn page<T: Clone>(items: &[T], offset: u64, limit: u64) -> Vec<T> {
    items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect()
}

pub struct InMemoryQuestionRepository {
    questions: RwLock<BTreeMap<i64, Question>>,
}

impl InMemoryQuestionRepository {
    pub fn with(questions: Vec<Question>) -> Self {
        Self {
            questions: RwLock::new(questions.into_iter().map(|q| (q.id, q)).collect()),
        }
    }

    async fn filtered<F>(&self, keep: F) -> Vec<Question>
    where
        F: Fn(&Question) -> bool,
    {
        let questions = self.questions.read().await;
        questions.values().filter(|q| keep(q)).cloned().collect()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, draft: QuestionDraft) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        let id = questions.keys().next_back().copied().unwrap_or(0) + 1;
        let question = draft.into_question(id);
        questions.insert(id, question.clone());
        Ok(question)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.get(&id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)> {
        let items = self.filtered(|_| true).await;
        Ok((page(&items, offset, limit), items.len() as u64))
    }

    async fn list_by_category(
        &self,
        category: i64,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Question>, u64)> {
        let items = self.filtered(|q| q.category == category).await;
        Ok((page(&items, offset, limit), items.len() as u64))
    }

    async fn search(
        &self,
        term: &str,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Question>, u64)> {
        let needle = term.to_lowercase();
        let items = self
            .filtered(|q| q.text.to_lowercase().contains(&needle))
            .await;
        Ok((page(&items, offset, limit), items.len() as u64))
    }

    async fn find_pool(&self, category: Option<i64>) -> AppResult<Vec<Question>> {
        Ok(self
            .filtered(|q| category.map(|c| q.category == c).unwrap_or(true))
            .await)
    }

    async fn count(&self) -> AppResult<u64> {
        let questions = self.questions.read().await;
        Ok(questions.len() as u64)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        questions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }
}

pub struct InMemoryCategoryRepository {
    categories: RwLock<BTreeMap<i64, Category>>,
}

impl InMemoryCategoryRepository {
    pub fn with(categories: Vec<Category>) -> Self {
        Self {
            categories: RwLock::new(categories.into_iter().map(|c| (c.id, c)).collect()),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }
}

pub struct InMemoryDrinkRepository {
    drinks: RwLock<BTreeMap<i64, Drink>>,
}

impl InMemoryDrinkRepository {
    pub fn with(drinks: Vec<Drink>) -> Self {
        Self {
            drinks: RwLock::new(drinks.into_iter().map(|d| (d.id, d)).collect()),
        }
    }

    pub async fn titles(&self) -> Vec<String> {
        let drinks = self.drinks.read().await;
        drinks.values().map(|d| d.title.clone()).collect()
    }
}

#[async_trait]
impl DrinkRepository for InMemoryDrinkRepository {
    async fn create(&self, title: &str, recipe: Vec<RecipePart>) -> AppResult<Drink> {
        let mut drinks = self.drinks.write().await;
        if drinks.values().any(|d| d.title == title) {
            return Err(AppError::AlreadyExists(format!(
                "Drink with title '{}' already exists",
                title
            )));
        }

        let id = drinks.keys().next_back().copied().unwrap_or(0) + 1;
        let drink = Drink::new(id, title, recipe);
        drinks.insert(id, drink.clone());
        Ok(drink)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Drink>> {
        let drinks = self.drinks.read().await;
        Ok(drinks.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Drink>> {
        let drinks = self.drinks.read().await;
        Ok(drinks.values().cloned().collect())
    }

    async fn update(&self, drink: Drink) -> AppResult<Drink> {
        let mut drinks = self.drinks.write().await;
        if !drinks.contains_key(&drink.id) {
            return Err(AppError::NotFound(format!(
                "Drink with id '{}' not found",
                drink.id
            )));
        }
        if drinks
            .values()
            .any(|d| d.id != drink.id && d.title == drink.title)
        {
            return Err(AppError::AlreadyExists(format!(
                "Drink with title '{}' already exists",
                drink.title
            )));
        }

        drinks.insert(drink.id, drink.clone());
        Ok(drink)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut drinks = self.drinks.write().await;
        drinks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Drink with id '{}' not found", id)))
    }
}
