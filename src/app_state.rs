use std::sync::Arc;

use crate::{
    auth::PermissionChecker,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        CategoryRepository, DrinkRepository, MongoCategoryRepository, MongoDrinkRepository,
        MongoQuestionRepository, QuestionRepository,
    },
    services::{
        category_service::CategoryService, drink_service::DrinkService,
        question_service::QuestionService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub question_service: Arc<QuestionService>,
    pub category_service: Arc<CategoryService>,
    pub drink_service: Arc<DrinkService>,
    pub permission_checker: Arc<PermissionChecker>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let category_repository = Arc::new(MongoCategoryRepository::new(&db));
        category_repository.ensure_indexes().await?;

        let drink_repository = Arc::new(MongoDrinkRepository::new(&db));
        drink_repository.ensure_indexes().await?;

        let mut state = Self::with_repositories(
            config,
            question_repository,
            category_repository,
            drink_repository,
        )?;
        state.db = Some(db);

        Ok(state)
    }

    /// Wires services over the given repositories without a database handle.
    pub fn with_repositories(
        config: Config,
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
        drinks: Arc<dyn DrinkRepository>,
    ) -> AppResult<Self> {
        let permission_checker = Arc::new(PermissionChecker::from_config(&config)?);

        Ok(Self {
            question_service: Arc::new(QuestionService::new(
                questions,
                categories.clone(),
                config.questions_per_page,
            )),
            category_service: Arc::new(CategoryService::new(categories)),
            drink_service: Arc::new(DrinkService::new(drinks)),
            permission_checker,
            db: None,
            config: Arc::new(config),
        })
    }
}
