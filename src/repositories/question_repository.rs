use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Question, QuestionDraft},
};

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, draft: QuestionDraft) -> AppResult<Question>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>>;
    /// Page of all questions ordered by id, with the total count.
    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)>;
    async fn list_by_category(
        &self,
        category: i64,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Question>, u64)>;
    /// Case-insensitive substring match on the question text.
    async fn search(&self, term: &str, offset: u64, limit: u64)
        -> AppResult<(Vec<Question>, u64)>;
    /// Every question of `category`, or of all categories when `None`.
    async fn find_pool(&self, category: Option<i64>) -> AppResult<Vec<Question>>;
    async fn count(&self) -> AppResult<u64>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    db: Database,
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("questions");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        let category_index = IndexModel::builder().keys(doc! { "category": 1 }).build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(category_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }

    async fn find_page(
        &self,
        filter: Document,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Question>, u64)> {
        let total = self.collection.count_documents(filter.clone()).await?;

        let find_options = FindOptions::builder()
            .sort(doc! { "id": 1 })
            .skip(Some(offset))
            .limit(Some(limit as i64))
            .build();

        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let items: Vec<Question> = cursor.try_collect().await?;

        Ok((items, total))
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, draft: QuestionDraft) -> AppResult<Question> {
        let id = self.db.next_id("questions").await?;
        let question = draft.into_question(id);
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<(Vec<Question>, u64)> {
        self.find_page(doc! {}, offset, limit).await
    }

    async fn list_by_category(
        &self,
        category: i64,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Question>, u64)> {
        self.find_page(doc! { "category": category }, offset, limit)
            .await
    }

    async fn search(
        &self,
        term: &str,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Question>, u64)> {
        let filter = doc! {
            "question": { "$regex": regex::escape(term), "$options": "i" }
        };
        self.find_page(filter, offset, limit).await
    }

    async fn find_pool(&self, category: Option<i64>) -> AppResult<Vec<Question>> {
        let filter = match category {
            Some(category) => doc! { "category": category },
            None => doc! {},
        };

        let cursor = self.collection.find(filter).await?;
        let items: Vec<Question> = cursor.try_collect().await?;
        Ok(items)
    }

    async fn count(&self) -> AppResult<u64> {
        let total = self.collection.count_documents(doc! {}).await?;
        Ok(total)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
