use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Drink, RecipePart},
};

#[async_trait]
pub trait DrinkRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the title is taken.
    async fn create(&self, title: &str, recipe: Vec<RecipePart>) -> AppResult<Drink>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Drink>>;
    /// All drinks ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Drink>>;
    async fn update(&self, drink: Drink) -> AppResult<Drink>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MongoDrinkRepository {
    db: Database,
    collection: Collection<Drink>,
}

impl MongoDrinkRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("drinks");
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for drinks collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        let title_index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("title_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(title_index).await?;

        log::info!("Successfully created indexes for drinks collection");
        Ok(())
    }
}

#[async_trait]
impl DrinkRepository for MongoDrinkRepository {
    async fn create(&self, title: &str, recipe: Vec<RecipePart>) -> AppResult<Drink> {
        let id = self.db.next_id("drinks").await?;
        let drink = Drink::new(id, title, recipe);
        self.collection.insert_one(&drink).await?;
        Ok(drink)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Drink>> {
        let drink = self.collection.find_one(doc! { "id": id }).await?;
        Ok(drink)
    }

    async fn find_all(&self) -> AppResult<Vec<Drink>> {
        let find_options = FindOptions::builder().sort(doc! { "id": 1 }).build();
        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let drinks: Vec<Drink> = cursor.try_collect().await?;
        Ok(drinks)
    }

    async fn update(&self, drink: Drink) -> AppResult<Drink> {
        let options = ReplaceOptions::builder().upsert(false).build();

        let result = self
            .collection
            .replace_one(doc! { "id": drink.id }, &drink)
            .with_options(options)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Drink with id '{}' not found",
                drink.id
            )));
        }

        Ok(drink)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Drink with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
