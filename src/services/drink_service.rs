use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{
        request::{CreateDrinkRequest, UpdateDrinkRequest},
        response::{DrinkDeletedResponse, DrinkLong, DrinkShort, DrinksResponse},
    },
    repositories::DrinkRepository,
};

pub struct DrinkService {
    repository: Arc<dyn DrinkRepository>,
}

impl DrinkService {
    pub fn new(repository: Arc<dyn DrinkRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_short(&self) -> AppResult<DrinksResponse<DrinkShort>> {
        let drinks = self.repository.find_all().await?;
        Ok(DrinksResponse::new(
            drinks.into_iter().map(DrinkShort::from).collect(),
        ))
    }

    pub async fn list_long(&self) -> AppResult<DrinksResponse<DrinkLong>> {
        let drinks = self.repository.find_all().await?;
        Ok(DrinksResponse::new(
            drinks.into_iter().map(DrinkLong::from).collect(),
        ))
    }

    pub async fn create(&self, request: CreateDrinkRequest) -> AppResult<DrinksResponse<DrinkLong>> {
        let (title, recipe) = request.into_parts()?;
        let drink = self.repository.create(&title, recipe).await?;
        log::info!("Added drink {} '{}'", drink.id, drink.title);

        Ok(DrinksResponse::new(vec![DrinkLong::from(drink)]))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateDrinkRequest,
    ) -> AppResult<DrinksResponse<DrinkLong>> {
        let mut drink = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Drink with id '{}' not found", id)))?;

        let changes = request.into_changes()?;
        if let Some(title) = changes.title {
            drink.title = title;
        }
        if let Some(recipe) = changes.recipe {
            drink.recipe = recipe;
        }
        drink.modified_at = Some(Utc::now());

        let drink = self.repository.update(drink).await?;
        log::info!("Updated drink {}", drink.id);

        Ok(DrinksResponse::new(vec![DrinkLong::from(drink)]))
    }

    pub async fn delete(&self, id: i64) -> AppResult<DrinkDeletedResponse> {
        self.repository.delete(id).await?;
        log::info!("Removed drink {}", id);

        Ok(DrinkDeletedResponse {
            success: true,
            delete: id,
        })
    }
}
