use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::response::{category_map, CategoriesResponse},
    repositories::CategoryRepository,
};

pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_categories(&self) -> AppResult<CategoriesResponse> {
        let categories = self.repository.find_all().await?;

        if categories.is_empty() {
            return Err(AppError::NotFound("No categories defined".to_string()));
        }

        Ok(CategoriesResponse {
            success: true,
            categories: category_map(&categories),
        })
    }
}
