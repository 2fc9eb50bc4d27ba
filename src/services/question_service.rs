use std::{collections::HashSet, sync::Arc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{category::ALL_CATEGORIES, QuestionDraft},
        dto::{
            request::{CreateQuestionRequest, PageParams},
            response::{
                category_map, question_dtos, CategoryQuestionsResponse, QuestionCreatedResponse,
                QuestionDeletedResponse, QuestionDto, QuestionPageResponse, QuizResponse,
                SearchResponse,
            },
        },
    },
    repositories::{CategoryRepository, QuestionRepository},
    services::quiz_picker,
};

pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
    per_page: u64,
}

impl QuestionService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
        per_page: u64,
    ) -> Self {
        Self {
            questions,
            categories,
            per_page,
        }
    }

    pub async fn list_page(&self, page: &PageParams) -> AppResult<QuestionPageResponse> {
        let (questions, total) = self
            .questions
            .list(page.offset(self.per_page)?, self.per_page)
            .await?;

        if questions.is_empty() {
            return Err(AppError::NotFound(format!(
                "No questions on page {}",
                page.page()
            )));
        }

        let categories = self.categories.find_all().await?;

        Ok(QuestionPageResponse {
            success: true,
            questions: question_dtos(questions),
            total_questions: total,
            categories: category_map(&categories),
            current_category: None,
        })
    }

    pub async fn search(&self, term: &str, page: &PageParams) -> AppResult<SearchResponse> {
        let (questions, total) = self
            .questions
            .search(term, page.offset(self.per_page)?, self.per_page)
            .await?;

        if total == 0 {
            return Err(AppError::NotFound(format!(
                "No questions matching '{}'",
                term
            )));
        }

        Ok(SearchResponse {
            success: true,
            questions: question_dtos(questions),
            total_questions: total,
        })
    }

    pub async fn create(
        &self,
        request: CreateQuestionRequest,
        page: &PageParams,
    ) -> AppResult<QuestionCreatedResponse> {
        let offset = page.offset(self.per_page)?;
        let question = self.questions.create(QuestionDraft::from(request)).await?;
        log::info!("Created question {} in category {}", question.id, question.category);

        let (questions, total) = self.questions.list(offset, self.per_page).await?;

        Ok(QuestionCreatedResponse {
            success: true,
            created: question.id,
            question_created: question.text,
            questions: question_dtos(questions),
            total_questions: total,
        })
    }

    pub async fn delete(&self, id: i64) -> AppResult<QuestionDeletedResponse> {
        let question = self
            .questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))?;

        self.questions.delete(question.id).await?;
        log::info!("Deleted question {}", id);

        Ok(QuestionDeletedResponse {
            success: true,
            deleted: id,
        })
    }

    pub async fn list_by_category(
        &self,
        category_id: i64,
        page: &PageParams,
    ) -> AppResult<CategoryQuestionsResponse> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!("Category with id '{}' does not exist", category_id))
            })?;

        let (questions, _) = self
            .questions
            .list_by_category(category.id, page.offset(self.per_page)?, self.per_page)
            .await?;
        let total = self.questions.count().await?;

        Ok(CategoryQuestionsResponse {
            success: true,
            questions: question_dtos(questions),
            total_questions: total,
            current_category: category.name,
        })
    }

    /// Next quiz question from `category` (0 for all) that is not in
    /// `previous`. The response carries no question once all are played.
    pub async fn next_quiz_question(
        &self,
        category: i64,
        previous: &[i64],
    ) -> AppResult<QuizResponse> {
        let filter = (category != ALL_CATEGORIES).then_some(category);
        let pool = self.questions.find_pool(filter).await?;
        let previous: HashSet<i64> = previous.iter().copied().collect();

        let question = match quiz_picker::pick(&pool, &previous) {
            Ok(question) => Some(QuestionDto::from(question.clone())),
            Err(exhausted) => {
                log::info!(
                    "Quiz over for category {}: {} ({} played)",
                    category,
                    exhausted,
                    previous.len()
                );
                None
            }
        };

        Ok(QuizResponse {
            success: true,
            question,
        })
    }
}
