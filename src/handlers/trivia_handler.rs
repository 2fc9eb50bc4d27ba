use actix_web::{delete, get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::{AppError, AppResult},
    models::dto::request::{PageParams, QuestionsPost, QuestionsPostRequest},
};

fn checked_page(query: web::Query<PageParams>) -> AppResult<PageParams> {
    let page = query.into_inner();
    page.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(page)
}

#[get("/categories")]
pub async fn get_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let response = state.category_service.get_categories().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/questions")]
pub async fn get_questions(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = checked_page(query)?;
    let response = state.question_service.list_page(&page).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/questions")]
pub async fn post_questions(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
    body: web::Json<QuestionsPostRequest>,
) -> Result<HttpResponse, AppError> {
    let page = checked_page(query)?;

    match body.into_inner().into_action()? {
        QuestionsPost::Search(term) => {
            let response = state.question_service.search(&term, &page).await?;
            Ok(HttpResponse::Ok().json(response))
        }
        QuestionsPost::Create(request) => {
            let response = state.question_service.create(request, &page).await?;
            Ok(HttpResponse::Ok().json(response))
        }
    }
}

#[delete("/questions/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = state.question_service.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/categories/{id}/questions")]
pub async fn get_category_questions(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = checked_page(query)?;
    let response = state
        .question_service
        .list_by_category(id.into_inner(), &page)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
