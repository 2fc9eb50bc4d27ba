use actix_web::{post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::request::QuizRequest};

#[post("/quizzes")]
pub async fn play_quiz(
    state: web::Data<AppState>,
    request: web::Json<QuizRequest>,
) -> Result<HttpResponse, AppError> {
    let (category, previous) = request.into_inner().into_parts()?;
    let response = state
        .question_service
        .next_quiz_question(category, &previous)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
