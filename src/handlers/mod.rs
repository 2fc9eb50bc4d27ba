pub mod drink_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod trivia_handler;

use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::errors::AppError;

pub use drink_handler::{create_drink, delete_drink, get_drinks, get_drinks_detail, update_drink};
pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::play_quiz;
pub use trivia_handler::{
    delete_question, get_categories, get_category_questions, get_questions, post_questions,
};

/// Registers every route together with extractor error handlers that keep
/// failures in the `{success, error, message}` shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::NotFound(err.to_string()).into()
    }))
    .service(health_check)
    .service(health_check_ready)
    .service(get_categories)
    .service(get_questions)
    .service(post_questions)
    .service(delete_question)
    .service(get_category_questions)
    .service(play_quiz)
    .service(get_drinks)
    .service(get_drinks_detail)
    .service(create_drink)
    .service(update_drink)
    .service(delete_drink);
}

/// Fallback for unknown routes.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    AppError::NotFound(format!("No route for {} {}", req.method(), req.path())).error_response()
}
