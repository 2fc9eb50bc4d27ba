use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{Authorized, DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks},
    errors::AppError,
    models::dto::request::{CreateDrinkRequest, UpdateDrinkRequest},
};

#[get("/drinks")]
pub async fn get_drinks(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let response = state.drink_service.list_short().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/drinks-detail")]
pub async fn get_drinks_detail(
    _auth: Authorized<GetDrinksDetail>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let response = state.drink_service.list_long().await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/drinks")]
pub async fn create_drink(
    auth: Authorized<PostDrinks>,
    state: web::Data<AppState>,
    request: web::Json<CreateDrinkRequest>,
) -> Result<HttpResponse, AppError> {
    log::debug!("{:?} creating a drink with {}", auth.claims.sub, auth.permission());
    let response = state.drink_service.create(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/drinks/{id}")]
pub async fn update_drink(
    _auth: Authorized<PatchDrinks>,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    request: web::Json<UpdateDrinkRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .drink_service
        .update(id.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/drinks/{id}")]
pub async fn delete_drink(
    _auth: Authorized<DeleteDrinks>,
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = state.drink_service.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
