use std::{
    future::{ready, Ready},
    marker::PhantomData,
};

use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};

use crate::{
    app_state::AppState,
    auth::{AuthError, Claims},
    errors::{AppError, AppResult},
    middleware::get_request_id,
};

/// A permission string that a route requires from the caller's token.
pub trait Permission {
    const NAME: &'static str;
}

pub struct GetDrinksDetail;
pub struct PostDrinks;
pub struct PatchDrinks;
pub struct DeleteDrinks;

impl Permission for GetDrinksDetail {
    const NAME: &'static str = "get:drinks-detail";
}

impl Permission for PostDrinks {
    const NAME: &'static str = "post:drinks";
}

impl Permission for PatchDrinks {
    const NAME: &'static str = "patch:drinks";
}

impl Permission for DeleteDrinks {
    const NAME: &'static str = "delete:drinks";
}

/// Extractor that only succeeds for requests carrying a valid bearer token
/// granting `P`. Handlers taking it never run for rejected requests.
pub struct Authorized<P: Permission> {
    pub claims: Claims,
    _permission: PhantomData<fn() -> P>,
}

impl<P: Permission> Authorized<P> {
    pub fn permission(&self) -> &'static str {
        P::NAME
    }
}

impl<P: Permission> FromRequest for Authorized<P> {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize::<P>(req))
    }
}

fn authorize<P: Permission>(req: &HttpRequest) -> AppResult<Authorized<P>> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("Permission checker not configured".to_string()))?;

    let authorization = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AuthError::malformed("Authorization header is not valid text."))?,
        ),
        None => None,
    };

    let claims = state
        .permission_checker
        .check(authorization, P::NAME)
        .inspect_err(|err| {
            log::warn!(
                "[{}] Rejected {} {}: {}",
                get_request_id(req).unwrap_or_else(|| "-".to_string()),
                req.method(),
                req.path(),
                err
            )
        })?;

    Ok(Authorized {
        claims,
        _permission: PhantomData,
    })
}
