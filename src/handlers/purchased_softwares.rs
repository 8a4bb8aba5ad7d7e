use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::PurchasedSoftwareService;
use crate::domain::errors::DomainError;
use crate::domain::ports::UnitOfWorkFactory;
use crate::domain::purchased_software::PurchasedSoftware;
use crate::errors::AppError;

use super::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchasedSoftwareResponse {
    pub id: Option<i64>,
    pub account_id: i64,
    pub name: String,
    pub quantity: i32,
    /// "Active" or "Cancelled"
    pub state: String,
    pub valid_to: DateTime<Utc>,
}

impl From<PurchasedSoftware> for PurchasedSoftwareResponse {
    fn from(p: PurchasedSoftware) -> Self {
        Self {
            id: p.id,
            account_id: p.account_id,
            name: p.name,
            quantity: p.quantity,
            state: p.state.to_string(),
            valid_to: p.valid_to,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangeQuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtendExpiryRequest {
    /// New end of validity, RFC 3339.
    pub valid_to: DateTime<Utc>,
}

/// Runs one `PurchasedSoftwareService` call on the blocking pool.
async fn run<F, Op>(state: web::Data<AppState<F>>, op: Op) -> Result<HttpResponse, AppError>
where
    F: UnitOfWorkFactory,
    Op: FnOnce(
            &mut PurchasedSoftwareService<F::UnitOfWork>,
        ) -> Result<PurchasedSoftware, DomainError>
        + Send
        + 'static,
{
    let purchase = web::block(move || -> Result<_, DomainError> {
        let mut service = PurchasedSoftwareService::new(state.uow_factory.begin()?);
        op(&mut service)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(PurchasedSoftwareResponse::from(purchase)))
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /purchased-softwares/{id}/cancel
///
/// Cancels the purchase. Cancelling twice is not an error.
#[utoipa::path(
    post,
    path = "/purchased-softwares/{id}/cancel",
    params(
        ("id" = i64, Path, description = "Purchased software id"),
    ),
    responses(
        (status = 200, description = "Purchase cancelled", body = PurchasedSoftwareResponse),
        (status = 404, description = "Purchase not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "purchased-softwares"
)]
pub async fn cancel_purchase<F: UnitOfWorkFactory>(
    state: web::Data<AppState<F>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    run(state, move |service| service.cancel_purchase(id)).await
}

/// PUT /purchased-softwares/{id}/quantity
#[utoipa::path(
    put,
    path = "/purchased-softwares/{id}/quantity",
    params(
        ("id" = i64, Path, description = "Purchased software id"),
    ),
    request_body = ChangeQuantityRequest,
    responses(
        (status = 200, description = "Quantity changed", body = PurchasedSoftwareResponse),
        (status = 400, description = "Quantity is not positive"),
        (status = 404, description = "Purchase not found"),
        (status = 409, description = "Purchase is cancelled"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "purchased-softwares"
)]
pub async fn change_quantity<F: UnitOfWorkFactory>(
    state: web::Data<AppState<F>>,
    path: web::Path<i64>,
    body: web::Json<ChangeQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let quantity = body.into_inner().quantity;
    run(state, move |service| service.change_quantity(id, quantity)).await
}

/// PUT /purchased-softwares/{id}/valid-to
#[utoipa::path(
    put,
    path = "/purchased-softwares/{id}/valid-to",
    params(
        ("id" = i64, Path, description = "Purchased software id"),
    ),
    request_body = ExtendExpiryRequest,
    responses(
        (status = 200, description = "Expiry date changed", body = PurchasedSoftwareResponse),
        (status = 404, description = "Purchase not found"),
        (status = 409, description = "Purchase is cancelled"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "purchased-softwares"
)]
pub async fn extend_expiry_date<F: UnitOfWorkFactory>(
    state: web::Data<AppState<F>>,
    path: web::Path<i64>,
    body: web::Json<ExtendExpiryRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let valid_to = body.into_inner().valid_to;
    run(state, move |service| service.extend_expiry_date(id, valid_to)).await
}
