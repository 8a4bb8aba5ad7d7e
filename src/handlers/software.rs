use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::OrderService;
use crate::domain::catalog::SoftwareOffering;
use crate::domain::errors::DomainError;
use crate::domain::ports::UnitOfWorkFactory;
use crate::errors::AppError;

use super::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct SoftwareOfferingResponse {
    pub sku: String,
    pub name: String,
    pub vendor: String,
}

impl From<&SoftwareOffering> for SoftwareOfferingResponse {
    fn from(o: &SoftwareOffering) -> Self {
        Self {
            sku: o.sku.to_string(),
            name: o.name.to_string(),
            vendor: o.vendor.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderSoftwareRequest {
    /// Product name as listed by GET /software, e.g. "Zoom"
    pub service_name: String,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSoftwareResponse {
    pub account_id: i64,
    pub service_name: String,
    pub quantity: i32,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /software
///
/// Lists every product that can be ordered.
#[utoipa::path(
    get,
    path = "/software",
    responses(
        (status = 200, description = "Software catalog", body = [SoftwareOfferingResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "software"
)]
pub async fn list_software<F: UnitOfWorkFactory>(
    state: web::Data<AppState<F>>,
) -> Result<HttpResponse, AppError> {
    let offerings = web::block(move || -> Result<_, DomainError> {
        let uow = state.uow_factory.begin()?;
        let service = OrderService::new(uow, state.catalog);
        Ok(service
            .get_software_services()
            .iter()
            .map(SoftwareOfferingResponse::from)
            .collect::<Vec<_>>())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(offerings))
}

/// POST /accounts/{id}/orders
///
/// Orders a license for the account. The account may hold only one active
/// license per product.
#[utoipa::path(
    post,
    path = "/accounts/{id}/orders",
    params(
        ("id" = i64, Path, description = "Account id"),
    ),
    request_body = OrderSoftwareRequest,
    responses(
        (status = 201, description = "License ordered", body = OrderSoftwareResponse),
        (status = 400, description = "Unknown account or invalid quantity"),
        (status = 409, description = "Account already holds an active license"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "software"
)]
pub async fn order_software<F: UnitOfWorkFactory>(
    state: web::Data<AppState<F>>,
    path: web::Path<i64>,
    body: web::Json<OrderSoftwareRequest>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();
    let OrderSoftwareRequest {
        service_name,
        quantity,
    } = body.into_inner();

    let service_name = web::block(move || -> Result<_, DomainError> {
        let uow = state.uow_factory.begin()?;
        OrderService::new(uow, state.catalog)
            .with_license_term(state.license_term)
            .order_software(account_id, &service_name, quantity)?;
        Ok(service_name)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderSoftwareResponse {
        account_id,
        service_name,
        quantity,
    }))
}
