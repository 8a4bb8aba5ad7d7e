use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::CustomerService;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::ports::UnitOfWorkFactory;
use crate::errors::AppError;

use super::AppState;

// ── Response DTOs ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountSummaryResponse {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub accounts: Vec<AccountSummaryResponse>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            accounts: customer
                .accounts
                .into_iter()
                .map(|a| AccountSummaryResponse {
                    id: a.id,
                    name: a.name,
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /customers/{id}
///
/// Returns the customer together with its accounts.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    params(
        ("id" = i64, Path, description = "Customer id"),
    ),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn get_customer<F: UnitOfWorkFactory>(
    state: web::Data<AppState<F>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();

    let customer = web::block(move || -> Result<_, DomainError> {
        CustomerService::new(state.uow_factory.begin()?).get_including_accounts(customer_id)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    match customer {
        Some(customer) => Ok(HttpResponse::Ok().json(CustomerResponse::from(customer))),
        None => Err(DomainError::not_found(Customer::ENTITY, customer_id).into()),
    }
}
