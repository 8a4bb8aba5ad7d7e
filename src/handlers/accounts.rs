use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::AccountService;
use crate::domain::account::Account;
use crate::domain::errors::DomainError;
use crate::domain::ports::UnitOfWorkFactory;
use crate::errors::AppError;

use super::purchased_softwares::PurchasedSoftwareResponse;
use super::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
    pub purchased_softwares: Vec<PurchasedSoftwareResponse>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            customer_id: account.customer_id,
            name: account.name,
            purchased_softwares: account
                .purchased_softwares
                .into_iter()
                .map(PurchasedSoftwareResponse::from)
                .collect(),
        }
    }
}

/// GET /accounts/{id}
///
/// Returns the account with every purchase it holds, cancelled ones included.
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    params(
        ("id" = i64, Path, description = "Account id"),
    ),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "accounts"
)]
pub async fn get_account<F: UnitOfWorkFactory>(
    state: web::Data<AppState<F>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();

    let account = web::block(move || -> Result<_, DomainError> {
        AccountService::new(state.uow_factory.begin()?).get_with_purchased_softwares(account_id)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    match account {
        Some(account) => Ok(HttpResponse::Ok().json(AccountResponse::from(account))),
        None => Err(DomainError::not_found(Account::ENTITY, account_id).into()),
    }
}
