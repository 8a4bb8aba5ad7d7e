use chrono::{Duration, Utc};

use crate::domain::account::Account;
use crate::domain::catalog::{SoftwareCatalog, SoftwareOffering};
use crate::domain::errors::DomainError;
use crate::domain::ports::{AccountFilter, AccountInclude, Repository, UnitOfWork};
use crate::domain::purchased_software::PurchasedSoftware;

pub const DEFAULT_LICENSE_TERM_DAYS: i64 = 365;

/// Lists the software catalog and places orders against accounts.
pub struct OrderService<U> {
    uow: U,
    catalog: SoftwareCatalog,
    license_term: Duration,
}

impl<U: UnitOfWork> OrderService<U> {
    pub fn new(uow: U, catalog: SoftwareCatalog) -> Self {
        Self {
            uow,
            catalog,
            license_term: Duration::days(DEFAULT_LICENSE_TERM_DAYS),
        }
    }

    /// How long a newly ordered license stays valid.
    pub fn with_license_term(mut self, license_term: Duration) -> Self {
        self.license_term = license_term;
        self
    }

    pub fn get_software_services(&self) -> &'static [SoftwareOffering] {
        self.catalog.offerings()
    }

    /// Adds an active purchase of `service_name` to the account and commits.
    ///
    /// Fails with `InvalidArgument` when the account does not exist or the
    /// quantity is not positive, and with `Conflict` when the account already
    /// holds an active license for the same product.
    pub fn order_software(
        &mut self,
        account_id: i64,
        service_name: &str,
        quantity: i32,
    ) -> Result<(), DomainError> {
        let purchase = PurchasedSoftware::new(
            account_id,
            service_name,
            quantity,
            Utc::now() + self.license_term,
        )?;

        let mut account: Account = self
            .uow
            .accounts()
            .get_without_tracking(
                AccountFilter::Id(account_id),
                Some(AccountInclude::PurchasedSoftwares),
            )?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::InvalidArgument(format!("Account with id {account_id} not found."))
            })?;

        account.add_purchase(purchase)?;

        self.uow.accounts().update(&account);
        self.uow.complete()?;
        Ok(())
    }
}
