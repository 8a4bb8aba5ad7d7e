use crate::domain::account::Account;
use crate::domain::errors::DomainError;
use crate::domain::ports::{AccountFilter, AccountInclude, Repository, UnitOfWork};

pub struct AccountService<U> {
    uow: U,
}

impl<U: UnitOfWork> AccountService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    /// Read-only lookup of an account and all of its purchases.
    pub fn get_with_purchased_softwares(
        &mut self,
        account_id: i64,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.uow.accounts().get_without_tracking(
            AccountFilter::Id(account_id),
            Some(AccountInclude::PurchasedSoftwares),
        )?;
        Ok(accounts.into_iter().next())
    }
}
