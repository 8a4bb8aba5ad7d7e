use chrono::{DateTime, Utc};

use crate::domain::errors::DomainError;
use crate::domain::ports::{PurchasedSoftwareFilter, Repository, UnitOfWork};
use crate::domain::purchased_software::PurchasedSoftware;

/// Mutations on an existing purchase. Each call loads the record for
/// update, applies one change and completes the unit of work.
pub struct PurchasedSoftwareService<U> {
    uow: U,
}

impl<U: UnitOfWork> PurchasedSoftwareService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    /// Cancelling an already cancelled purchase succeeds without a write.
    pub fn cancel_purchase(&mut self, id: i64) -> Result<PurchasedSoftware, DomainError> {
        self.mutate(id, |purchase| Ok(purchase.cancel()))
    }

    pub fn change_quantity(
        &mut self,
        id: i64,
        quantity: i32,
    ) -> Result<PurchasedSoftware, DomainError> {
        self.mutate(id, |purchase| purchase.change_quantity(quantity).map(|()| true))
    }

    pub fn extend_expiry_date(
        &mut self,
        id: i64,
        valid_to: DateTime<Utc>,
    ) -> Result<PurchasedSoftware, DomainError> {
        self.mutate(id, |purchase| purchase.extend_expiry(valid_to).map(|()| true))
    }

    /// `change` reports whether the record was modified.
    fn mutate(
        &mut self,
        id: i64,
        change: impl FnOnce(&mut PurchasedSoftware) -> Result<bool, DomainError>,
    ) -> Result<PurchasedSoftware, DomainError> {
        let mut purchase = self
            .uow
            .purchased_softwares()
            .get_for_update(PurchasedSoftwareFilter::Id(id), None)?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found(PurchasedSoftware::ENTITY, id))?;

        if change(&mut purchase)? {
            self.uow.purchased_softwares().update(&purchase);
        }
        self.uow.complete()?;
        Ok(purchase)
    }
}
