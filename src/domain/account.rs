use super::errors::DomainError;
use super::purchased_software::PurchasedSoftware;

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
    /// Empty unless loaded with `AccountInclude::PurchasedSoftwares`.
    pub purchased_softwares: Vec<PurchasedSoftware>,
}

impl Account {
    pub const ENTITY: &'static str = "Account";

    pub fn active_purchase(&self, name: &str) -> Option<&PurchasedSoftware> {
        self.purchased_softwares
            .iter()
            .find(|p| p.is_active() && p.name == name)
    }

    /// Appends `purchase`, rejecting a second active license for the same product.
    pub fn add_purchase(&mut self, purchase: PurchasedSoftware) -> Result<(), DomainError> {
        if self.active_purchase(&purchase.name).is_some() {
            return Err(DomainError::Conflict(format!(
                "Account with id {} already purchased license for {}",
                self.id, purchase.name
            )));
        }
        self.purchased_softwares.push(purchase);
        Ok(())
    }
}
