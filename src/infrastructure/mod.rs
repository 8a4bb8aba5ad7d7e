//! Storage adapters implementing the domain ports.

mod account_repo;
mod customer_repo;
pub mod memory;
pub mod models;
mod purchased_software_repo;
pub mod unit_of_work;

use crate::domain::account::Account;
use crate::domain::customer::Customer;
use crate::domain::purchased_software::PurchasedSoftware;

pub use memory::{MemoryStore, MemoryUnitOfWork};
pub use unit_of_work::{DieselRepository, DieselUnitOfWork};

/// A modification waiting for `UnitOfWork::complete`.
#[derive(Debug, Clone)]
pub(crate) enum StagedChange {
    Account(Account),
    Customer(Customer),
    PurchasedSoftware(PurchasedSoftware),
}
