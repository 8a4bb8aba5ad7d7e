use std::convert::Infallible;

use super::account::Account;
use super::customer::Customer;
use super::errors::DomainError;
use super::purchased_software::PurchasedSoftware;

/// How a read participates in the unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracking {
    /// Detached copies; nothing is locked.
    NoTracking,
    /// Rows stay locked by the unit of work until it completes or is dropped.
    ForUpdate,
}

pub trait Entity: Clone {
    type Filter: Copy + std::fmt::Debug;
    type Include: Copy + std::fmt::Debug;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountFilter {
    Id(i64),
    CustomerId(i64),
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        match *self {
            AccountFilter::Id(id) => account.id == id,
            AccountFilter::CustomerId(id) => account.customer_id == id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountInclude {
    PurchasedSoftwares,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerFilter {
    Id(i64),
}

impl CustomerFilter {
    pub fn matches(&self, customer: &Customer) -> bool {
        match *self {
            CustomerFilter::Id(id) => customer.id == id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerInclude {
    Accounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchasedSoftwareFilter {
    Id(i64),
    AccountId(i64),
}

impl PurchasedSoftwareFilter {
    pub fn matches(&self, purchase: &PurchasedSoftware) -> bool {
        match *self {
            PurchasedSoftwareFilter::Id(id) => purchase.id == Some(id),
            PurchasedSoftwareFilter::AccountId(id) => purchase.account_id == id,
        }
    }
}

impl Entity for Account {
    type Filter = AccountFilter;
    type Include = AccountInclude;
}

impl Entity for Customer {
    type Filter = CustomerFilter;
    type Include = CustomerInclude;
}

impl Entity for PurchasedSoftware {
    type Filter = PurchasedSoftwareFilter;
    type Include = Infallible;
}

pub trait Repository<T: Entity> {
    fn get(
        &mut self,
        filter: T::Filter,
        include: Option<T::Include>,
        tracking: Tracking,
    ) -> Result<Vec<T>, DomainError>;

    /// Marks `entity` as modified; written on `UnitOfWork::complete`.
    fn update(&mut self, entity: &T);

    fn get_without_tracking(
        &mut self,
        filter: T::Filter,
        include: Option<T::Include>,
    ) -> Result<Vec<T>, DomainError> {
        self.get(filter, include, Tracking::NoTracking)
    }

    fn get_for_update(
        &mut self,
        filter: T::Filter,
        include: Option<T::Include>,
    ) -> Result<Vec<T>, DomainError> {
        self.get(filter, include, Tracking::ForUpdate)
    }
}

/// One transactional scope over all repositories.
pub trait UnitOfWork {
    type Accounts<'a>: Repository<Account>
    where
        Self: 'a;
    type Customers<'a>: Repository<Customer>
    where
        Self: 'a;
    type PurchasedSoftwares<'a>: Repository<PurchasedSoftware>
    where
        Self: 'a;

    fn accounts(&mut self) -> Self::Accounts<'_>;
    fn customers(&mut self) -> Self::Customers<'_>;
    fn purchased_softwares(&mut self) -> Self::PurchasedSoftwares<'_>;

    /// Persists every staged change atomically and returns the number of rows written.
    fn complete(&mut self) -> Result<usize, DomainError>;
}

pub trait UnitOfWorkFactory: Clone + Send + Sync + 'static {
    type UnitOfWork: UnitOfWork;

    fn begin(&self) -> Result<Self::UnitOfWork, DomainError>;
}
