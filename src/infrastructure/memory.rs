//! In-memory implementation of the storage ports.
//!
//! Used by the service and HTTP tests. Staged changes are applied to a copy
//! of the tables and swapped in only when every change succeeds, so
//! `complete` is atomic like its Postgres counterpart. The partial unique
//! rule on active purchase names is enforced on insert.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::account::Account;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::ports::{
    AccountFilter, AccountInclude, CustomerFilter, CustomerInclude, PurchasedSoftwareFilter,
    Repository, Tracking, UnitOfWork, UnitOfWorkFactory,
};
use crate::domain::purchased_software::PurchasedSoftware;

use super::StagedChange;

/// One read issued through a memory repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRecord {
    pub entity: &'static str,
    pub tracking: Tracking,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    accounts: BTreeMap<i64, Account>,
    purchased_softwares: BTreeMap<i64, PurchasedSoftware>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn purchases_of(&self, account_id: i64) -> Vec<PurchasedSoftware> {
        self.purchased_softwares
            .values()
            .filter(|p| p.account_id == account_id)
            .cloned()
            .collect()
    }

    fn accounts_of(&self, customer_id: i64) -> Vec<Account> {
        self.accounts
            .values()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect()
    }

    fn apply(&mut self, change: &StagedChange) -> Result<usize, DomainError> {
        match change {
            StagedChange::Customer(customer) => {
                let stored = self
                    .customers
                    .get_mut(&customer.id)
                    .ok_or_else(|| DomainError::not_found(Customer::ENTITY, customer.id))?;
                stored.name = customer.name.clone();
                Ok(1)
            }
            StagedChange::Account(account) => {
                let stored = self
                    .accounts
                    .get_mut(&account.id)
                    .ok_or_else(|| DomainError::not_found(Account::ENTITY, account.id))?;
                stored.customer_id = account.customer_id;
                stored.name = account.name.clone();
                let mut written = 1;
                for purchase in account.purchased_softwares.iter().filter(|p| p.id.is_none()) {
                    let mut purchase = purchase.clone();
                    purchase.account_id = account.id;
                    written += self.save_purchase(purchase)?;
                }
                Ok(written)
            }
            StagedChange::PurchasedSoftware(purchase) => self.save_purchase(purchase.clone()),
        }
    }

    fn save_purchase(&mut self, mut purchase: PurchasedSoftware) -> Result<usize, DomainError> {
        match purchase.id {
            Some(id) => {
                let stored = self
                    .purchased_softwares
                    .get_mut(&id)
                    .ok_or_else(|| DomainError::not_found(PurchasedSoftware::ENTITY, id))?;
                *stored = purchase;
            }
            None => {
                if !self.accounts.contains_key(&purchase.account_id) {
                    return Err(DomainError::not_found(Account::ENTITY, purchase.account_id));
                }
                let duplicate = self.purchased_softwares.values().any(|p| {
                    p.account_id == purchase.account_id && p.is_active() && p.name == purchase.name
                });
                if purchase.is_active() && duplicate {
                    return Err(DomainError::Conflict(format!(
                        "duplicate active purchase of {} for account {}",
                        purchase.name, purchase.account_id
                    )));
                }
                let id = self.next_id();
                purchase.id = Some(id);
                self.purchased_softwares.insert(id, purchase);
            }
        }
        Ok(1)
    }
}

#[derive(Debug, Default)]
struct Shared {
    tables: Tables,
    reads: Vec<ReadRecord>,
    commits: usize,
}

/// Shared in-memory database. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Mutex<Shared>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_customer(&self, name: &str) -> i64 {
        let mut shared = self.lock();
        let tables = &mut shared.tables;
        let id = tables.next_id();
        tables.customers.insert(
            id,
            Customer {
                id,
                name: name.to_string(),
                accounts: vec![],
            },
        );
        id
    }

    pub fn insert_account(&self, customer_id: i64, name: &str) -> i64 {
        let mut shared = self.lock();
        let tables = &mut shared.tables;
        let id = tables.next_id();
        tables.accounts.insert(
            id,
            Account {
                id,
                customer_id,
                name: name.to_string(),
                purchased_softwares: vec![],
            },
        );
        id
    }

    /// Stores `purchase` as-is under a fresh id, bypassing the uniqueness rule.
    pub fn insert_purchase(&self, mut purchase: PurchasedSoftware) -> i64 {
        let mut shared = self.lock();
        let tables = &mut shared.tables;
        let id = tables.next_id();
        purchase.id = Some(id);
        tables.purchased_softwares.insert(id, purchase);
        id
    }

    pub fn purchase(&self, id: i64) -> Option<PurchasedSoftware> {
        self.lock().tables.purchased_softwares.get(&id).cloned()
    }

    pub fn purchases_of(&self, account_id: i64) -> Vec<PurchasedSoftware> {
        self.lock().tables.purchases_of(account_id)
    }

    pub fn reads(&self) -> Vec<ReadRecord> {
        self.lock().reads.clone()
    }

    /// Number of successful `complete` calls that wrote at least one row.
    pub fn commits(&self) -> usize {
        self.lock().commits
    }
}

impl UnitOfWorkFactory for MemoryStore {
    type UnitOfWork = MemoryUnitOfWork;

    fn begin(&self) -> Result<MemoryUnitOfWork, DomainError> {
        Ok(MemoryUnitOfWork {
            store: self.clone(),
            pending: Vec::new(),
        })
    }
}

pub struct MemoryUnitOfWork {
    store: MemoryStore,
    pending: Vec<StagedChange>,
}

impl MemoryUnitOfWork {
    fn read<T>(&self, entity: &'static str, tracking: Tracking, f: impl FnOnce(&Tables) -> T) -> T {
        let mut shared = self.store.lock();
        shared.reads.push(ReadRecord { entity, tracking });
        f(&shared.tables)
    }
}

impl UnitOfWork for MemoryUnitOfWork {
    type Accounts<'a> = MemoryRepository<'a, Account> where Self: 'a;
    type Customers<'a> = MemoryRepository<'a, Customer> where Self: 'a;
    type PurchasedSoftwares<'a> = MemoryRepository<'a, PurchasedSoftware> where Self: 'a;

    fn accounts(&mut self) -> Self::Accounts<'_> {
        MemoryRepository::new(self)
    }

    fn customers(&mut self) -> Self::Customers<'_> {
        MemoryRepository::new(self)
    }

    fn purchased_softwares(&mut self) -> Self::PurchasedSoftwares<'_> {
        MemoryRepository::new(self)
    }

    fn complete(&mut self) -> Result<usize, DomainError> {
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(0);
        }
        let mut shared = self.store.lock();
        let mut tables = shared.tables.clone();
        let written = pending
            .iter()
            .try_fold(0, |total, change| tables.apply(change).map(|n| total + n))?;
        shared.tables = tables;
        shared.commits += 1;
        Ok(written)
    }
}

pub struct MemoryRepository<'a, T> {
    uow: &'a mut MemoryUnitOfWork,
    _entity: PhantomData<T>,
}

impl<'a, T> MemoryRepository<'a, T> {
    fn new(uow: &'a mut MemoryUnitOfWork) -> Self {
        Self {
            uow,
            _entity: PhantomData,
        }
    }
}

impl Repository<Account> for MemoryRepository<'_, Account> {
    fn get(
        &mut self,
        filter: AccountFilter,
        include: Option<AccountInclude>,
        tracking: Tracking,
    ) -> Result<Vec<Account>, DomainError> {
        Ok(self.uow.read(Account::ENTITY, tracking, |tables| {
            tables
                .accounts
                .values()
                .filter(|a| filter.matches(a))
                .map(|a| match include {
                    Some(AccountInclude::PurchasedSoftwares) => Account {
                        purchased_softwares: tables.purchases_of(a.id),
                        ..a.clone()
                    },
                    None => a.clone(),
                })
                .collect()
        }))
    }

    fn update(&mut self, account: &Account) {
        self.uow.pending.push(StagedChange::Account(account.clone()));
    }
}

impl Repository<Customer> for MemoryRepository<'_, Customer> {
    fn get(
        &mut self,
        filter: CustomerFilter,
        include: Option<CustomerInclude>,
        tracking: Tracking,
    ) -> Result<Vec<Customer>, DomainError> {
        Ok(self.uow.read(Customer::ENTITY, tracking, |tables| {
            tables
                .customers
                .values()
                .filter(|c| filter.matches(c))
                .map(|c| match include {
                    Some(CustomerInclude::Accounts) => Customer {
                        accounts: tables.accounts_of(c.id),
                        ..c.clone()
                    },
                    None => c.clone(),
                })
                .collect()
        }))
    }

    fn update(&mut self, customer: &Customer) {
        self.uow
            .pending
            .push(StagedChange::Customer(customer.clone()));
    }
}

impl Repository<PurchasedSoftware> for MemoryRepository<'_, PurchasedSoftware> {
    fn get(
        &mut self,
        filter: PurchasedSoftwareFilter,
        _include: Option<Infallible>,
        tracking: Tracking,
    ) -> Result<Vec<PurchasedSoftware>, DomainError> {
        Ok(self.uow.read(PurchasedSoftware::ENTITY, tracking, |tables| {
            tables
                .purchased_softwares
                .values()
                .filter(|p| filter.matches(p))
                .cloned()
                .collect()
        }))
    }

    fn update(&mut self, purchase: &PurchasedSoftware) {
        self.uow
            .pending
            .push(StagedChange::PurchasedSoftware(purchase.clone()));
    }
}
