use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::account::Account;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::purchased_software::PurchasedSoftware;
use crate::schema::{accounts, customers, purchased_softwares};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = accounts)]
#[diesel(belongs_to(CustomerRow, foreign_key = customer_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AccountRow {
    pub id: i64,
    pub customer_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = purchased_softwares)]
#[diesel(belongs_to(AccountRow, foreign_key = account_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PurchasedSoftwareRow {
    pub id: i64,
    pub account_id: i64,
    pub name: String,
    pub quantity: i32,
    pub state: String,
    pub valid_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = purchased_softwares)]
pub struct NewPurchasedSoftwareRow<'a> {
    pub account_id: i64,
    pub name: &'a str,
    pub quantity: i32,
    pub state: &'static str,
    pub valid_to: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = purchased_softwares)]
pub struct PurchasedSoftwareChanges<'a> {
    pub name: &'a str,
    pub quantity: i32,
    pub state: &'static str,
    pub valid_to: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = accounts)]
pub struct AccountChanges<'a> {
    pub customer_id: i64,
    pub name: &'a str,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            accounts: vec![],
        }
    }
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.id,
            customer_id: row.customer_id,
            name: row.name,
            purchased_softwares: vec![],
        }
    }
}

impl TryFrom<PurchasedSoftwareRow> for PurchasedSoftware {
    type Error = DomainError;

    fn try_from(row: PurchasedSoftwareRow) -> Result<Self, Self::Error> {
        Ok(PurchasedSoftware {
            id: Some(row.id),
            account_id: row.account_id,
            name: row.name,
            quantity: row.quantity,
            state: row.state.parse()?,
            valid_to: row.valid_to,
        })
    }
}

impl<'a> NewPurchasedSoftwareRow<'a> {
    pub fn from_domain(purchase: &'a PurchasedSoftware, account_id: i64) -> Self {
        Self {
            account_id,
            name: &purchase.name,
            quantity: purchase.quantity,
            state: purchase.state.as_str(),
            valid_to: purchase.valid_to,
        }
    }
}

impl<'a> PurchasedSoftwareChanges<'a> {
    pub fn from_domain(purchase: &'a PurchasedSoftware) -> Self {
        Self {
            name: &purchase.name,
            quantity: purchase.quantity,
            state: purchase.state.as_str(),
            valid_to: purchase.valid_to,
            updated_at: Utc::now(),
        }
    }
}
