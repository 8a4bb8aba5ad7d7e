use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::domain::account::Account;
use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerFilter, CustomerInclude, Repository, Tracking};
use crate::schema::{accounts, customers};

use super::models::{AccountRow, CustomerRow};
use super::unit_of_work::DieselRepository;
use super::StagedChange;

type Predicate = Box<dyn BoxableExpression<customers::table, Pg, SqlType = Bool>>;

fn predicate(filter: CustomerFilter) -> Predicate {
    match filter {
        CustomerFilter::Id(id) => Box::new(customers::id.eq(id)),
    }
}

impl Repository<Customer> for DieselRepository<'_, Customer> {
    fn get(
        &mut self,
        filter: CustomerFilter,
        include: Option<CustomerInclude>,
        tracking: Tracking,
    ) -> Result<Vec<Customer>, DomainError> {
        let conn = self.uow.connection_for(tracking)?;

        let query = customers::table
            .filter(predicate(filter))
            .select(CustomerRow::as_select())
            .order(customers::id.asc());
        let rows: Vec<CustomerRow> = match tracking {
            Tracking::NoTracking => query.load(conn)?,
            Tracking::ForUpdate => query.for_update().load(conn)?,
        };

        let accounts: Vec<Vec<Account>> = match include {
            Some(CustomerInclude::Accounts) => {
                let query = AccountRow::belonging_to(&rows)
                    .select(AccountRow::as_select())
                    .order(accounts::id.asc());
                let account_rows: Vec<AccountRow> = match tracking {
                    Tracking::NoTracking => query.load(conn)?,
                    Tracking::ForUpdate => query.for_update().load(conn)?,
                };
                account_rows
                    .grouped_by(&rows)
                    .into_iter()
                    .map(|group| group.into_iter().map(Account::from).collect())
                    .collect()
            }
            None => vec![Vec::new(); rows.len()],
        };

        Ok(rows
            .into_iter()
            .zip(accounts)
            .map(|(row, accounts)| Customer {
                accounts,
                ..Customer::from(row)
            })
            .collect())
    }

    fn update(&mut self, customer: &Customer) {
        self.uow.stage(StagedChange::Customer(customer.clone()));
    }
}
