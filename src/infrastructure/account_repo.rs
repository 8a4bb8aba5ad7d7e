use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::domain::account::Account;
use crate::domain::errors::DomainError;
use crate::domain::ports::{AccountFilter, AccountInclude, Repository, Tracking};
use crate::schema::accounts;

use super::models::AccountRow;
use super::purchased_software_repo;
use super::unit_of_work::DieselRepository;
use super::StagedChange;

type Predicate = Box<dyn BoxableExpression<accounts::table, Pg, SqlType = Bool>>;

fn predicate(filter: AccountFilter) -> Predicate {
    match filter {
        AccountFilter::Id(id) => Box::new(accounts::id.eq(id)),
        AccountFilter::CustomerId(id) => Box::new(accounts::customer_id.eq(id)),
    }
}

impl Repository<Account> for DieselRepository<'_, Account> {
    fn get(
        &mut self,
        filter: AccountFilter,
        include: Option<AccountInclude>,
        tracking: Tracking,
    ) -> Result<Vec<Account>, DomainError> {
        let conn = self.uow.connection_for(tracking)?;

        let query = accounts::table
            .filter(predicate(filter))
            .select(AccountRow::as_select())
            .order(accounts::id.asc());
        let rows: Vec<AccountRow> = match tracking {
            Tracking::NoTracking => query.load(conn)?,
            Tracking::ForUpdate => query.for_update().load(conn)?,
        };

        let purchases = match include {
            Some(AccountInclude::PurchasedSoftwares) => {
                purchased_software_repo::load_for_accounts(conn, &rows, tracking)?
            }
            None => vec![Vec::new(); rows.len()],
        };

        Ok(rows
            .into_iter()
            .zip(purchases)
            .map(|(row, purchased_softwares)| Account {
                purchased_softwares,
                ..Account::from(row)
            })
            .collect())
    }

    fn update(&mut self, account: &Account) {
        self.uow.stage(StagedChange::Account(account.clone()));
    }
}
