use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::domain::errors::DomainError;
use crate::domain::ports::{PurchasedSoftwareFilter, Repository, Tracking};
use crate::domain::purchased_software::PurchasedSoftware;
use crate::schema::purchased_softwares;

use super::models::{AccountRow, PurchasedSoftwareRow};
use super::unit_of_work::DieselRepository;
use super::StagedChange;

type Predicate = Box<dyn BoxableExpression<purchased_softwares::table, Pg, SqlType = Bool>>;

fn predicate(filter: PurchasedSoftwareFilter) -> Predicate {
    match filter {
        PurchasedSoftwareFilter::Id(id) => Box::new(purchased_softwares::id.eq(id)),
        PurchasedSoftwareFilter::AccountId(id) => Box::new(purchased_softwares::account_id.eq(id)),
    }
}

impl Repository<PurchasedSoftware> for DieselRepository<'_, PurchasedSoftware> {
    fn get(
        &mut self,
        filter: PurchasedSoftwareFilter,
        include: Option<std::convert::Infallible>,
        tracking: Tracking,
    ) -> Result<Vec<PurchasedSoftware>, DomainError> {
        if let Some(never) = include {
            match never {}
        }
        let conn = self.uow.connection_for(tracking)?;

        let query = purchased_softwares::table
            .filter(predicate(filter))
            .select(PurchasedSoftwareRow::as_select())
            .order(purchased_softwares::id.asc());
        let rows: Vec<PurchasedSoftwareRow> = match tracking {
            Tracking::NoTracking => query.load(conn)?,
            Tracking::ForUpdate => query.for_update().load(conn)?,
        };

        rows.into_iter().map(PurchasedSoftware::try_from).collect()
    }

    fn update(&mut self, purchase: &PurchasedSoftware) {
        let change = StagedChange::PurchasedSoftware(purchase.clone());
        self.uow.stage(change);
    }
}

/// Loads the purchases of every account in `accounts`, grouped in the same order.
pub(super) fn load_for_accounts(
    conn: &mut PgConnection,
    accounts: &[AccountRow],
    tracking: Tracking,
) -> Result<Vec<Vec<PurchasedSoftware>>, DomainError> {
    let query = PurchasedSoftwareRow::belonging_to(accounts)
        .select(PurchasedSoftwareRow::as_select())
        .order(purchased_softwares::id.asc());
    let rows: Vec<PurchasedSoftwareRow> = match tracking {
        Tracking::NoTracking => query.load(conn)?,
        Tracking::ForUpdate => query.for_update().load(conn)?,
    };

    rows.grouped_by(accounts)
        .into_iter()
        .map(|group| group.into_iter().map(PurchasedSoftware::try_from).collect())
        .collect()
}
