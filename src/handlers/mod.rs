pub mod accounts;
pub mod customers;
pub mod purchased_softwares;
pub mod software;

use chrono::Duration;

use crate::domain::catalog::SoftwareCatalog;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState<F> {
    pub uow_factory: F,
    pub catalog: SoftwareCatalog,
    pub license_term: Duration,
}

impl<F> AppState<F> {
    pub fn new(uow_factory: F, catalog: SoftwareCatalog, license_term: Duration) -> Self {
        Self {
            uow_factory,
            catalog,
            license_term,
        }
    }
}
