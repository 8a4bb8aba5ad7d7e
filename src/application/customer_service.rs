use crate::domain::customer::Customer;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerFilter, CustomerInclude, Repository, UnitOfWork};

pub struct CustomerService<U> {
    uow: U,
}

impl<U: UnitOfWork> CustomerService<U> {
    pub fn new(uow: U) -> Self {
        Self { uow }
    }

    pub fn get_including_accounts(
        &mut self,
        customer_id: i64,
    ) -> Result<Option<Customer>, DomainError> {
        let customers = self.uow.customers().get_without_tracking(
            CustomerFilter::Id(customer_id),
            Some(CustomerInclude::Accounts),
        )?;
        Ok(customers.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::UnitOfWorkFactory;
    use crate::infrastructure::MemoryStore;

    #[test]
    fn returns_customer_with_accounts_when_customer_exists() {
        let store = MemoryStore::new();
        let customer_id = store.insert_customer("Contoso");
        store.insert_account(customer_id, "Account 1");
        store.insert_account(customer_id, "Account 2");
        let mut service = CustomerService::new(store.begin().expect("begin"));

        let customer = service
            .get_including_accounts(customer_id)
            .expect("lookup")
            .expect("customer exists");

        assert_eq!(customer.id, customer_id);
        assert_eq!(customer.accounts.len(), 2);
        assert_eq!(customer.accounts[0].name, "Account 1");
        assert!(customer.accounts.iter().all(|a| a.customer_id == customer_id));
    }

    #[test]
    fn returns_none_when_customer_does_not_exist() {
        let store = MemoryStore::new();
        let mut service = CustomerService::new(store.begin().expect("begin"));

        assert!(service.get_including_accounts(-1).expect("lookup").is_none());
    }

    #[test]
    fn customer_without_accounts_has_empty_collection() {
        let store = MemoryStore::new();
        let customer_id = store.insert_customer("Fabrikam");
        let mut service = CustomerService::new(store.begin().expect("begin"));

        let customer = service
            .get_including_accounts(customer_id)
            .expect("lookup")
            .expect("customer exists");

        assert!(customer.accounts.is_empty());
    }
}
