use super::account::Account;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Empty unless loaded with `CustomerInclude::Accounts`.
    pub accounts: Vec<Account>,
}

impl Customer {
    pub const ENTITY: &'static str = "Customer";
}
