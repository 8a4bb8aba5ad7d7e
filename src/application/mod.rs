pub mod account_service;
pub mod customer_service;
pub mod order_service;
pub mod purchased_software_service;

pub use account_service::AccountService;
pub use customer_service::CustomerService;
pub use order_service::OrderService;
pub use purchased_software_service::PurchasedSoftwareService;
