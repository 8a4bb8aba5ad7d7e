pub mod account;
pub mod catalog;
pub mod customer;
pub mod errors;
pub mod ports;
pub mod purchased_software;
