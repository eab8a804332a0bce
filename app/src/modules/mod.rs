pub mod audit;
pub mod auth;
pub mod b2b;
pub mod billing;
pub mod booking;
pub mod common;
pub mod driver;
pub mod fleet;
pub mod pricing;
