pub mod audit_log;
pub mod b2b_booking;
pub mod b2b_company;
pub mod b2b_payment;
pub mod b2b_request;
pub mod b2b_user;
pub mod booking;
pub mod booking_note;
pub mod company_fleet;
pub mod driver;
pub mod enums;
pub mod fleet_vehicle;
pub mod pricing_settings;
pub mod role;
pub mod taxi_assignment;
pub mod user;
