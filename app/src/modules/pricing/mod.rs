pub mod dto;
pub mod fare;
pub mod routes;
