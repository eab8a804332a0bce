pub mod dto;
pub mod routes;
pub mod service;
pub mod status;
