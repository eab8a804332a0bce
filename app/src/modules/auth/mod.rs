pub mod dto;
pub mod jwt;
pub mod middleware;
pub mod rate_limit;
pub mod routes;
pub mod service;
