pub mod auth;
pub mod cleanup;
pub mod purge;
pub mod signature;
