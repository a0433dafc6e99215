pub mod health;
pub mod purge;
