pub mod airline;
pub mod airport;
pub(crate) mod crud;
pub mod health;
pub mod route;
