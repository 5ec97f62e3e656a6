pub mod blog;
pub mod forms;
pub mod health;
pub mod pages;
pub mod routes;
