pub mod blog;
pub mod health;
