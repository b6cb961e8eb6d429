pub mod config;
pub mod db;
pub mod http_error;
pub mod kernel;
pub mod method_override;
pub mod plugins;
pub mod views;

pub use crate::kernel::*;
pub use crate::db::*;
