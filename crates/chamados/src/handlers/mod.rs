pub mod error;
pub mod health;
pub mod priorities;
pub mod tickets;

pub use error::AppError;
