//! Data models for Vantage

mod cart;
mod product;
mod search;
mod user;

pub use cart::*;
pub use product::*;
pub use search::*;
pub use user::*;
