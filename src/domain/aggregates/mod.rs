//! Aggregates module
pub mod product;
pub mod cart;
pub mod user;
pub mod review;

pub use product::{Product, ProductError};
pub use cart::{Cart, CartError, CartLine};
pub use user::{User, UserError};
pub use review::{Review, ReviewError};
