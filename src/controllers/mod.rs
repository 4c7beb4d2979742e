//! Business flows behind the routes: load aggregates, apply their rules,
//! persist, log and publish.
pub mod carts;
pub mod products;
pub mod reviews;
pub mod sessions;
pub mod users;
