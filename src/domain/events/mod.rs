//! Domain events
use crate::domain::value_objects::{Category, Role};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    UserCreated { username: String, role: Role },
    ProductRegistered { model: String, category: Category, quantity: u32 },
    ProductRestocked { model: String, quantity: u32 },
    ProductSold { model: String, sold: u32, remaining: u32 },
    CartCheckedOut { customer: String, total: f64, lines: usize },
}

impl DomainEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserCreated { .. } => "user_created",
            Self::ProductRegistered { .. } => "product_registered",
            Self::ProductRestocked { .. } => "product_restocked",
            Self::ProductSold { .. } => "product_sold",
            Self::CartCheckedOut { .. } => "cart_checked_out",
        }
    }

    pub fn subject(&self) -> String { format!("ezelectronics.{}", self.name()) }
}
