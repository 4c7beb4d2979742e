//! Product Aggregate

use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::value_objects::{ensure_between, ensure_not_future, Category, DateError, Quantity};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    model: String,
    category: Category,
    quantity: Quantity,
    selling_price: f64,
    details: Option<String>,
    arrival_date: NaiveDate,
}

impl Product {
    /// Registers a new arrival. A missing arrival date means it arrived today.
    pub fn register(
        model: impl Into<String>,
        category: Category,
        quantity: u32,
        selling_price: f64,
        details: Option<String>,
        arrival_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, ProductError> {
        let model = model.into();
        if model.trim().is_empty() { return Err(ProductError::MissingModel); }
        if quantity == 0 { return Err(ProductError::InvalidQuantity); }
        if !(selling_price > 0.0) { return Err(ProductError::InvalidPrice); }
        let arrival_date = arrival_date.unwrap_or(today);
        ensure_not_future(arrival_date, today)?;
        Ok(Self { model, category, quantity: Quantity::new(quantity), selling_price, details, arrival_date })
    }

    /// Rebuilds a product already persisted
    pub fn restore(model: String, category: Category, quantity: u32, selling_price: f64, details: Option<String>, arrival_date: NaiveDate) -> Self {
        Self { model, category, quantity: Quantity::new(quantity), selling_price, details, arrival_date }
    }

    pub fn model(&self) -> &str { &self.model }
    pub fn category(&self) -> Category { self.category }
    pub fn quantity(&self) -> u32 { self.quantity.value() }
    pub fn selling_price(&self) -> f64 { self.selling_price }
    pub fn details(&self) -> Option<&str> { self.details.as_deref() }
    pub fn arrival_date(&self) -> NaiveDate { self.arrival_date }
    pub fn is_available(&self) -> bool { !self.quantity.is_zero() }

    /// Adds stock; returns the new quantity
    pub fn restock(&mut self, qty: u32, change_date: Option<NaiveDate>, today: NaiveDate) -> Result<u32, ProductError> {
        if qty == 0 { return Err(ProductError::InvalidQuantity); }
        ensure_between(change_date.unwrap_or(today), self.arrival_date, today)?;
        self.quantity = self.quantity.add(qty);
        Ok(self.quantity.value())
    }

    /// Removes sold stock; returns the remaining quantity
    pub fn sell(&mut self, qty: u32, selling_date: Option<NaiveDate>, today: NaiveDate) -> Result<u32, ProductError> {
        if qty == 0 { return Err(ProductError::InvalidQuantity); }
        ensure_between(selling_date.unwrap_or(today), self.arrival_date, today)?;
        if self.quantity.is_zero() { return Err(ProductError::EmptyStock); }
        self.quantity = self.quantity.subtract(qty).ok_or(ProductError::LowStock)?;
        Ok(self.quantity.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductError { MissingModel, InvalidQuantity, InvalidPrice, Date, EmptyStock, LowStock }
impl std::error::Error for ProductError {}
impl std::fmt::Display for ProductError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingModel => write!(f, "Missing model"),
            Self::InvalidQuantity => write!(f, "Quantity must be positive"),
            Self::InvalidPrice => write!(f, "Selling price must be positive"),
            Self::Date => write!(f, "Date out of range"),
            Self::EmptyStock => write!(f, "Empty stock"),
            Self::LowStock => write!(f, "Insufficient stock"),
        }
    }
}

impl From<DateError> for ProductError {
    fn from(_: DateError) -> Self { Self::Date }
}
