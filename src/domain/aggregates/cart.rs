//! Cart Aggregate

use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::aggregates::product::Product;
use crate::domain::value_objects::Category;

/// A customer's cart. At most one unpaid cart exists per customer; paid carts
/// are history and never change again.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(skip)]
    id: Option<i64>,
    customer: String,
    paid: bool,
    payment_date: Option<NaiveDate>,
    total: f64,
    products: Vec<CartLine>,
}

/// One product in a cart; category and price are captured when first added
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CartLine {
    pub model: String,
    pub quantity: u32,
    pub category: Category,
    pub price: f64,
}

impl CartLine {
    pub fn line_total(&self) -> f64 { self.price * f64::from(self.quantity) }
}

impl Cart {
    /// A fresh unpaid cart that has not been saved yet
    pub fn new(customer: impl Into<String>) -> Self {
        Self { id: None, customer: customer.into(), paid: false, payment_date: None, total: 0.0, products: vec![] }
    }

    pub fn restore(id: i64, customer: String, paid: bool, payment_date: Option<NaiveDate>, products: Vec<CartLine>) -> Self {
        let mut cart = Self { id: Some(id), customer, paid, payment_date, total: 0.0, products };
        cart.recalculate();
        cart
    }

    pub fn id(&self) -> Option<i64> { self.id }
    pub fn customer(&self) -> &str { &self.customer }
    pub fn is_paid(&self) -> bool { self.paid }
    pub fn payment_date(&self) -> Option<NaiveDate> { self.payment_date }
    pub fn total(&self) -> f64 { self.total }
    pub fn products(&self) -> &[CartLine] { &self.products }
    pub fn is_empty(&self) -> bool { self.products.is_empty() }

    pub fn line(&self, model: &str) -> Option<&CartLine> { self.products.iter().find(|l| l.model == model) }

    /// Adds a single unit of `product`
    pub fn add_unit(&mut self, product: &Product) -> Result<(), CartError> {
        if self.paid { return Err(CartError::AlreadyPaid); }
        if !product.is_available() { return Err(CartError::EmptyProductStock); }
        if let Some(existing) = self.products.iter_mut().find(|l| l.model == product.model()) {
            existing.quantity += 1;
        } else {
            self.products.push(CartLine {
                model: product.model().to_string(),
                quantity: 1,
                category: product.category(),
                price: product.selling_price(),
            });
        }
        self.recalculate();
        Ok(())
    }

    /// Removes a single unit of `model`, dropping the line when it reaches zero
    pub fn remove_unit(&mut self, model: &str) -> Result<(), CartError> {
        if self.paid { return Err(CartError::AlreadyPaid); }
        let pos = self.products.iter().position(|l| l.model == model).ok_or(CartError::ProductNotInCart)?;
        if self.products[pos].quantity > 1 {
            self.products[pos].quantity -= 1;
        } else {
            self.products.remove(pos);
        }
        self.recalculate();
        Ok(())
    }

    pub fn clear(&mut self) { self.products.clear(); self.recalculate(); }

    /// Marks the cart paid once every line can be served from `stock_of`.
    ///
    /// `stock_of` reports the current stock for a model, `None` if the
    /// product no longer exists.
    pub fn checkout<F>(&mut self, stock_of: F, today: NaiveDate) -> Result<(), CartError>
    where
        F: Fn(&str) -> Option<u32>,
    {
        if self.paid { return Err(CartError::AlreadyPaid); }
        if self.products.is_empty() { return Err(CartError::EmptyCart); }
        for line in &self.products {
            match stock_of(&line.model) {
                None | Some(0) => return Err(CartError::EmptyProductStock),
                Some(available) if available < line.quantity => return Err(CartError::LowProductStock),
                Some(_) => {}
            }
        }
        self.paid = true;
        self.payment_date = Some(today);
        Ok(())
    }

    fn recalculate(&mut self) {
        self.total = self.products.iter().map(CartLine::line_total).sum();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartError { AlreadyPaid, EmptyCart, ProductNotInCart, EmptyProductStock, LowProductStock }
impl std::error::Error for CartError {}
impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyPaid => write!(f, "Cart already paid"),
            Self::EmptyCart => write!(f, "Cart is empty"),
            Self::ProductNotInCart => write!(f, "Product not in cart"),
            Self::EmptyProductStock => write!(f, "Product stock is empty"),
            Self::LowProductStock => write!(f, "Product stock too low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn d(s: &str) -> NaiveDate { s.parse().unwrap() }

    fn product(model: &str, qty: u32, price: f64) -> Product {
        Product::restore(model.into(), Category::Smartphone, qty, price, None, d("2024-01-01"))
    }

    #[test]
    fn test_add_and_remove_units() {
        let mut cart = Cart::new("alice");
        let phone = product("P1", 5, 200.0);
        cart.add_unit(&phone).unwrap();
        cart.add_unit(&phone).unwrap();
        cart.add_unit(&product("P2", 1, 50.0)).unwrap();
        assert_eq!(cart.products().len(), 2);
        assert_eq!(cart.line("P1").unwrap().quantity, 2); // Merged
        assert_eq!(cart.total(), 450.0);

        cart.remove_unit("P1").unwrap();
        assert_eq!(cart.total(), 250.0);
        cart.remove_unit("P2").unwrap();
        assert!(cart.line("P2").is_none());
        assert_eq!(cart.remove_unit("P2"), Err(CartError::ProductNotInCart));
    }

    #[test]
    fn test_add_out_of_stock() {
        let mut cart = Cart::new("alice");
        assert_eq!(cart.add_unit(&product("P1", 0, 10.0)), Err(CartError::EmptyProductStock));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_checkout_rules() {
        let today = d("2024-06-01");
        let mut cart = Cart::new("alice");
        assert_eq!(cart.checkout(|_| Some(10), today), Err(CartError::EmptyCart));

        cart.add_unit(&product("P1", 5, 10.0)).unwrap();
        cart.add_unit(&product("P1", 5, 10.0)).unwrap();
        let stock: HashMap<&str, u32> = HashMap::from([("P1", 1)]);
        assert_eq!(cart.checkout(|m| stock.get(m).copied(), today), Err(CartError::LowProductStock));
        assert_eq!(cart.checkout(|_| Some(0), today), Err(CartError::EmptyProductStock));
        assert_eq!(cart.checkout(|_| None, today), Err(CartError::EmptyProductStock));

        cart.checkout(|_| Some(2), today).unwrap();
        assert!(cart.is_paid());
        assert_eq!(cart.payment_date(), Some(today));
        assert_eq!(cart.add_unit(&product("P1", 5, 10.0)), Err(CartError::AlreadyPaid));
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = Cart::new("bob");
        cart.add_unit(&product("P1", 1, 12.5)).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["customer"], "bob");
        assert_eq!(json["paid"], false);
        assert!(json["paymentDate"].is_null());
        assert_eq!(json["total"], 12.5);
        assert_eq!(json["products"][0]["category"], "Smartphone");
        assert!(json.get("id").is_none());
    }
}
