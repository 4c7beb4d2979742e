//! Value Objects for EZElectronics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of an account; decides which routes a user may invoke
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Customer,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Manager => "Manager",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Customer" => Ok(Self::Customer),
            "Manager" => Ok(Self::Manager),
            "Admin" => Ok(Self::Admin),
            other => Err(ParseEnumError { kind: "role", value: other.to_string() }),
        }
    }
}

/// Product category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Smartphone,
    Laptop,
    Appliance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smartphone => "Smartphone",
            Self::Laptop => "Laptop",
            Self::Appliance => "Appliance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Category {
    type Err = ParseEnumError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Smartphone" => Ok(Self::Smartphone),
            "Laptop" => Ok(Self::Laptop),
            "Appliance" => Ok(Self::Appliance),
            other => Err(ParseEnumError { kind: "category", value: other.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError { kind: &'static str, value: String }
impl std::error::Error for ParseEnumError {}
impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "unknown {}: {:?}", self.kind, self.value) }
}

/// Stock quantity value object
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Self { Self(value) }
    pub fn value(&self) -> u32 { self.0 }
    pub fn add(&self, other: u32) -> Self { Self(self.0.saturating_add(other)) }
    pub fn subtract(&self, other: u32) -> Option<Self> {
        if other > self.0 { None } else { Some(Self(self.0 - other)) }
    }
    pub fn is_zero(&self) -> bool { self.0 == 0 }
}

/// Selection applied by the product listing routes.
///
/// `grouping`, `category` and `model` are mutually exclusive: without a
/// grouping neither filter may be present, and each grouping requires exactly
/// its own filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Category(Category),
    Model(String),
}

impl ProductFilter {
    pub fn from_query(grouping: Option<&str>, category: Option<&str>, model: Option<&str>) -> Result<Self, FilterError> {
        match (grouping, category, model) {
            (None, None, None) => Ok(Self::All),
            (None, _, _) => Err(FilterError("category and model require a grouping")),
            (Some("category"), Some(category), None) => category
                .parse()
                .map(Self::Category)
                .map_err(|_| FilterError("category must be Smartphone, Laptop or Appliance")),
            (Some("category"), _, _) => Err(FilterError("grouping by category requires only a category")),
            (Some("model"), None, Some(model)) if !model.trim().is_empty() => Ok(Self::Model(model.to_string())),
            (Some("model"), _, _) => Err(FilterError("grouping by model requires only a non-empty model")),
            (Some(_), _, _) => Err(FilterError("grouping must be category or model")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterError(&'static str);
impl std::error::Error for FilterError {}
impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.0) }
}

/// A date that is later than today, or earlier than a date it must follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateError;
impl std::error::Error for DateError {}
impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "date out of range") }
}

pub fn ensure_not_future(date: NaiveDate, today: NaiveDate) -> Result<(), DateError> {
    if date > today { Err(DateError) } else { Ok(()) }
}

pub fn ensure_between(date: NaiveDate, earliest: NaiveDate, today: NaiveDate) -> Result<(), DateError> {
    ensure_not_future(date, today)?;
    if date < earliest { Err(DateError) } else { Ok(()) }
}
