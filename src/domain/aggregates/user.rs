//! User Aggregate

use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::value_objects::{ensure_not_future, Role};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    username: String,
    name: String,
    surname: String,
    role: Role,
    address: Option<String>,
    birthdate: Option<NaiveDate>,
}

impl User {
    pub fn new(username: impl Into<String>, name: impl Into<String>, surname: impl Into<String>, role: Role) -> Self {
        Self { username: username.into(), name: name.into(), surname: surname.into(), role, address: None, birthdate: None }
    }

    pub fn restore(username: String, name: String, surname: String, role: Role, address: Option<String>, birthdate: Option<NaiveDate>) -> Self {
        Self { username, name, surname, role, address, birthdate }
    }

    pub fn username(&self) -> &str { &self.username }
    pub fn name(&self) -> &str { &self.name }
    pub fn surname(&self) -> &str { &self.surname }
    pub fn role(&self) -> Role { self.role }
    pub fn address(&self) -> Option<&str> { self.address.as_deref() }
    pub fn birthdate(&self) -> Option<NaiveDate> { self.birthdate }
    pub fn is_admin(&self) -> bool { self.role == Role::Admin }

    /// Admins may read anyone; everybody else only themselves
    pub fn ensure_can_access(&self, username: &str) -> Result<(), UserError> {
        if self.is_admin() || self.username == username { Ok(()) } else { Err(UserError::UnauthorizedUser) }
    }

    /// Modifying or deleting `target` additionally forbids admins acting on other admins
    pub fn ensure_can_manage(&self, target: &User) -> Result<(), UserError> {
        self.ensure_can_access(&target.username)?;
        if self.username != target.username && target.is_admin() {
            return Err(UserError::UserIsAdmin);
        }
        Ok(())
    }

    pub fn update_profile(
        &mut self,
        name: String,
        surname: String,
        address: String,
        birthdate: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), UserError> {
        ensure_not_future(birthdate, today).map_err(|_| UserError::Date)?;
        self.name = name;
        self.surname = surname;
        self.address = Some(address);
        self.birthdate = Some(birthdate);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError { UnauthorizedUser, UserIsAdmin, Date }
impl std::error::Error for UserError {}
impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnauthorizedUser => write!(f, "Not allowed to act on other users"),
            Self::UserIsAdmin => write!(f, "Target is an admin"),
            Self::Date => write!(f, "Birthdate in the future"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_rules() {
        let admin = User::new("root", "R", "Oot", Role::Admin);
        let other_admin = User::new("boss", "B", "Oss", Role::Admin);
        let customer = User::new("alice", "A", "Lice", Role::Customer);
        let manager = User::new("mark", "M", "Ark", Role::Manager);

        assert!(customer.ensure_can_access("alice").is_ok());
        assert_eq!(customer.ensure_can_access("mark"), Err(UserError::UnauthorizedUser));
        assert!(admin.ensure_can_access("alice").is_ok());

        assert!(admin.ensure_can_manage(&customer).is_ok());
        assert!(admin.ensure_can_manage(&admin).is_ok());
        assert_eq!(admin.ensure_can_manage(&other_admin), Err(UserError::UserIsAdmin));
        assert_eq!(manager.ensure_can_manage(&customer), Err(UserError::UnauthorizedUser));
    }

    #[test]
    fn test_update_profile_rejects_future_birthdate() {
        let mut user = User::new("alice", "A", "Lice", Role::Customer);
        let today: NaiveDate = "2024-05-05".parse().unwrap();
        let err = user.update_profile("Al".into(), "Ice".into(), "Via Roma 1".into(), "2024-05-06".parse().unwrap(), today);
        assert_eq!(err, Err(UserError::Date));
        assert_eq!(user.name(), "A");

        user.update_profile("Al".into(), "Ice".into(), "Via Roma 1".into(), "1990-01-01".parse().unwrap(), today).unwrap();
        assert_eq!(user.address(), Some("Via Roma 1"));
        assert_eq!(user.birthdate(), Some("1990-01-01".parse().unwrap()));
    }

    #[test]
    fn test_serialized_without_secrets() {
        let json = serde_json::to_value(User::new("alice", "A", "Lice", Role::Customer)).unwrap();
        assert_eq!(json["role"], "Customer");
        assert!(json["birthdate"].is_null());
        assert!(json.get("password").is_none());
    }
}
