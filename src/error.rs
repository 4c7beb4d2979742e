use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::domain::aggregates::{CartError, ProductError, ReviewError, UserError};
use crate::domain::value_objects::{DateError, FilterError, ParseEnumError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("The parameters are not formatted properly: {0}")]
    Validation(String),

    #[error("Unauthenticated user")]
    Unauthenticated,

    #[error("Incorrect username and/or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("You cannot access the information of other users")]
    UnauthorizedUser,

    #[error("Admins cannot be modified or deleted by other admins")]
    UserIsAdmin,

    #[error("The user does not exist")]
    UserNotFound,

    #[error("The username already exists")]
    UserAlreadyExists,

    #[error("Product not found")]
    ProductNotFound,

    #[error("The product already exists")]
    ProductAlreadyExists,

    #[error("Product stock is empty")]
    EmptyProductStock,

    #[error("Product stock cannot satisfy the requested quantity")]
    LowProductStock,

    #[error("Cart not found")]
    CartNotFound,

    #[error("Product not in cart")]
    ProductNotInCart,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("You have already reviewed this product")]
    ExistingReview,

    #[error("You have not reviewed this product")]
    NoReviewProduct,

    #[error("Input date is not compatible with the current date")]
    Date,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated
            | Self::InvalidCredentials
            | Self::Forbidden(_)
            | Self::UnauthorizedUser
            | Self::UserIsAdmin => StatusCode::UNAUTHORIZED,
            Self::UserNotFound
            | Self::ProductNotFound
            | Self::CartNotFound
            | Self::ProductNotInCart
            | Self::NoReviewProduct => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists
            | Self::ProductAlreadyExists
            | Self::EmptyProductStock
            | Self::LowProductStock
            | Self::ExistingReview => StatusCode::CONFLICT,
            Self::EmptyCart | Self::Date => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message, "status": status.as_u16() }))).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // struct-level checks are reported under "__all__"; their code names the field
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| if field == "__all__" { e.code.to_string() } else { field.to_string() })
            })
            .collect();
        fields.sort();
        fields.dedup();
        Self::Validation(format!("invalid {}", fields.join(", ")))
    }
}

impl From<FilterError> for AppError {
    fn from(e: FilterError) -> Self { Self::Validation(e.to_string()) }
}

impl From<ParseEnumError> for AppError {
    fn from(e: ParseEnumError) -> Self { Self::Validation(e.to_string()) }
}

impl From<DateError> for AppError {
    fn from(_: DateError) -> Self { Self::Date }
}

impl From<ProductError> for AppError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::Date => Self::Date,
            ProductError::EmptyStock => Self::EmptyProductStock,
            ProductError::LowStock => Self::LowProductStock,
            other => Self::Validation(other.to_string()),
        }
    }
}

impl From<CartError> for AppError {
    fn from(e: CartError) -> Self {
        match e {
            CartError::EmptyCart => Self::EmptyCart,
            CartError::ProductNotInCart => Self::ProductNotInCart,
            CartError::EmptyProductStock => Self::EmptyProductStock,
            CartError::LowProductStock => Self::LowProductStock,
            // only unpaid carts are ever loaded for mutation
            CartError::AlreadyPaid => Self::CartNotFound,
        }
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::UnauthorizedUser => Self::UnauthorizedUser,
            UserError::UserIsAdmin => Self::UserIsAdmin,
            UserError::Date => Self::Date,
        }
    }
}

impl From<ReviewError> for AppError {
    fn from(e: ReviewError) -> Self { Self::Validation(e.to_string()) }
}
