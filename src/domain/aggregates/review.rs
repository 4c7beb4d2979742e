//! Review Aggregate

use chrono::NaiveDate;
use serde::Serialize;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Review {
    model: String,
    user: String,
    score: u8,
    date: NaiveDate,
    comment: String,
}

impl Review {
    pub fn write(model: impl Into<String>, user: impl Into<String>, score: u8, comment: impl Into<String>, today: NaiveDate) -> Result<Self, ReviewError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) { return Err(ReviewError::InvalidScore); }
        let comment = comment.into();
        if comment.trim().is_empty() { return Err(ReviewError::EmptyComment); }
        Ok(Self { model: model.into(), user: user.into(), score, date: today, comment })
    }

    pub fn restore(model: String, user: String, score: u8, date: NaiveDate, comment: String) -> Self {
        Self { model, user, score, date, comment }
    }

    pub fn model(&self) -> &str { &self.model }
    pub fn user(&self) -> &str { &self.user }
    pub fn score(&self) -> u8 { self.score }
    pub fn date(&self) -> NaiveDate { self.date }
    pub fn comment(&self) -> &str { &self.comment }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewError { InvalidScore, EmptyComment }
impl std::error::Error for ReviewError {}
impl std::fmt::Display for ReviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidScore => write!(f, "score must be between {MIN_SCORE} and {MAX_SCORE}"),
            Self::EmptyComment => write!(f, "comment must not be empty"),
        }
    }
}
