use axum::{Json, extract::rejection::JsonRejection};
use serde::Deserialize;

use super::{Category, NewMark};
use crate::error::MarkError;

/// Body of a mark request. `tmdb_id` and `kind` are accepted as the older
/// names for `external_id` and `category`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkPayload {
    #[serde(alias = "tmdb_id")]
    pub external_id: i64,
    #[serde(alias = "kind")]
    pub category: String,
    pub title: Option<String>,
    pub poster_path: Option<String>,
}

impl MarkPayload {
    pub fn validate(self) -> Result<NewMark, MarkError> {
        let category = Category::from_str(&self.category).ok_or_else(|| {
            MarkError::Validation(format!(
                "category must be one of Movie, Series (got {:?})",
                self.category
            ))
        })?;

        Ok(NewMark {
            external_id: self.external_id,
            category,
            title: self.title,
            poster_path: self.poster_path,
        })
    }
}

/// Turns a raw JSON extraction into a validated mark, folding body
/// rejections (bad JSON, missing or mistyped fields) into validation errors.
pub fn parse_mark_request(body: Result<Json<MarkPayload>, JsonRejection>) -> Result<NewMark, MarkError> {
    let Json(payload) = body.map_err(|rejection| MarkError::Validation(rejection.body_text()))?;
    payload.validate()
}
