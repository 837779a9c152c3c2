use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::query_builder::{CatalogTable, QueryBuildError, UpdateBuilder, UpdateStatement};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: f64,
}

/// Validated movie ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub rating: f64,
}

/// Wire shape of `/movies/add` and `/movies/update` bodies.
///
/// Every field is optional on the wire; a missing field takes its zero value,
/// which for updates means "leave unchanged".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieRequest {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: String,
    pub rating: f64,
}

/// Sparse movie update keyed by id. Zero values are absent fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieChanges {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub release_date: Option<NaiveDate>,
    pub rating: f64,
}

impl MovieChanges {
    pub fn to_update(&self) -> Result<UpdateStatement, QueryBuildError> {
        UpdateBuilder::new(CatalogTable::Movies)
            .text("title", &self.title)
            .text("description", &self.description)
            .date("release_date", self.release_date)
            .float("rating", self.rating)
            .build(self.id)
    }
}
