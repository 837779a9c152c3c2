use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::query_builder::{CatalogTable, QueryBuildError, UpdateBuilder, UpdateStatement};
use crate::types::deserialize_optional_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub birthdate: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActor {
    pub name: String,
    pub gender: String,
    pub birthdate: Option<NaiveDate>,
}

/// Wire shape of `/actors/add` and `/actors/update` bodies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActorRequest {
    pub id: i32,
    pub name: String,
    pub gender: String,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub birthdate: Option<NaiveDate>,
}

/// Sparse actor update keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorChanges {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub birthdate: Option<NaiveDate>,
}

impl ActorChanges {
    pub fn to_update(&self) -> Result<UpdateStatement, QueryBuildError> {
        UpdateBuilder::new(CatalogTable::Actors)
            .text("name", &self.name)
            .text("gender", &self.gender)
            .date("birthdate", self.birthdate)
            .build(self.id)
    }
}

impl From<ActorRequest> for ActorChanges {
    fn from(req: ActorRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            gender: req.gender,
            birthdate: req.birthdate,
        }
    }
}
