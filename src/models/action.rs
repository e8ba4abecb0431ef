use serde::Deserialize;
use serde_json::Value;

use crate::db::SqlParam;
use crate::validation::{ValidationError, required_id, required_value};

/// Body of `POST /actions`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateAction {
    pub date_time: Option<Value>,
    pub value: Option<Value>,
    pub type_action_id: Option<Value>,
}

/// Body of `PATCH /actions`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAction {
    pub id: Option<Value>,
    pub date_time: Option<Value>,
    pub value: Option<Value>,
    pub est_effectue: Option<Value>,
    pub type_action_id: Option<Value>,
}

/// Body of `DELETE /actions` and `POST /actions/completer`.
#[derive(Debug, Default, Deserialize)]
pub struct ActionIdBody {
    pub id: Option<Value>,
}

/// A validated action to insert. The completion flag is not part of it:
/// new actions always start pending.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAction {
    pub date_time: SqlParam,
    pub value: SqlParam,
    pub type_action_id: i64,
}

/// A validated full replacement of an existing action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionUpdate {
    pub id: i64,
    pub date_time: SqlParam,
    pub value: SqlParam,
    pub est_effectue: i64,
    pub type_action_id: i64,
}

// Fields are checked in declaration order so the first invalid one is reported.

impl CreateAction {
    pub fn validate(self) -> Result<NewAction, ValidationError> {
        Ok(NewAction {
            date_time: required_value("date_time", self.date_time)?,
            value: required_value("value", self.value)?,
            type_action_id: required_id("type_action_id", self.type_action_id)?,
        })
    }
}

impl UpdateAction {
    pub fn validate(self) -> Result<ActionUpdate, ValidationError> {
        Ok(ActionUpdate {
            id: required_id("id", self.id)?,
            date_time: required_value("date_time", self.date_time)?,
            value: required_value("value", self.value)?,
            est_effectue: required_id("est_effectue", self.est_effectue)?,
            type_action_id: required_id("type_action_id", self.type_action_id)?,
        })
    }
}

impl ActionIdBody {
    pub fn validate(self) -> Result<i64, ValidationError> {
        required_id("id", self.id)
    }
}
