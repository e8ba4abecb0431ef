use crate::db::{Gateway, Record, SqlParam, StorageError};
use crate::models::{ActionUpdate, NewAction};

pub async fn list_all(gateway: &mut Gateway) -> Result<Vec<Record>, StorageError> {
    gateway
        .select(
            "SELECT id, date_time, value, est_effectue, type_action_id FROM actions",
            &[],
        )
        .await
}

pub async fn create(gateway: &mut Gateway, action: &NewAction) -> Result<u64, StorageError> {
    gateway
        .insert(
            "INSERT INTO actions (date_time, value, est_effectue, type_action_id)
             VALUES (?, ?, 0, ?)",
            &[
                action.date_time.clone(),
                action.value.clone(),
                SqlParam::Integer(action.type_action_id),
            ],
        )
        .await
}

pub async fn update(gateway: &mut Gateway, action: &ActionUpdate) -> Result<u64, StorageError> {
    gateway
        .update(
            "UPDATE actions SET date_time = ?, value = ?, est_effectue = ?, type_action_id = ?
             WHERE id = ?",
            &[
                action.date_time.clone(),
                action.value.clone(),
                SqlParam::Integer(action.est_effectue),
                SqlParam::Integer(action.type_action_id),
                SqlParam::Integer(action.id),
            ],
        )
        .await
}

pub async fn delete(gateway: &mut Gateway, id: i64) -> Result<u64, StorageError> {
    gateway
        .delete("DELETE FROM actions WHERE id = ?", &[SqlParam::Integer(id)])
        .await
}

/// Marks the action done regardless of its current state.
pub async fn complete(gateway: &mut Gateway, id: i64) -> Result<u64, StorageError> {
    gateway
        .update(
            "UPDATE actions SET est_effectue = 1 WHERE id = ?",
            &[SqlParam::Integer(id)],
        )
        .await
}
