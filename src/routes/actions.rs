use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::db::{self, Gateway, StorageError};
use crate::error::AppError;
use crate::models::{ActionIdBody, CreateAction, UpdateAction};
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let mut gateway = Gateway::open(&state.config.database_path).await?;
    let result = db::actions::list_all(&mut gateway).await;
    gateway.close().await;

    let actions = result.map_err(|e| match e {
        StorageError::Decode(_) => {
            tracing::error!("Failed to read actions: {}", e.sanitized());
            AppError::Unexpected(
                "Une erreur innattendue est survenue lors de l'obtention des actions".to_string(),
            )
        }
        StorageError::Operational(_) => AppError::Storage(e),
    })?;

    // An empty table is reported as missing, not as an empty list.
    if actions.is_empty() {
        return Err(AppError::NotFound(
            "Aucune action n'a été trouvé.".to_string(),
        ));
    }

    Ok(Json(json!({
        "message": "Nous avons trouvés des actions.",
        "liste_actions": actions,
    })))
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let req: CreateAction = named_fields(payload)?;
    let action = req.validate()?;

    let mut gateway = Gateway::open(&state.config.database_path).await?;
    let result = db::actions::create(&mut gateway, &action).await;
    gateway.close().await;

    if result? == 0 {
        return Err(AppError::Unexpected(
            "Une erreur innattendue est survenue lors de l'enregistrement de l'action."
                .to_string(),
        ));
    }

    tracing::info!("Action created (type {})", action.type_action_id);
    Ok(Json(json!({ "message": "Nous avons bien enregistré l'action." })))
}

pub async fn update(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let req: UpdateAction = named_fields(payload)?;
    let action = req.validate()?;

    let mut gateway = Gateway::open(&state.config.database_path).await?;
    let result = db::actions::update(&mut gateway, &action).await;
    gateway.close().await;

    if result? == 0 {
        return Err(AppError::NotFound(
            "L'action n'a pas pu être modifié, car celle-ci n'existe pas.".to_string(),
        ));
    }

    tracing::info!("Action {} updated", action.id);
    Ok(Json(json!({ "message": "Nous avons bien modifié l'action." })))
}

pub async fn delete(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let req: ActionIdBody = named_fields(payload)?;
    let id = req.validate()?;

    let mut gateway = Gateway::open(&state.config.database_path).await?;
    let result = db::actions::delete(&mut gateway, id).await;
    gateway.close().await;

    if result? == 0 {
        return Err(AppError::NotFound(
            "L'action n'a pas été trouvé et donc n'a pas été supprimé.".to_string(),
        ));
    }

    tracing::info!("Action {id} deleted");
    Ok(Json(json!({ "message": "Nous avons bien supprimé l'action." })))
}

pub async fn complete(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let req: ActionIdBody = named_fields(payload)?;
    let id = req.validate()?;

    let mut gateway = Gateway::open(&state.config.database_path).await?;
    let result = db::actions::complete(&mut gateway, id).await;
    gateway.close().await;

    // Unlike update and delete, an unknown id is not reported as 404 here.
    if result? == 0 {
        return Err(AppError::Unexpected(
            "Une erreur innattendue est survenue lors de la modification de l'action."
                .to_string(),
        ));
    }

    tracing::info!("Action {id} completed");
    Ok(Json(json!({ "message": "Nous avons bien modifié l'action." })))
}

/// Request bodies must be JSON objects; arrays would otherwise fill the
/// body fields by position.
fn named_fields<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(body) = payload?;
    let Value::Object(fields) = body else {
        return Err(AppError::Validation(
            "Le corps de la requête doit être un objet JSON.".to_string(),
        ));
    };
    serde_json::from_value(Value::Object(fields)).map_err(|e| AppError::Validation(e.to_string()))
}
