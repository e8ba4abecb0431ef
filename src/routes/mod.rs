pub mod actions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/actions",
            get(actions::list)
                .post(actions::create)
                .patch(actions::update)
                .delete(actions::delete),
        )
        .route("/actions/completer", post(actions::complete))
}
