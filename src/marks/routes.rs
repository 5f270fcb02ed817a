use axum::{
    Extension, Router,
    routing::{delete, get},
};

use super::{Collection, handler};
use crate::handler::AppState;

pub fn routes(collection: Collection) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_marks).post(handler::create_mark))
        .route("/movies", get(handler::list_movies))
        .route("/series", get(handler::list_series))
        .route("/:category/:external_id", delete(handler::delete_mark))
        .layer(Extension(collection))
}
