use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::assets::Assets;

pub async fn get_ui(State(assets): State<Arc<Assets>>) -> Response {
    ([(header::CONTENT_TYPE, "text/html")], assets.ui_page.clone()).into_response()
}
