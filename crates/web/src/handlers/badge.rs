use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};
use mcbadges_core::{AppError, util::query_map};
use mcbadges_images::badge::{BadgeRequest, render_png};
use mcbadges_modrinth::Registry;

use crate::assets::Assets;

pub async fn get_badge(
    RawQuery(query): RawQuery,
    State(registry): State<Registry>,
    State(assets): State<Arc<Assets>>,
) -> Result<Response, AppError> {
    let request = BadgeRequest::from_query(&query_map(query.as_deref()), &assets.template)?;
    let project = registry.project(&request.mod_id).await?;
    let icon = registry.icon(&project.icon_url).await?;
    let bot_text = request.bot_text.as_deref().unwrap_or(&project.title);
    let data = render_png(&assets.fonts, &request, bot_text, &icon)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("inline; filename={}.png", request.mod_id))?,
    );
    Ok((headers, data).into_response())
}
