use axum::{Router, http::StatusCode, routing::get};

use crate::AppState;

mod badge;
mod ui;

pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/", get(badge::get_badge))
        .route("/ui", get(ui::get_ui))
        .fallback(not_found)
}

async fn not_found() -> StatusCode { StatusCode::NOT_FOUND }

#[cfg(test)]
pub(crate) mod tests {
    use std::{io::Cursor, sync::Arc, time::Duration};

    use axum::{
        Json,
        body::{Body, Bytes, to_bytes},
        extract::Path,
        http::{Request, StatusCode, header},
        response::{IntoResponse, Response},
    };
    use image::{ImageFormat, Rgba, RgbaImage};
    use mcbadges_core::config::{AssetsConfig, BadgeDefaults, Config, RegistryConfig, ServerConfig};
    use mcbadges_modrinth::Registry;
    use tower::ServiceExt;

    use super::*;
    use crate::assets::Assets;

    pub const ICON_COLOR: Rgba<u8> = Rgba([219, 209, 180, 255]);

    fn icon_png() -> Vec<u8> {
        let icon = RgbaImage::from_pixel(64, 64, ICON_COLOR);
        let mut out = Vec::new();
        icon.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).unwrap();
        out
    }

    /// Serves a stand-in for the project registry and returns its base URL.
    async fn mock_registry() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let icon_url = format!("{base_url}/icon.png");
        let project = move |Path(id): Path<String>| {
            let icon_url = icon_url.clone();
            async move {
                if id == "slow" {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
                match id.as_str() {
                    "fabric-api" | "slow" => Json(serde_json::json!({
                        "slug": "fabric-api",
                        "title": "Fabric API",
                        "icon_url": icon_url,
                    }))
                    .into_response(),
                    "broken-icon" => Json(serde_json::json!({
                        "title": "Broken",
                        "icon_url": "http://127.0.0.1:1/icon.png",
                    }))
                    .into_response(),
                    _ => StatusCode::NOT_FOUND.into_response(),
                }
            }
        };
        let router = Router::new()
            .route("/project/{id}", get(project))
            .route("/icon.png", get(|| async { ([(header::CONTENT_TYPE, "image/png")], icon_png()) }));
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        base_url
    }

    fn asset(path: &str) -> std::path::PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets").join(path)
    }

    pub async fn state() -> AppState {
        let config = Config {
            server: ServerConfig::default(),
            registry: RegistryConfig {
                base_url: mock_registry().await,
                timeout_secs: 5,
                ..Default::default()
            },
            assets: AssetsConfig {
                regular_font: asset("fonts/DejaVuSans.ttf"),
                bold_font: asset("fonts/DejaVuSans-Bold.ttf"),
                ui_page: asset("ui.html"),
            },
            badge: BadgeDefaults::default(),
        };
        let assets = Assets::load(&config).unwrap();
        let registry = Registry::new(&config.registry).unwrap();
        AppState { registry, assets: Arc::new(assets) }
    }

    pub async fn router() -> Router { build_router().with_state(state().await) }

    pub async fn fetch(router: &Router, uri: &str) -> (Response<()>, Bytes) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX).await.unwrap();
        (Response::from_parts(parts, ()), body)
    }

    #[tokio::test]
    async fn test_ui() {
        let router = router().await;
        let expected = std::fs::read(asset("ui.html")).unwrap();
        for uri in ["/ui", "/ui?mod_id=sodium&bg_fill=zz"] {
            let (response, body) = fetch(&router, uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn test_not_found() {
        let router = router().await;
        for uri in ["/nonexistent", "/ui/", "/project/fabric-api"] {
            let (response, body) = fetch(&router, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            assert!(body.is_empty());
        }
    }
}
