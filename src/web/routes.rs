//! Web 路由定义

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::web::handlers;
use crate::web::types::AppState;

/// 创建 API 路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/page_by_url", post(handlers::page_by_url))
        .route("/api/translate", post(handlers::translate_page))
}
