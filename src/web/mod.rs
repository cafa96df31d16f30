//! Web 服务器模块
//!
//! 以 JSON API 的形式暴露页面获取与翻译能力

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::create_routes;
pub use types::AppState;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tracing::info;

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            bind_addr: "127.0.0.1".to_string(),
            port: 7080,
        }
    }
}

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, state: AppState) -> Self {
        WebServer { config, state }
    }

    /// 启动 Web 服务器
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = create_routes()
            .with_state(Arc::new(self.state.clone()))
            .layer(CorsLayer::permissive());

        let listener = tokio::net::TcpListener::bind(format!(
            "{}:{}",
            self.config.bind_addr, self.config.port
        ))
        .await?;

        info!(
            "Web 服务器启动: http://{}:{}",
            self.config.bind_addr, self.config.port
        );
        axum::serve(listener, app).await?;

        Ok(())
    }
}
