//! API 处理器
//!
//! 核心管道是同步阻塞的，处理器统一通过 `spawn_blocking` 调用，
//! 错误以 `{"error": "..."}` 的 JSON 形式返回。

use std::sync::Arc;

use axum::extract::{Json as ExtractJson, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use tokio::task;
use tracing::{error, info, warn};

use crate::confluence::{
    extract_page_content, extract_page_id, ConfluenceClient, ConfluenceError, PageContent,
};
use crate::translation::{PipelineStats, TranslationConfig, TranslationService};
use crate::web::types::{
    AppState, ChildPage, HealthResponse, PageByUrlRequest, PageResponse, TranslatePageRequest,
    TranslateResponse,
};

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        confluence_configured: state.confluence.is_some(),
        translation_configured: state.translation.is_some(),
    })
}

/// POST /api/page_by_url
///
/// 从输入提取页面 ID，获取页面与子页面，并尽力翻译正文。
pub async fn page_by_url(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<PageByUrlRequest>,
) -> Result<Json<PageResponse>, ApiError> {
    let page_id = extract_page_id(&request.page_input).ok_or_else(|| {
        api_error(StatusCode::BAD_REQUEST, "无法从输入中提取页面 ID")
    })?;
    info!(%page_id, "处理页面请求");

    let confluence = state
        .confluence
        .clone()
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Confluence 配置不完整"))?;
    let translation = state.translation.clone();

    let outcome = task::spawn_blocking(move || -> Result<PageResponse, ConfluenceError> {
        let client = ConfluenceClient::new(confluence)?;
        let page = client.get_page_content(&page_id)?;
        let page = extract_page_content(&page);
        let children = child_summaries(&client.get_page_children_v2(&page_id, 25)?);
        let (translated_body, translation_stats) = translate_body(&page, translation);
        Ok(PageResponse {
            page,
            children,
            translated_body,
            translation_stats,
        })
    })
    .await;

    unwrap_blocking(outcome).map(Json)
}

/// POST /api/translate
///
/// 按页面 ID 重新获取并翻译正文。
pub async fn translate_page(
    State(state): State<Arc<AppState>>,
    ExtractJson(request): ExtractJson<TranslatePageRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let page_id = match &request.page_id {
        Value::String(id) => id.trim().to_string(),
        Value::Number(id) => id.to_string(),
        _ => return Err(api_error(StatusCode::BAD_REQUEST, "page_id 缺失或类型非法")),
    };
    info!(%page_id, "处理重新翻译请求");

    let confluence = state
        .confluence
        .clone()
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Confluence 配置不完整"))?;
    let translation = state.translation.clone();

    let outcome = task::spawn_blocking(move || -> Result<TranslateResponse, ConfluenceError> {
        let client = ConfluenceClient::new(confluence)?;
        let page = client.get_page_content(&page_id)?;
        let page = extract_page_content(&page);
        let (translated_body, translation_stats) = translate_body(&page, translation);
        Ok(TranslateResponse {
            translated_body,
            translation_stats,
        })
    })
    .await;

    unwrap_blocking(outcome).map(Json)
}

/// 尽力翻译页面正文；翻译不可用时返回 `(None, None)`
fn translate_body(
    page: &PageContent,
    translation: Option<TranslationConfig>,
) -> (Option<String>, Option<PipelineStats>) {
    let config = match translation {
        Some(config) => config,
        None => {
            warn!("未配置翻译后端，返回原文");
            return (None, None);
        }
    };
    if page.content.is_empty() {
        return (None, None);
    }

    match TranslationService::new(config) {
        Ok(service) => {
            let result = service.translate_storage(&page.content);
            (Some(result.markup), Some(result.stats))
        }
        Err(e) => {
            error!("翻译服务不可用: {}", e);
            (None, None)
        }
    }
}

/// 把子页面列表映射为摘要
fn child_summaries(children: &Value) -> Vec<ChildPage> {
    children
        .get("results")
        .and_then(Value::as_array)
        .map(|results| {
            results
                .iter()
                .map(|child| ChildPage {
                    id: child.get("id").and_then(Value::as_str).map(str::to_string),
                    title: child
                        .get("title")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    status: child
                        .get("status")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    space_id: child.get("spaceId").cloned(),
                    child_position: child.get("childPosition").cloned(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn unwrap_blocking<T>(
    outcome: Result<Result<T, ConfluenceError>, task::JoinError>,
) -> Result<T, ApiError> {
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(ConfluenceError::NotFound(_))) => Err(api_error(
            StatusCode::NOT_FOUND,
            "页面不存在或没有权限 (404)",
        )),
        Ok(Err(e)) => {
            error!("Confluence 请求失败: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
        Err(e) => {
            error!("处理任务失败: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "处理任务失败"))
        }
    }
}
