//! Web 模块的数据类型定义

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::confluence::{ConfluenceConfig, PageContent};
use crate::translation::{PipelineStats, TranslationConfig};

/// 应用状态
///
/// 两份配置都允许缺失：Confluence 配置缺失时页面接口返回配置错误，
/// 翻译配置缺失时接口照常返回原文，`translated_body` 为 `null`。
#[derive(Clone)]
pub struct AppState {
    pub confluence: Option<ConfluenceConfig>,
    pub translation: Option<TranslationConfig>,
}

/// 按 URL 或 ID 获取页面的请求
#[derive(Debug, Deserialize)]
pub struct PageByUrlRequest {
    pub page_input: String,
}

/// 页面翻译请求；`page_id` 兼容字符串和数字两种写法
#[derive(Debug, Deserialize)]
pub struct TranslatePageRequest {
    pub page_id: Value,
}

/// 页面响应
#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page: PageContent,
    pub children: Vec<ChildPage>,
    /// 翻译后的正文；翻译不可用或失败时为 `null`，调用方应展示原文
    pub translated_body: Option<String>,
    /// 翻译运行统计；可据此发现行数不匹配等降级情况
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_stats: Option<PipelineStats>,
}

/// 子页面摘要
#[derive(Debug, Serialize)]
pub struct ChildPage {
    pub id: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "spaceId")]
    pub space_id: Option<Value>,
    #[serde(rename = "childPosition")]
    pub child_position: Option<Value>,
}

/// 翻译响应
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translated_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_stats: Option<PipelineStats>,
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub confluence_configured: bool,
    pub translation_configured: bool,
}
