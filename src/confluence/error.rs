//! Confluence 客户端错误处理

use thiserror::Error;

/// Confluence REST 访问错误
#[derive(Error, Debug)]
pub enum ConfluenceError {
    /// 基础地址、用户名或 API token 缺失
    #[error("Confluence 配置不完整: {0}")]
    MissingConfig(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    Network(#[from] reqwest::Error),

    /// 页面不存在或没有访问权限
    #[error("页面不存在或没有权限 (404): {0}")]
    NotFound(String),

    /// 其它非成功状态码
    #[error("Confluence 返回 {status}: {body}")]
    Status { status: u16, body: String },

    /// 响应解析错误
    #[error("响应解析错误: {0}")]
    Json(#[from] serde_json::Error),
}

/// 错误结果类型别名
pub type ConfluenceResult<T> = Result<T, ConfluenceError>;
