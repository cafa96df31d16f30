//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug)]
pub enum TranslationError {
    /// 配置错误：后端地址、密钥或部署名缺失、非法
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误：请求未能到达后端、超时或响应体无法解码
    #[error("网络错误: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// 后端返回了非成功状态码
    #[error("翻译后端返回 {status}: {body}")]
    ApiError { status: u16, body: String },

    /// 响应结构不符合预期
    #[error("响应无效: {0}")]
    InvalidResponse(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

impl TranslationError {
    /// 是否属于调用前就能发现的致命配置问题
    ///
    /// 配置错误使整个翻译运行不可用；其余错误只影响单个批次。
    pub fn is_fatal(&self) -> bool {
        matches!(self, TranslationError::ConfigError(_))
    }
}
