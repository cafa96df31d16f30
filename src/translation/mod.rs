//! 翻译模块
//!
//! 提供存储格式文档的结构保持翻译，模块划分：
//! - **config**: 后端凭证与管道参数
//! - **client**: chat-completion 后端客户端
//! - **pipeline**: 文本收集、批次划分、译文回写
//! - **service**: 运行编排与统计
//! - **error**: 错误处理
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use confluence_translator::translation::{TranslationConfig, TranslationService};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TranslationConfig::from_env()?;
//! let service = TranslationService::new(config)?;
//!
//! let result = service.translate_storage("<p>Hello</p>");
//! println!("{}", result.markup);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// 子模块声明
// ============================================================================

/// 后端客户端模块
pub mod client;

/// 配置管理模块
pub mod config;

/// 错误处理模块
pub mod error;

/// 文本处理管道模块
pub mod pipeline;

/// 运行编排模块
pub mod service;

// ============================================================================
// 核心API导出
// ============================================================================

pub use client::TranslationClient;
pub use config::{constants, TranslationConfig};
pub use error::{TranslationError, TranslationResult};
pub use pipeline::{
    apply_batch_translation, collect_translatable_texts, create_batches, estimate_tokens,
    ApplyOutcome, Batch, TextItem, TRANSLATABLE_TAGS,
};
pub use service::{PipelineStats, TranslatedStorage, TranslationService};

/// 翻译一段存储格式文档（便捷入口）
///
/// 配置缺失或非法时返回 `None`（翻译不可用），调用方应回退展示原文；
/// 其余情况返回尽力而为的译文，可能只有部分批次翻译成功。
pub fn translate_storage_content(markup: &str, config: &TranslationConfig) -> Option<String> {
    match TranslationService::new(config.clone()) {
        Ok(service) => Some(service.translate_storage(markup).markup),
        Err(e) => {
            tracing::error!("翻译服务不可用: {}", e);
            None
        }
    }
}
