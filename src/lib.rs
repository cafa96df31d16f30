//! # Confluence Translator Library
//!
//! 获取 Confluence 页面（存储格式 XHTML），把其中的人类可读文本交给
//! chat-completion 风格的翻译后端，再把译文按原位置写回——标签、属性
//! 与嵌套结构保持不变。翻译是尽力而为的：单个批次失败只影响该批次
//! 的文本，整篇文档永远保持结构完整。
//!
//! ## 模块组织
//!
//! - `parsers` - 存储格式的解析与序列化（节点池文档模型）
//! - `translation` - 收集、分批、翻译、回写的完整管道
//! - `confluence` - Confluence REST 客户端与页面工具
//! - `env` - 环境变量读取
//! - `web` - JSON API 服务器（可选）

pub mod confluence;
pub mod env;
pub mod parsers;
pub mod translation;
#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used items for convenience
pub use confluence::{extract_page_id, ConfluenceClient, ConfluenceConfig, ConfluenceError};
pub use parsers::storage::{parse_storage, serialize_storage, Document};
pub use translation::{
    translate_storage_content, TranslationConfig, TranslationError, TranslationService,
};
