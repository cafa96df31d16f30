//! Confluence 集成模块
//!
//! 翻译管道的外部协作方：
//! - `client` - REST API 通信与数据获取（v1 + v2）
//! - `content` - 页面记录提取与层级构建
//! - `urls` - 从用户输入提取页面 ID
//! - `error` - 错误处理

pub mod client;
pub mod content;
pub mod error;
pub mod urls;

// 重新导出主要的公共 API
pub use client::{ConfluenceClient, ConfluenceConfig};
pub use content::{
    build_descendants_tree, build_page_tree, extract_page_content, DescendantsTree, PageContent,
    PageTreeNode,
};
pub use error::{ConfluenceError, ConfluenceResult};
pub use urls::extract_page_id;
