//! # 解析器模块
//!
//! 处理 Confluence 存储格式（XHTML 片段）的解析与序列化：
//!
//! - `storage` - 节点池文档模型、片段解析、序列化

pub mod storage;

// Re-export commonly used items for convenience
pub use storage::{parse_storage, serialize_storage, Document, NodeData, NodeId};
