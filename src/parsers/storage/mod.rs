//! 存储格式文档处理模块
//!
//! - `dom`: 索引寻址的节点池文档模型
//! - `parser`: html5ever 片段解析 → 节点池
//! - `serializer`: 节点池 → 存储格式字符串

pub mod dom;
pub mod parser;
pub mod serializer;

// 重新导出主要的公共 API
pub use dom::{Document, Node, NodeData, NodeId};
pub use parser::parse_storage;
pub use serializer::serialize_storage;
