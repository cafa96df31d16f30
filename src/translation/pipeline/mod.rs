//! 翻译管道模块
//!
//! 提供文本收集、批次划分和译文回写

pub mod apply;
pub mod batch;
pub mod collector;

// 重新导出主要类型
pub use apply::{apply_batch_translation, ApplyOutcome};
pub use batch::{create_batches, estimate_tokens, Batch};
pub use collector::{collect_translatable_texts, is_translatable_tag, TextItem, TRANSLATABLE_TAGS};
