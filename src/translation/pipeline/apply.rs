//! 译文回写模块
//!
//! 把后端返回的多行译文按位置写回批次节点

use crate::parsers::storage::Document;
use crate::translation::pipeline::batch::Batch;

/// 单个批次回写的结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// 文本被替换的节点数
    pub replaced: usize,
    /// 行数缺口：多出的原文节点数，或被丢弃的多余译文行数
    pub mismatched_lines: usize,
}

/// 把一条多行译文按位置回写到批次节点
///
/// 译文整体去除首尾空白后按换行符拆分，第 i 行写入第 i 个节点，以
/// 较短的一侧为准：多出的节点保留原文，多余的行被丢弃。行数不一致
/// 不作为错误处理，只在返回值里计数，由上层统计上报。
pub fn apply_batch_translation(doc: &mut Document, batch: &Batch, translated: &str) -> ApplyOutcome {
    let trimmed = translated.trim();
    let lines: Vec<&str> = trimmed.split('\n').collect();

    let mut replaced = 0;
    for (item, line) in batch.items.iter().zip(lines.iter()) {
        doc.set_text_content(item.node, line);
        replaced += 1;
    }

    ApplyOutcome {
        replaced,
        mismatched_lines: batch.items.len().abs_diff(lines.len()),
    }
}
