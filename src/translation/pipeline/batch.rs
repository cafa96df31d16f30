//! 翻译批次划分模块
//!
//! 把收集到的文本项按估算 token 预算贪心地切成有序批次，批次内外都
//! 保持文档顺序。批次序列是对收集序列的一个划分：不丢项、不重复。

use crate::translation::pipeline::collector::TextItem;

/// 粗粒度 token 估算：`max(1, 字符数 / 2)`
///
/// 不是真正的分词器，只保证随文本长度单调增长；调用方不得依赖其
/// 精确值，只用它约束批次大小。
pub fn estimate_tokens(text: &str) -> usize {
    (text.chars().count() / 2).max(1)
}

/// 一个翻译批次：有序文本项与累计估算 token 数
#[derive(Debug, Clone, Default)]
pub struct Batch {
    /// 批次内的文本项，保持收集顺序
    pub items: Vec<TextItem>,
    /// 各项估算 token 数之和
    pub estimated_tokens: usize,
}

impl Batch {
    /// 批次内的节点数
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 批次是否为空
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 把各项原文按换行符拼接成一次后端请求的正文
    pub fn joined_source_text(&self) -> String {
        self.items
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 贪心划分批次
///
/// 逐项扫描：若加入当前项会超出 `max_tokens` 且当前批次非空，先关闭
/// 当前批次再另起新批次。单项自身就超预算时仍独占一个批次——不丢弃、
/// 不切分，这样的批次允许超出预算。
pub fn create_batches(items: Vec<TextItem>, max_tokens: usize) -> Vec<Batch> {
    let mut batches = Vec::new();
    let mut current = Batch::default();

    for item in items {
        let cost = estimate_tokens(&item.text);
        if current.estimated_tokens + cost > max_tokens && !current.is_empty() {
            batches.push(std::mem::take(&mut current));
        }
        current.estimated_tokens += cost;
        current.items.push(item);
    }
    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
