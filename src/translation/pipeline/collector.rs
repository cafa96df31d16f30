//! 文本收集器模块
//!
//! 按文档顺序从节点池里收集可翻译文本

use crate::parsers::storage::{Document, NodeId};

/// 可翻译元素的标签集合
///
/// 段落、六级标题、列表项、表格单元格以及通用的行内/块级容器。
pub const TRANSLATABLE_TAGS: [&str; 12] = [
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th", "span", "div",
];

/// 一个待翻译文本项：节点索引加采集时汇总好的文本
#[derive(Debug, Clone)]
pub struct TextItem {
    /// 原文档中的节点
    pub node: NodeId,
    /// 采集时的可读文本（各片段已去除首尾空白）
    pub text: String,
}

/// 判断标签是否在可翻译集合内
pub fn is_translatable_tag(name: &str) -> bool {
    TRANSLATABLE_TAGS.contains(&name)
}

/// 按先序文档顺序收集全部可翻译文本项
///
/// 每个命中的元素收集一次，嵌套命中也各自收集：外层元素的汇总文本
/// 会包含内层文本，这与存储格式本身的结构一致。汇总后为空的元素
/// 被跳过。
pub fn collect_translatable_texts(doc: &Document) -> Vec<TextItem> {
    doc.descendants(doc.root())
        .filter_map(|id| {
            let name = doc.element_name(id)?;
            if !is_translatable_tag(name) {
                return None;
            }
            let text = doc.text_content(id);
            if text.is_empty() {
                None
            } else {
                Some(TextItem { node: id, text })
            }
        })
        .collect()
}
