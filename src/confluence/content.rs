//! 页面内容提取与层级构建
//!
//! 把 Confluence 返回的原始页面 JSON 映射为扁平记录，并从扁平页面
//! 列表组装父子层级。

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

/// 从原始页面 JSON 提取出的扁平记录
///
/// v1 与 v2 接口的字段布局不同，这里统一兼容两者；拿不到的字段保持
/// `None`，storage 正文缺失时为空串。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageContent {
    pub id: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub status: Option<String>,
    pub space_key: Option<String>,
    pub space_name: Option<String>,
    /// storage 格式的页面正文
    pub content: String,
    pub version: Option<u64>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub url: Option<String>,
}

/// 把页面 JSON 映射为 [`PageContent`]
pub fn extract_page_content(page: &Value) -> PageContent {
    PageContent {
        id: json_id(page),
        title: str_at(page, "/title"),
        content_type: str_at(page, "/type"),
        status: str_at(page, "/status"),
        space_key: str_at(page, "/space/key"),
        space_name: str_at(page, "/space/name"),
        content: str_at(page, "/body/storage/value").unwrap_or_default(),
        version: page.pointer("/version/number").and_then(Value::as_u64),
        created: str_at(page, "/created").or_else(|| str_at(page, "/createdAt")),
        updated: str_at(page, "/version/when"),
        url: str_at(page, "/_links/webui"),
    }
}

/// 页面树节点：原始页面记录加按层级挂好的子节点
#[derive(Debug, Clone, Serialize)]
pub struct PageTreeNode {
    #[serde(flatten)]
    pub page: Value,
    pub children: Vec<PageTreeNode>,
}

/// 按 `parentId` 把扁平页面列表组装成树
///
/// 父节点在列表之外（或没有父节点）的页面成为根；列表顺序在同级
/// 之间保持不变。
pub fn build_page_tree(pages: &[Value]) -> Vec<PageTreeNode> {
    let ids: HashSet<String> = pages.iter().filter_map(json_id).collect();

    let mut children_of: HashMap<String, Vec<usize>> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();
    for (index, page) in pages.iter().enumerate() {
        match parent_id(page) {
            Some(parent) if ids.contains(&parent) => {
                children_of.entry(parent).or_default().push(index);
            }
            _ => roots.push(index),
        }
    }

    roots
        .into_iter()
        .map(|index| build_node(index, pages, &children_of))
        .collect()
}

fn build_node(
    index: usize,
    pages: &[Value],
    children_of: &HashMap<String, Vec<usize>>,
) -> PageTreeNode {
    let children = json_id(&pages[index])
        .and_then(|id| children_of.get(&id))
        .map(|indices| {
            indices
                .iter()
                .map(|&child| build_node(child, pages, children_of))
                .collect()
        })
        .unwrap_or_default();

    PageTreeNode {
        page: pages[index].clone(),
        children,
    }
}

/// 一个页面的后代集合
#[derive(Debug, Clone, Serialize)]
pub struct DescendantsTree {
    /// 指定页面的直接子页面（最后一个祖先是该页面的条目）
    pub tree: Vec<Value>,
    /// 全部后代的扁平列表
    pub flat_list: Vec<Value>,
    pub total_count: usize,
}

/// 从后代列表构建 [`DescendantsTree`]
pub fn build_descendants_tree(descendants: &[Value], ancestor_id: &str) -> DescendantsTree {
    let mut tree = Vec::new();
    let mut flat_list = Vec::new();

    for item in descendants {
        let direct_child = item
            .get("ancestors")
            .and_then(Value::as_array)
            .and_then(|ancestors| ancestors.last())
            .and_then(json_id)
            .is_some_and(|id| id == ancestor_id);
        if direct_child {
            tree.push(item.clone());
        }
        flat_list.push(item.clone());
    }

    DescendantsTree {
        tree,
        total_count: flat_list.len(),
        flat_list,
    }
}

/// 读取条目的 id；v1 返回字符串，v2 偶尔返回数字
pub(crate) fn json_id(value: &Value) -> Option<String> {
    match value.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

fn parent_id(value: &Value) -> Option<String> {
    match value.get("parentId") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}
