//! 存储格式文档的节点池模型
//!
//! 文档是一段由索引寻址的节点池（arena）：父子关系通过 `NodeId` 索引列表
//! 表示，翻译流程对树的唯一修改是替换指定节点的文本内容。
//! 与 `Rc<RefCell<..>>` 句柄相比，索引寻址让可变访问始终经过唯一的
//! `Document` 所有者，遍历期间不存在共享可变引用。

/// 节点池中一个节点的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// 返回底层索引值
    pub fn index(self) -> usize {
        self.0
    }
}

/// 节点内容
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// 文档根，仅作为片段容器存在，不参与序列化输出
    Root,
    /// 元素节点：标签名与按出现顺序保存的属性表
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// 文本节点
    Text(String),
    /// 注释节点
    Comment(String),
}

/// 节点池中的一个节点
#[derive(Debug, Clone)]
pub struct Node {
    pub data: NodeData,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// 解析后的存储格式文档
///
/// 节点在解析时按文档顺序分配索引；被替换下来的旧子节点仍留在池中，
/// 但不再从根可达，序列化时自然被忽略。
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// 创建只含根节点的空文档
    pub fn new() -> Self {
        Document {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// 文档根节点
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// 按索引取节点
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// 在池中分配一个游离节点
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// 将 `child` 追加为 `parent` 的最后一个子节点
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// 节点的子节点索引表
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// 元素节点的标签名；非元素节点返回 `None`
    pub fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// 读取元素属性值
    pub fn attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(name, _)| name == attr_name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// 汇总一个子树的可读文本
    ///
    /// 每个后代文本节点先各自去除首尾空白，再按文档顺序拼接。
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        for descendant in self.descendants(id) {
            if let NodeData::Text(t) = &self.node(descendant).data {
                text.push_str(t.trim());
            }
        }
        text
    }

    /// 用单个文本节点替换一个元素的全部子树
    ///
    /// 原有子节点从树上摘除（变为不可达），不重建任何嵌套标记。
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        for child in std::mem::take(&mut self.node_mut(id).children) {
            self.node_mut(child).parent = None;
        }
        let text_node = self.create_node(NodeData::Text(text.to_string()));
        self.append_child(id, text_node);
    }

    /// 先序（深度优先）遍历 `id` 的全部后代，不含 `id` 本身
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack = Vec::new();
        stack.extend(self.children(id).iter().rev().copied());
        Descendants { doc: self, stack }
    }
}

/// [`Document::descendants`] 的迭代器
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(doc: &mut Document, name: &str) -> NodeId {
        doc.create_node(NodeData::Element {
            name: name.to_string(),
            attrs: Vec::new(),
        })
    }

    #[test]
    fn descendants_are_yielded_in_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let p1 = element(&mut doc, "p");
        let span = element(&mut doc, "span");
        let p2 = element(&mut doc, "p");
        doc.append_child(root, p1);
        doc.append_child(p1, span);
        doc.append_child(root, p2);

        let names: Vec<_> = doc
            .descendants(root)
            .filter_map(|id| doc.element_name(id).map(|n| n.to_string()))
            .collect();
        assert_eq!(names, vec!["p", "span", "p"]);
    }

    #[test]
    fn text_content_trims_and_concatenates_descendant_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = element(&mut doc, "p");
        let b = element(&mut doc, "b");
        let t1 = doc.create_node(NodeData::Text("  Hello ".to_string()));
        let t2 = doc.create_node(NodeData::Text(" World\n".to_string()));
        doc.append_child(root, p);
        doc.append_child(p, t1);
        doc.append_child(p, b);
        doc.append_child(b, t2);

        assert_eq!(doc.text_content(p), "HelloWorld");
    }

    #[test]
    fn set_text_content_replaces_the_whole_subtree() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = element(&mut doc, "p");
        let em = element(&mut doc, "em");
        let t = doc.create_node(NodeData::Text("old".to_string()));
        doc.append_child(root, p);
        doc.append_child(p, em);
        doc.append_child(em, t);

        doc.set_text_content(p, "new");

        assert_eq!(doc.children(p).len(), 1);
        let only = doc.children(p)[0];
        assert_eq!(doc.node(only).data, NodeData::Text("new".to_string()));
        assert_eq!(doc.text_content(p), "new");
    }

    #[test]
    fn attr_returns_the_first_matching_attribute() {
        let mut doc = Document::new();
        let div = doc.create_node(NodeData::Element {
            name: "div".to_string(),
            attrs: vec![("class".to_string(), "note".to_string())],
        });
        assert_eq!(doc.attr(div, "class"), Some("note"));
        assert_eq!(doc.attr(div, "id"), None);
    }
}
