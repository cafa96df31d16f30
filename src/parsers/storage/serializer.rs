//! 存储格式序列化
//!
//! 由节点池直接驱动 html5ever 的序列化器，输出与输入同构的片段：
//! 标签、属性顺序、嵌套关系保持不变，文本与属性值按 HTML 规则转义。

use std::io;

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{namespace_url, ns, LocalName, QualName};

use super::dom::{Document, NodeData, NodeId};

struct SerializableStorage<'a> {
    doc: &'a Document,
}

impl Serialize for SerializableStorage<'_> {
    fn serialize<S>(&self, serializer: &mut S, _traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        // 根节点是合成的片段容器，无论遍历范围如何都只输出它的子树
        for &child in self.doc.children(self.doc.root()) {
            serialize_node(self.doc, child, serializer)?;
        }
        Ok(())
    }
}

fn serialize_node<S>(doc: &Document, id: NodeId, serializer: &mut S) -> io::Result<()>
where
    S: Serializer,
{
    match &doc.node(id).data {
        NodeData::Element { name, attrs } => {
            let qual_name = QualName::new(None, ns!(html), LocalName::from(name.as_str()));
            let attr_names: Vec<(QualName, &str)> = attrs
                .iter()
                .map(|(attr_name, value)| {
                    (
                        QualName::new(None, ns!(), LocalName::from(attr_name.as_str())),
                        value.as_str(),
                    )
                })
                .collect();
            serializer.start_elem(
                qual_name.clone(),
                attr_names.iter().map(|(attr_name, value)| (attr_name, *value)),
            )?;
            for &child in doc.children(id) {
                serialize_node(doc, child, serializer)?;
            }
            serializer.end_elem(qual_name)
        }
        NodeData::Text(text) => serializer.write_text(text),
        NodeData::Comment(comment) => serializer.write_comment(comment),
        NodeData::Root => {
            for &child in doc.children(id) {
                serialize_node(doc, child, serializer)?;
            }
            Ok(())
        }
    }
}

/// 将节点池文档序列化回存储格式字符串
pub fn serialize_storage(doc: &Document) -> String {
    let mut buf: Vec<u8> = Vec::new();
    serialize(
        &mut buf,
        &SerializableStorage { doc },
        SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        },
    )
    .expect("Unable to serialize document into buffer");
    String::from_utf8_lossy(&buf).to_string()
}
