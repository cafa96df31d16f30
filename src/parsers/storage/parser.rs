//! 存储格式解析
//!
//! Confluence 的存储格式是 XHTML 片段（没有 `<html>`/`<body>` 外壳），
//! 因此这里使用 html5ever 的片段解析模式，解析结果再一次性转换为
//! [`Document`] 节点池。转换之后 RcDom 即被丢弃，后续流程只接触索引。

use html5ever::tendril::TendrilSink;
use html5ever::{local_name, namespace_url, ns, parse_fragment, QualName};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::dom::{Document, NodeData, NodeId};

/// 将存储格式字符串解析为节点池文档
pub fn parse_storage(markup: &str) -> Document {
    let dom = parse_fragment(
        RcDom::default(),
        Default::default(),
        QualName::new(None, ns!(html), local_name!("body")),
        vec![],
    )
    .one(markup);

    let mut doc = Document::new();
    let root = doc.root();

    // 片段解析的产物挂在 document 下的合成 <html> 元素里
    if let Some(container) = fragment_container(&dom) {
        for child in container.children.borrow().iter() {
            convert_node(child, &mut doc, root);
        }
    }

    doc
}

/// 取片段解析生成的容器元素
fn fragment_container(dom: &RcDom) -> Option<Handle> {
    dom.document
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, RcNodeData::Element { .. }))
        .cloned()
}

/// 递归地把一个 RcDom 节点接入节点池
fn convert_node(handle: &Handle, doc: &mut Document, parent: NodeId) {
    match &handle.data {
        RcNodeData::Element { name, attrs, .. } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.as_ref().to_string(), attr.value.to_string()))
                .collect();
            let element = doc.create_node(NodeData::Element {
                name: name.local.as_ref().to_string(),
                attrs,
            });
            doc.append_child(parent, element);
            for child in handle.children.borrow().iter() {
                convert_node(child, doc, element);
            }
        }
        RcNodeData::Text { contents } => {
            let text = doc.create_node(NodeData::Text(contents.borrow().to_string()));
            doc.append_child(parent, text);
        }
        RcNodeData::Comment { contents } => {
            let comment = doc.create_node(NodeData::Comment(contents.to_string()));
            doc.append_child(parent, comment);
        }
        // 片段里不会出现 doctype / PI，document 节点也不会嵌套出现
        _ => {
            for child in handle.children.borrow().iter() {
                convert_node(child, doc, parent);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_flat_fragment_without_adding_a_wrapper() {
        let doc = parse_storage("<p>Hello</p><p>World</p>");
        let root = doc.root();
        let names: Vec<_> = doc
            .children(root)
            .iter()
            .filter_map(|&id| doc.element_name(id).map(|n| n.to_string()))
            .collect();
        assert_eq!(names, vec!["p", "p"]);
    }

    #[test]
    fn keeps_attributes_and_nesting() {
        let doc = parse_storage(r#"<div class="panel"><p data-id="1">Text</p></div>"#);
        let root = doc.root();
        let div = doc.children(root)[0];
        assert_eq!(doc.element_name(div), Some("div"));
        assert_eq!(doc.attr(div, "class"), Some("panel"));
        let p = doc.children(div)[0];
        assert_eq!(doc.attr(p, "data-id"), Some("1"));
        assert_eq!(doc.text_content(p), "Text");
    }

    #[test]
    fn keeps_confluence_macro_tags() {
        let doc = parse_storage(
            r#"<ac:structured-macro ac:name="info"><ac:rich-text-body><p>Note</p></ac:rich-text-body></ac:structured-macro>"#,
        );
        let root = doc.root();
        let macro_node = doc.children(root)[0];
        assert_eq!(doc.element_name(macro_node), Some("ac:structured-macro"));
        assert_eq!(doc.attr(macro_node, "ac:name"), Some("info"));
        assert_eq!(doc.text_content(macro_node), "Note");
    }

    #[test]
    fn empty_input_yields_an_empty_document() {
        let doc = parse_storage("");
        assert!(doc.children(doc.root()).is_empty());
    }
}
