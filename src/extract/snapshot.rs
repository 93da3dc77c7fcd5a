//! A serialized rendered document that can stand in for a live page
//!
//! Snapshots are what a host captures from its rendering engine: the element
//! tree with every text node's client rects. They are loaded from JSON, e.g.
//!
//! ```json
//! {"url": "https://example.com", "root": {"tag": "body", "children": [
//!   {"kind": "text", "text": "Hello", "boxes": [{"left": 0, "top": 0, "right": 40, "bottom": 16}]}
//! ]}}
//! ```

use anyhow::Context;
use serde::Deserialize;

use super::surface::{ElementInfo, LayoutError, TextSurface, VisibleText};
use crate::domain::Rect;

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSnapshot {
    pub url: String,
    pub root: Element,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub tag: String,
    /// Not rendered (display:none and friends); hides the whole subtree
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Element(Element),
    Text(TextLeaf),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextLeaf {
    pub text: String,
    /// `None` when the engine could not report rects for this node
    #[serde(default)]
    pub boxes: Option<Vec<Rect>>,
}

impl DocumentSnapshot {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Invalid document snapshot")
    }
}

/// A text leaf together with its containing element
#[derive(Debug, Clone, Copy)]
pub struct SnapshotText<'a> {
    leaf: &'a TextLeaf,
    tag: &'a str,
    hidden: bool,
}

impl VisibleText for SnapshotText<'_> {
    fn text(&self) -> &str {
        &self.leaf.text
    }

    fn parent(&self) -> Option<ElementInfo<'_>> {
        Some(ElementInfo {
            tag: self.tag,
            hidden: self.hidden,
        })
    }

    fn layout_boxes(&self) -> Result<Vec<Rect>, LayoutError> {
        self.leaf.boxes.clone().ok_or(LayoutError::Detached)
    }
}

struct Frame<'a> {
    element: &'a Element,
    hidden: bool,
    children: std::slice::Iter<'a, Node>,
}

/// Lazy depth-first walk over text leaves in document order
pub struct SnapshotWalker<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> SnapshotWalker<'a> {
    fn new(root: &'a Element) -> Self {
        Self {
            stack: vec![Frame {
                element: root,
                hidden: root.hidden,
                children: root.children.iter(),
            }],
        }
    }
}

impl<'a> Iterator for SnapshotWalker<'a> {
    type Item = Result<SnapshotText<'a>, LayoutError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let (element, hidden) = (frame.element, frame.hidden);
            match frame.children.next() {
                None => {
                    self.stack.pop();
                }
                Some(Node::Element(child)) => self.stack.push(Frame {
                    element: child,
                    hidden: hidden || child.hidden,
                    children: child.children.iter(),
                }),
                Some(Node::Text(leaf)) => {
                    return Some(Ok(SnapshotText {
                        leaf,
                        tag: &element.tag,
                        hidden,
                    }));
                }
            }
        }
    }
}

impl TextSurface for DocumentSnapshot {
    type Node<'a> = SnapshotText<'a>;

    fn url(&self) -> &str {
        &self.url
    }

    fn text_nodes(&self) -> Box<dyn Iterator<Item = Result<SnapshotText<'_>, LayoutError>> + '_> {
        Box::new(SnapshotWalker::new(&self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "url": "https://example.com",
        "root": {"tag": "body", "children": [
            {"kind": "text", "text": "first"},
            {"kind": "element", "tag": "div", "children": [
                {"kind": "text", "text": "nested"},
                {"kind": "element", "tag": "span", "hidden": true, "children": [
                    {"kind": "element", "tag": "b", "children": [
                        {"kind": "text", "text": "deep hidden"}
                    ]}
                ]}
            ]},
            {"kind": "text", "text": "last", "boxes": [{"left": 0, "top": 0, "right": 10, "bottom": 10}]}
        ]}
    }"#;

    #[test]
    fn test_walk_is_document_order() {
        let doc = DocumentSnapshot::from_json(DOC).unwrap();
        let texts: Vec<String> = doc
            .text_nodes()
            .map(|node| node.unwrap().text().to_string())
            .collect();
        assert_eq!(texts, ["first", "nested", "deep hidden", "last"]);
    }

    #[test]
    fn test_hidden_is_inherited() {
        let doc = DocumentSnapshot::from_json(DOC).unwrap();
        let deep = doc
            .text_nodes()
            .map(Result::unwrap)
            .find(|node| node.text() == "deep hidden")
            .unwrap();
        let parent = deep.parent().unwrap();
        assert_eq!(parent.tag, "b");
        assert!(parent.hidden);
    }

    #[test]
    fn test_missing_boxes_is_layout_error() {
        let doc = DocumentSnapshot::from_json(DOC).unwrap();
        let mut nodes = doc.text_nodes().map(Result::unwrap);
        assert_eq!(
            nodes.next().unwrap().layout_boxes(),
            Err(LayoutError::Detached)
        );
        let last = nodes.last().unwrap();
        assert_eq!(last.layout_boxes().unwrap().len(), 1);
    }

    #[test]
    fn test_fresh_traversal_restarts() {
        let doc = DocumentSnapshot::from_json(DOC).unwrap();
        let mut first = doc.text_nodes();
        first.next();
        assert_eq!(doc.text_nodes().count(), 4);
        assert_eq!(first.count(), 3);
    }
}
