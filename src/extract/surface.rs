//! The capability a rendering surface offers to the text extractor

use thiserror::Error;

use crate::domain::Rect;

/// Elements whose text never counts as page content
pub const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Failure while reading one node's layout or while advancing the traversal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("text node is not attached to the layout tree")]
    Detached,
    #[error("layout query failed: {0}")]
    Query(String),
}

/// The element that directly contains a text node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementInfo<'a> {
    /// Lowercase tag name
    pub tag: &'a str,
    /// True when the element (or an ancestor) is not rendered
    pub hidden: bool,
}

impl ElementInfo<'_> {
    /// Whether text inside this element is page content
    pub fn is_content(&self) -> bool {
        !self.hidden
            && !NON_CONTENT_TAGS
                .iter()
                .any(|tag| self.tag.eq_ignore_ascii_case(tag))
    }
}

/// A text-bearing node produced by a surface traversal
pub trait VisibleText {
    /// Raw node text, unnormalized
    fn text(&self) -> &str;

    /// Nearest element ancestor, `None` for orphaned text
    fn parent(&self) -> Option<ElementInfo<'_>>;

    /// Layout boxes of the node; wrapped text yields one box per line fragment
    fn layout_boxes(&self) -> Result<Vec<Rect>, LayoutError>;
}

/// Anything that can enumerate its rendered text in document order.
///
/// Each call to [`TextSurface::text_nodes`] starts a fresh, finite traversal.
pub trait TextSurface {
    type Node<'a>: VisibleText
    where
        Self: 'a;

    /// Address of the document being shown
    fn url(&self) -> &str;

    fn text_nodes(&self) -> Box<dyn Iterator<Item = Result<Self::Node<'_>, LayoutError>> + '_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_content_elements() {
        for tag in ["script", "STYLE", "noscript", "template"] {
            let info = ElementInfo { tag, hidden: false };
            assert!(!info.is_content(), "{tag} should not be content");
        }
    }

    #[test]
    fn test_hidden_element_is_not_content() {
        let info = ElementInfo {
            tag: "div",
            hidden: true,
        };
        assert!(!info.is_content());
        assert!(
            ElementInfo {
                tag: "p",
                hidden: false
            }
            .is_content()
        );
    }
}
