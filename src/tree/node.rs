//! Node type definitions.
//!
//! The pull cursor only distinguishes three kinds of nodes: the document
//! itself, elements, and text. Tree builders drop comments, processing
//! instructions and doctype declarations before they reach the arena.

use super::Attribute;
use crate::util::qname::split_qname;

/// A namespace declaration made on an element (`xmlns` or `xmlns:prefix`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// The declared prefix, or `None` for the default namespace.
    pub prefix: Option<String>,
    /// The namespace URI. An empty string undeclares the default namespace.
    pub uri: String,
}

/// The kind of a node and its associated data.
///
/// Navigation links (parent, children, siblings) are stored in
/// [`NodeData`](super::NodeData), not here.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The document node. There is exactly one per `Document`.
    Document,

    /// An element node, e.g. `<dc:title id="t">`.
    Element {
        /// The qualified name as written in the source (`dc:title`).
        name: String,
        /// The local part of the name (`title`).
        local_name: String,
        /// Namespace prefix, if any.
        prefix: Option<String>,
        /// Namespace URI after resolution, if any.
        namespace: Option<String>,
        /// Attributes in document order. Namespace declarations come first.
        attributes: Vec<Attribute>,
        /// Namespace declarations made on this element.
        namespaces: Vec<NamespaceDecl>,
    },

    /// A text node containing character data (entities already expanded).
    Text {
        /// The text content.
        content: String,
    },
}

impl NodeKind {
    /// Creates an element payload from a qualified name with no namespace,
    /// attributes, or declarations.
    #[must_use]
    pub fn element(qname: &str) -> Self {
        let (prefix, local) = split_qname(qname);
        Self::Element {
            name: qname.to_string(),
            local_name: local.to_string(),
            prefix: prefix.map(str::to_string),
            namespace: None,
            attributes: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// Creates a text payload.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }
}
