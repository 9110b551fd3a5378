//! Arena-based document tree.
//!
//! Every tree builder (strict XML or lenient HTML) produces the same
//! [`Document`]. All nodes live in a contiguous `Vec<NodeData>` owned by the
//! document and are referenced by [`NodeId`], a newtype over `NonZeroU32`.
//!
//! The pull cursor keeps `NodeId`s in its events and asks the document for
//! names, attributes and namespace bindings on demand. Nothing in the cursor
//! mutates the tree.

mod node;

pub use node::{NamespaceDecl, NodeKind};

use std::num::NonZeroU32;

/// The namespace URI bound to the `xml` prefix.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// The namespace URI of `xmlns` declaration attributes.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// A typed index into the document's node arena.
///
/// `Option<NodeId>` has the same size as `NodeId` (niche optimization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0.
    #[allow(clippy::expect_used, clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self(NonZeroU32::new(index as u32).expect("NodeId index must be non-zero"))
    }

    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// Storage for a single node in the document arena.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// What kind of node this is and its payload.
    pub kind: NodeKind,
    /// Parent node. The document node has none.
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node (for O(1) append and last-child checks).
    pub last_child: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }
}

/// An attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The qualified name as written (`xml:lang`, `xmlns:dc`, `href`).
    pub name: String,
    /// The local part of the name (`lang`, `dc`, `href`).
    pub local_name: String,
    /// Namespace prefix, if any.
    pub prefix: Option<String>,
    /// Namespace URI, if any.
    pub namespace: Option<String>,
    /// The attribute value with entities expanded.
    pub value: String,
}

impl Attribute {
    /// Creates an attribute without a namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            local_name: name.clone(),
            name,
            prefix: None,
            namespace: None,
            value: value.into(),
        }
    }

    /// Creates the attribute a DOM would expose for a namespace declaration.
    #[must_use]
    pub fn from_declaration(decl: &NamespaceDecl) -> Self {
        match &decl.prefix {
            Some(prefix) => Self {
                name: format!("xmlns:{prefix}"),
                local_name: prefix.clone(),
                prefix: Some("xmlns".to_string()),
                namespace: Some(XMLNS_NAMESPACE.to_string()),
                value: decl.uri.clone(),
            },
            None => Self {
                name: "xmlns".to_string(),
                local_name: "xmlns".to_string(),
                prefix: None,
                namespace: Some(XMLNS_NAMESPACE.to_string()),
                value: decl.uri.clone(),
            },
        }
    }
}

/// A parsed document.
///
/// # Examples
///
/// ```
/// use xmlpull::parser::parse_str;
///
/// let doc = parse_str("<?xml version=\"1.0\"?><root><child/></root>").unwrap();
/// let root = doc.root_element().unwrap();
/// assert_eq!(doc.node_name(root), Some("root"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// The node arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<NodeData>,
    /// The document node id.
    root: NodeId,
}

impl Document {
    /// Creates a new document containing only the document node.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        // Index 0: placeholder (NodeId uses NonZeroU32)
        nodes.push(NodeData::new(NodeKind::Document));
        nodes.push(NodeData::new(NodeKind::Document));
        Self {
            nodes,
            root: NodeId::from_index(1),
        }
    }

    /// Returns the document node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the first element child of the document node.
    #[must_use]
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.root).find(|&id| self.is_element(id))
    }

    /// Returns the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a different document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.as_index()]
    }

    /// Returns `true` if the node is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element { .. })
    }

    /// Returns `true` if the node is a text node.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Text { .. })
    }

    /// Returns the qualified name of an element.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the namespace prefix of an element.
    #[must_use]
    pub fn node_prefix(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { prefix, .. } => prefix.as_deref(),
            _ => None,
        }
    }

    /// Returns the namespace URI of an element, if any.
    #[must_use]
    pub fn node_namespace(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Element { namespace, .. } => namespace.as_deref(),
            _ => None,
        }
    }

    /// Returns the content of a text node.
    #[must_use]
    pub fn node_text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).kind {
            NodeKind::Text { content } => Some(content),
            _ => None,
        }
    }

    /// Returns the concatenated text of a node and all its descendants.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        std::iter::once(id)
            .chain(self.descendants(id))
            .filter_map(|n| self.node_text(n))
            .collect()
    }

    /// Returns the attributes of an element, or an empty slice.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        match &self.node(id).kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Returns the namespace declarations made on an element.
    #[must_use]
    pub fn namespace_declarations(&self, id: NodeId) -> &[NamespaceDecl] {
        match &self.node(id).kind {
            NodeKind::Element { namespaces, .. } => namespaces,
            _ => &[],
        }
    }

    /// Returns every declaration in scope at `id`, outermost element first.
    ///
    /// Shadowed declarations are included, in the order they were made.
    #[must_use]
    pub fn in_scope_namespaces(&self, id: NodeId) -> Vec<&NamespaceDecl> {
        let mut chain: Vec<NodeId> = self.ancestors(id).collect();
        chain.reverse();
        chain
            .into_iter()
            .flat_map(|n| self.namespace_declarations(n))
            .collect()
    }

    /// Resolves a prefix to a namespace URI from the scope of `id`.
    ///
    /// `None` looks up the default namespace. The `xml` and `xmlns` prefixes
    /// are always bound. An empty `xmlns=""` undeclares the default.
    #[must_use]
    pub fn lookup_namespace_uri(&self, id: NodeId, prefix: Option<&str>) -> Option<&str> {
        match prefix {
            Some("xml") => return Some(XML_NAMESPACE),
            Some("xmlns") => return Some(XMLNS_NAMESPACE),
            _ => {}
        }
        self.ancestors(id)
            .flat_map(|n| self.namespace_declarations(n))
            .find(|decl| decl.prefix.as_deref() == prefix)
            .and_then(|decl| (!decl.uri.is_empty()).then_some(decl.uri.as_str()))
    }

    // --- Navigation ---

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    /// Returns the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    /// Returns the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Returns `true` if the node has at least one child.
    #[must_use]
    pub fn has_children(&self, id: NodeId) -> bool {
        self.node(id).first_child.is_some()
    }

    /// Returns an iterator over the children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Returns an iterator over a node and its ancestors (walking up to root).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: Some(id),
        }
    }

    /// Returns an iterator over all descendants of a node in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            root: id,
            next: self.first_child(id),
        }
    }

    // --- Construction ---

    /// Allocates a new node in the arena and returns its `NodeId`.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(kind));
        NodeId::from_index(index)
    }

    /// Appends a child node to the end of a parent's child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.node(child).parent.is_none(),
            "child already has a parent"
        );

        self.node_mut(child).parent = Some(parent);

        if let Some(last) = self.node(parent).last_child {
            self.node_mut(last).next_sibling = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
        }
        self.node_mut(parent).last_child = Some(child);
    }

    /// Creates a node and appends it to `parent` in one step.
    pub fn append_new(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.create_node(kind);
        self.append_child(parent, id);
        id
    }

    /// Returns the number of nodes in the arena, the document node included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1 // subtract placeholder at index 0
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// --- Iterators ---

/// Iterator over the children of a node.
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).next_sibling;
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.node(current).parent;
        Some(current)
    }
}

/// Pre-order iterator over all descendants of a node.
pub struct Descendants<'a> {
    doc: &'a Document,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        if let Some(child) = self.doc.first_child(current) {
            self.next = Some(child);
            return Some(current);
        }

        // Climb until a node with a following sibling, stopping at the root.
        let mut cursor = current;
        loop {
            if cursor == self.root {
                self.next = None;
                break;
            }
            if let Some(sibling) = self.doc.next_sibling(cursor) {
                self.next = Some(sibling);
                break;
            }
            match self.doc.parent(cursor) {
                Some(parent) => cursor = parent,
                None => {
                    self.next = None;
                    break;
                }
            }
        }
        Some(current)
    }
}
