//! Tree-to-event compilation.
//!
//! [`compile`] walks a [`Document`] once, in document order, and produces the
//! complete event sequence the pull cursor replays. The walk keeps a stack
//! of open elements; when the node just visited is the last child of the
//! innermost open element, that element is closed, and the check repeats
//! for the next element out. A deep chain of last children therefore closes
//! in one step:
//!
//! ```text
//! <nav><ol><li><a>End</a></li></ol></nav>
//!
//! StartTag nav(1) StartTag ol(2) StartTag li(3) StartTag a(4)
//! StartTag #text(5) Text(5) EndTag #text(5)
//! EndTag a(4) EndTag li(3) EndTag ol(2) EndTag nav(1)
//! ```
//!
//! Text nodes are treated as leaf pseudo-elements, so each produces a
//! `StartTag`, `Text`, `EndTag` triple at its own depth.

use log::trace;

use crate::tree::{Document, NodeId};

/// The kind of a structural event.
///
/// [`EventKind::None`] is the "no event" sentinel returned before the first
/// advance and after the sequence is exhausted. It never appears inside a
/// compiled sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// No current event.
    None,
    /// The start of the document. Always the first event.
    StartDocument,
    /// The end of the document. Always the last event.
    EndDocument,
    /// An element (or text pseudo-element) opens.
    StartTag,
    /// An element (or text pseudo-element) closes.
    EndTag,
    /// Character data of a text node.
    Text,
}

impl EventKind {
    /// Returns the XMLPULL integer constant for this kind.
    ///
    /// ```
    /// use xmlpull::reader::EventKind;
    ///
    /// assert_eq!(EventKind::StartTag.code(), 2);
    /// assert_eq!(EventKind::None.code(), -1);
    /// ```
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::None => -1,
            Self::StartDocument => 0,
            Self::EndDocument => 1,
            Self::StartTag => 2,
            Self::EndTag => 3,
            Self::Text => 4,
        }
    }

    /// Returns `true` for `StartTag` and `EndTag`.
    #[must_use]
    pub fn is_tag(self) -> bool {
        matches!(self, Self::StartTag | Self::EndTag)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::StartDocument => write!(f, "StartDocument"),
            Self::EndDocument => write!(f, "EndDocument"),
            Self::StartTag => write!(f, "StartTag"),
            Self::EndTag => write!(f, "EndTag"),
            Self::Text => write!(f, "Text"),
        }
    }
}

/// One entry of a compiled event sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserEvent {
    kind: EventKind,
    node: NodeId,
    parent: Option<NodeId>,
    depth: usize,
}

impl ParserEvent {
    fn new(doc: &Document, kind: EventKind, node: NodeId, depth: usize) -> Self {
        Self {
            kind,
            node,
            parent: doc.parent(node),
            depth,
        }
    }

    /// The event kind.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The node the event was recorded for. Document events carry the
    /// document node.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The parent of [`node`](Self::node) at the time the event was recorded.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Nesting depth: 0 for document events, 1 for the root element.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Compiles a document into its complete, balanced event sequence.
///
/// # Examples
///
/// ```
/// use xmlpull::parser::parse_str;
/// use xmlpull::reader::events::{compile, EventKind};
///
/// let doc = parse_str("<?xml version=\"1.0\"?><root/>").unwrap();
/// let kinds: Vec<EventKind> = compile(&doc).iter().map(|e| e.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         EventKind::StartDocument,
///         EventKind::StartTag,
///         EventKind::EndTag,
///         EventKind::EndDocument,
///     ]
/// );
/// ```
#[must_use]
pub fn compile(doc: &Document) -> Vec<ParserEvent> {
    let root = doc.root();
    let mut events = Vec::with_capacity(doc.node_count() * 2 + 2);
    let mut open: Vec<NodeId> = Vec::new();

    events.push(ParserEvent::new(doc, EventKind::StartDocument, root, 0));

    for node in doc.descendants(root) {
        let depth = open.len() + 1;
        events.push(ParserEvent::new(doc, EventKind::StartTag, node, depth));

        if doc.has_children(node) {
            open.push(node);
            continue;
        }

        if doc.is_text(node) {
            events.push(ParserEvent::new(doc, EventKind::Text, node, depth));
        }
        events.push(ParserEvent::new(doc, EventKind::EndTag, node, depth));

        // Close every open element whose last child was just finished.
        let mut finished = node;
        while let Some(&top) = open.last() {
            if doc.last_child(top) != Some(finished) {
                break;
            }
            events.push(ParserEvent::new(doc, EventKind::EndTag, top, open.len()));
            open.pop();
            finished = top;
        }
        if finished != node {
            trace!("closed up to depth {} after {:?}", open.len() + 1, node);
        }
    }

    // Only reachable with a tree whose links were built inconsistently;
    // keep the sequence balanced regardless.
    while let Some(top) = open.pop() {
        events.push(ParserEvent::new(doc, EventKind::EndTag, top, open.len() + 1));
    }

    events.push(ParserEvent::new(doc, EventKind::EndDocument, root, 0));
    events
}
