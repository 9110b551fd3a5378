//! XMLPULL-style pull cursor over a parsed document.
//!
//! [`PullParser`] parses its whole input up front, compiles the tree into a
//! flat event sequence (see [`events`]) and then replays that sequence one
//! event per [`advance`](PullParser::advance). Accessors answer questions
//! about the current event by consulting the owned [`Document`]; nothing
//! the cursor does mutates the tree.
//!
//! Text nodes appear as pseudo-elements named `#text`: a `StartTag`, the
//! `Text` event itself, then an `EndTag`, all at the same depth.
//!
//! # Examples
//!
//! ```
//! use xmlpull::reader::{EventKind, PullParser};
//!
//! let mut parser = PullParser::new();
//! parser.set_input("<?xml version=\"1.0\"?><root><child>Hello</child></root>").unwrap();
//!
//! let mut tags = Vec::new();
//! while parser.advance() != EventKind::None {
//!     if parser.event_type() == EventKind::StartTag {
//!         tags.push(parser.name().unwrap_or_default().to_string());
//!     }
//! }
//!
//! assert_eq!(tags, vec!["root", "child", "#text"]);
//! ```

pub mod events;
pub mod feature;

pub use events::{EventKind, ParserEvent};
pub use feature::{Feature, FEATURE_PROCESS_NAMESPACES, FEATURE_RELAXED};

use log::debug;

use crate::encoding::decode_to_utf8;
use crate::error::{ParseError, PullError};
use crate::parser::{parse_with_options, ParseOptions};
use crate::tree::{Attribute, Document, NamespaceDecl, NodeId};
use crate::util::qname::name_matches;

/// The name reported for the text pseudo-element.
pub const TEXT_NAME: &str = "#text";

/// A forward-only cursor over the events of one document.
///
/// A parser is reusable: each [`set_input`](Self::set_input) replaces the
/// previous document and rewinds the cursor.
#[derive(Debug, Clone)]
pub struct PullParser {
    options: ParseOptions,
    process_namespaces: bool,
    relaxed: bool,
    document: Document,
    events: Vec<ParserEvent>,
    /// Number of `advance` calls since the last input, capped one past the
    /// end. The current event is `events[next - 1]`.
    next: usize,
}

impl Default for PullParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PullParser {
    /// Creates a parser with default options and no input.
    ///
    /// Namespace processing starts disabled and relaxed parsing enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Creates a parser that builds its trees with the given options.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlpull::parser::{Grammar, ParseOptions};
    /// use xmlpull::reader::{EventKind, PullParser};
    ///
    /// let opts = ParseOptions::default().grammar(Some(Grammar::Xml));
    /// let mut parser = PullParser::with_options(opts);
    /// parser.set_input("<root/>").unwrap();
    /// parser.advance();
    /// assert_eq!(parser.advance(), EventKind::StartTag);
    /// assert_eq!(parser.name(), Some("root"));
    /// ```
    #[must_use]
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            process_namespaces: false,
            relaxed: true,
            document: Document::new(),
            events: Vec::new(),
            next: 0,
        }
    }

    // === Input ===

    /// Parses `content` and positions the cursor before the first event.
    ///
    /// Content starting with an XML declaration is parsed as strict XML,
    /// anything else as lenient HTML, unless the parser's options force a
    /// grammar.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` when strict XML input is malformed. The cursor
    /// is then left without a document: every `advance` returns
    /// [`EventKind::None`] until new input is set.
    pub fn set_input(&mut self, content: &str) -> Result<(), ParseError> {
        self.clear();
        let grammar = self.options.grammar_for(content);
        self.document = parse_with_options(content, &self.options)?;
        self.events = events::compile(&self.document);
        debug!(
            "input set: {grammar} grammar, {} nodes, {} events",
            self.document.node_count(),
            self.events.len()
        );
        Ok(())
    }

    /// Decodes raw bytes and then behaves like [`set_input`](Self::set_input).
    ///
    /// A byte order mark, or the `encoding` of a leading XML declaration,
    /// selects the character encoding. Without either, UTF-8 is assumed.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` when the bytes cannot be decoded or the decoded
    /// content is malformed XML.
    pub fn set_input_bytes(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        self.clear();
        let content =
            decode_to_utf8(bytes).map_err(|e| ParseError::without_location(e.to_string()))?;
        self.set_input(&content)
    }

    fn clear(&mut self) {
        self.document = Document::new();
        self.events.clear();
        self.next = 0;
    }

    // === Movement ===

    /// Moves to the next event and returns its kind.
    ///
    /// Once the sequence is exhausted this returns [`EventKind::None`] on
    /// every call.
    pub fn advance(&mut self) -> EventKind {
        if self.next <= self.events.len() {
            self.next += 1;
        }
        self.event_type()
    }

    /// Returns the kind of the current event without moving.
    #[must_use]
    pub fn event_type(&self) -> EventKind {
        self.current_event()
            .map_or(EventKind::None, ParserEvent::kind)
    }

    /// Returns the depth of the current event: 0 for the document events,
    /// 1 for the root element. `None` when there is no current event.
    #[must_use]
    pub fn depth(&self) -> Option<usize> {
        self.current_event().map(ParserEvent::depth)
    }

    // === Names and text ===

    /// Returns the qualified name on a `StartTag` or `EndTag`.
    ///
    /// The text pseudo-element is named [`TEXT_NAME`].
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        let node = self.current_tag()?;
        if self.document.is_text(node) {
            return Some(TEXT_NAME);
        }
        self.document.node_name(node)
    }

    /// Returns the element prefix on a `StartTag` or `EndTag` when namespace
    /// processing is enabled.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        if !self.process_namespaces {
            return None;
        }
        self.document.node_prefix(self.current_tag()?)
    }

    /// Returns the character data of a `Text` event.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        let event = self.current_event()?;
        if event.kind() != EventKind::Text {
            return None;
        }
        self.document.node_text(event.node())
    }

    /// Returns `true` if the current event is `Text` and its content is
    /// empty or only XML whitespace.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.text()
            .is_some_and(|t| t.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r')))
    }

    // === Namespaces ===

    /// Returns the namespace URI of the current element.
    ///
    /// With namespace processing disabled this is always `Some("")`. With
    /// it enabled, a tag event of an element yields its namespace (`""` for
    /// none) and every other position yields `None`.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        if !self.process_namespaces {
            return Some("");
        }
        let node = self.current_tag()?;
        if !self.document.is_element(node) {
            return None;
        }
        Some(self.document.node_namespace(node).unwrap_or(""))
    }

    /// Resolves `prefix` (`None` for the default namespace) in the scope of
    /// the current element, or of the enclosing element on text events.
    ///
    /// Works whether or not namespace processing is enabled.
    #[must_use]
    pub fn namespace_for_prefix(&self, prefix: Option<&str>) -> Option<&str> {
        let scope = self.scope_node()?;
        self.document.lookup_namespace_uri(scope, prefix)
    }

    /// Counts the distinct element namespaces among all events at `depth`.
    ///
    /// Always 0 when namespace processing is disabled.
    #[must_use]
    pub fn namespace_count(&self, depth: usize) -> usize {
        if !self.process_namespaces {
            return 0;
        }
        let mut seen: Vec<&str> = Vec::new();
        for event in self.events.iter().filter(|e| e.depth() == depth) {
            if let Some(uri) = self.document.node_namespace(event.node()) {
                if !seen.contains(&uri) {
                    seen.push(uri);
                }
            }
        }
        seen.len()
    }

    /// Returns the number of namespace declarations in scope at the current
    /// position. Always 0 when namespace processing is disabled.
    #[must_use]
    pub fn in_scope_namespace_count(&self) -> usize {
        self.visible_namespaces().len()
    }

    /// Returns the prefix of the in-scope declaration at `pos`, outermost
    /// first. `Ok(None)` is the default namespace.
    ///
    /// # Errors
    ///
    /// Returns `PullError::IndexOutOfRange` when `pos` is not below
    /// [`in_scope_namespace_count`](Self::in_scope_namespace_count).
    pub fn namespace_prefix(&self, pos: usize) -> Result<Option<&str>, PullError> {
        self.visible_namespace(pos).map(|decl| decl.prefix.as_deref())
    }

    /// Returns the URI of the in-scope declaration at `pos`, outermost first.
    ///
    /// # Errors
    ///
    /// Returns `PullError::IndexOutOfRange` when `pos` is not below
    /// [`in_scope_namespace_count`](Self::in_scope_namespace_count).
    pub fn namespace_uri(&self, pos: usize) -> Result<&str, PullError> {
        self.visible_namespace(pos).map(|decl| decl.uri.as_str())
    }

    fn visible_namespaces(&self) -> Vec<&NamespaceDecl> {
        match self.scope_node() {
            Some(node) if self.process_namespaces => self.document.in_scope_namespaces(node),
            _ => Vec::new(),
        }
    }

    fn visible_namespace(&self, pos: usize) -> Result<&NamespaceDecl, PullError> {
        let decls = self.visible_namespaces();
        decls
            .get(pos)
            .copied()
            .ok_or(PullError::IndexOutOfRange {
                index: pos,
                len: decls.len(),
            })
    }

    // === Attributes ===

    /// Returns the number of attributes on a `StartTag` of an element,
    /// namespace declarations included. `None` anywhere else.
    #[must_use]
    pub fn attribute_count(&self) -> Option<usize> {
        self.start_tag_attributes().ok().map(<[Attribute]>::len)
    }

    /// Returns the name of attribute `index`: the local name with namespace
    /// processing disabled, the qualified name with it enabled.
    ///
    /// # Errors
    ///
    /// Returns `PullError::NotOnStartTag` off an element start tag and
    /// `PullError::IndexOutOfRange` past the last attribute.
    pub fn attribute_name(&self, index: usize) -> Result<&str, PullError> {
        let attr = self.attribute_at(index)?;
        Ok(if self.process_namespaces {
            &attr.name
        } else {
            &attr.local_name
        })
    }

    /// Returns the namespace URI of attribute `index`, or `""` when it has
    /// none or namespace processing is disabled.
    ///
    /// # Errors
    ///
    /// Same as [`attribute_name`](Self::attribute_name).
    pub fn attribute_namespace(&self, index: usize) -> Result<&str, PullError> {
        let attr = self.attribute_at(index)?;
        if !self.process_namespaces {
            return Ok("");
        }
        Ok(attr.namespace.as_deref().unwrap_or(""))
    }

    /// Returns the prefix of attribute `index`. Always `None` when namespace
    /// processing is disabled.
    ///
    /// # Errors
    ///
    /// Same as [`attribute_name`](Self::attribute_name).
    pub fn attribute_prefix(&self, index: usize) -> Result<Option<&str>, PullError> {
        let attr = self.attribute_at(index)?;
        if !self.process_namespaces {
            return Ok(None);
        }
        Ok(attr.prefix.as_deref())
    }

    /// Returns the value of attribute `index`.
    ///
    /// # Errors
    ///
    /// Same as [`attribute_name`](Self::attribute_name).
    pub fn attribute_value(&self, index: usize) -> Result<&str, PullError> {
        Ok(&self.attribute_at(index)?.value)
    }

    /// Looks an attribute up by namespace and name.
    ///
    /// `name` may be the qualified name, the local name, or the part of a
    /// qualified name after its colon. An attribute without a namespace
    /// matches any `namespace`. With namespace processing disabled nothing
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns `PullError::NotOnStartTag` off an element start tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlpull::reader::{PullParser, FEATURE_PROCESS_NAMESPACES};
    ///
    /// let mut parser = PullParser::new();
    /// parser.set_feature(FEATURE_PROCESS_NAMESPACES, true).unwrap();
    /// parser
    ///     .set_input("<?xml version=\"1.0\"?><a xmlns:e=\"urn:e\" e:type=\"toc\"/>")
    ///     .unwrap();
    /// parser.advance();
    /// parser.advance();
    /// assert_eq!(parser.attribute_value_ns(Some("urn:e"), "type").unwrap(), Some("toc"));
    /// ```
    pub fn attribute_value_ns(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Result<Option<&str>, PullError> {
        let attrs = self.start_tag_attributes()?;
        if !self.process_namespaces {
            return Ok(None);
        }
        Ok(attrs
            .iter()
            .find(|a| {
                name_matches(&a.name, &a.local_name, name)
                    && (a.namespace.is_none() || a.namespace.as_deref() == namespace)
            })
            .map(|a| a.value.as_str()))
    }

    fn start_tag_attributes(&self) -> Result<&[Attribute], PullError> {
        match self.current_event() {
            Some(event)
                if event.kind() == EventKind::StartTag
                    && self.document.is_element(event.node()) =>
            {
                Ok(self.document.attributes(event.node()))
            }
            _ => Err(PullError::NotOnStartTag {
                event: self.event_type(),
            }),
        }
    }

    fn attribute_at(&self, index: usize) -> Result<&Attribute, PullError> {
        let attrs = self.start_tag_attributes()?;
        attrs.get(index).ok_or(PullError::IndexOutOfRange {
            index,
            len: attrs.len(),
        })
    }

    // === Features ===

    /// Enables or disables a feature by name.
    ///
    /// Changing [`FEATURE_PROCESS_NAMESPACES`] takes effect immediately,
    /// including for the current event. [`FEATURE_RELAXED`] is recorded
    /// only; leniency follows the grammar selected for the input.
    ///
    /// # Errors
    ///
    /// Returns `PullError::UnsupportedFeature` for unknown names.
    pub fn set_feature(&mut self, name: &str, state: bool) -> Result<(), PullError> {
        match Feature::from_name(name) {
            Some(Feature::ProcessNamespaces) => self.process_namespaces = state,
            Some(Feature::Relaxed) => self.relaxed = state,
            None => return Err(PullError::UnsupportedFeature(name.to_string())),
        }
        Ok(())
    }

    /// Reads a feature by name. Unknown names read as `false`.
    #[must_use]
    pub fn feature(&self, name: &str) -> bool {
        match Feature::from_name(name) {
            Some(Feature::ProcessNamespaces) => self.process_namespaces,
            Some(Feature::Relaxed) => self.relaxed,
            None => false,
        }
    }

    // === Views ===

    /// The document built from the last successful input.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The complete compiled event sequence.
    #[must_use]
    pub fn events(&self) -> &[ParserEvent] {
        &self.events
    }

    /// The current event, if any.
    #[must_use]
    pub fn current_event(&self) -> Option<&ParserEvent> {
        self.next.checked_sub(1).and_then(|i| self.events.get(i))
    }

    /// The node of the current event, if any.
    #[must_use]
    pub fn current_node(&self) -> Option<NodeId> {
        self.current_event().map(ParserEvent::node)
    }

    // === Helpers ===

    fn current_tag(&self) -> Option<NodeId> {
        self.current_event()
            .filter(|e| e.kind().is_tag())
            .map(ParserEvent::node)
    }

    /// The element whose namespace scope applies: the current node, or its
    /// parent when the current node is text.
    fn scope_node(&self) -> Option<NodeId> {
        let event = self.current_event()?;
        if self.document.is_text(event.node()) {
            event.parent()
        } else {
            Some(event.node())
        }
    }
}
