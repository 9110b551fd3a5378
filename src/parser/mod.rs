//! Tree building: grammar selection and parse options.
//!
//! Markup becomes a [`Document`] through one of two grammars:
//!
//! - [`Grammar::Xml`] is strict. Malformed input is rejected with a
//!   [`ParseError`]. See [`xml`].
//! - [`Grammar::Html`] is lenient and always produces a tree, with implied
//!   `html`, `head` and `body` elements where the HTML5 tree construction
//!   algorithm adds them. See [`crate::html`].
//!
//! The grammar is chosen once per input by [`Grammar::sniff`]: content that
//! begins with an XML declaration is XML, anything else is HTML.

pub mod xml;

use crate::error::ParseError;
use crate::tree::Document;

/// The tree-building grammar used for an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Strict XML 1.0 with namespaces.
    Xml,
    /// Lenient HTML5 tree construction.
    Html,
}

impl Grammar {
    /// Chooses a grammar from the start of the content.
    ///
    /// A leading byte order mark is ignored; everything else must match
    /// exactly, so leading whitespace before `<?xml` selects HTML.
    ///
    /// # Examples
    ///
    /// ```
    /// use xmlpull::parser::Grammar;
    ///
    /// assert_eq!(Grammar::sniff("<?xml version=\"1.0\"?><a/>"), Grammar::Xml);
    /// assert_eq!(Grammar::sniff("<html><body/></html>"), Grammar::Html);
    /// ```
    #[must_use]
    pub fn sniff(content: &str) -> Self {
        if strip_bom(content).starts_with("<?xml") {
            Self::Xml
        } else {
            Self::Html
        }
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xml => write!(f, "xml"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Options controlling tree building.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use xmlpull::parser::{Grammar, ParseOptions};
///
/// let opts = ParseOptions::default()
///     .grammar(Some(Grammar::Xml))
///     .allow_dtd(false)
///     .max_nodes(10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Forces a grammar instead of sniffing the content.
    pub grammar: Option<Grammar>,
    /// Accept a DOCTYPE declaration in XML input (default: true).
    pub allow_dtd: bool,
    /// Maximum number of nodes the XML grammar will build (default: unlimited).
    pub max_nodes: u32,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            grammar: None,
            allow_dtd: true,
            max_nodes: u32::MAX,
        }
    }
}

impl ParseOptions {
    /// Forces a grammar, or restores sniffing with `None`.
    #[must_use]
    pub fn grammar(mut self, grammar: Option<Grammar>) -> Self {
        self.grammar = grammar;
        self
    }

    /// Allows or rejects DOCTYPE declarations in XML input.
    #[must_use]
    pub fn allow_dtd(mut self, yes: bool) -> Self {
        self.allow_dtd = yes;
        self
    }

    /// Sets the node limit for XML input.
    #[must_use]
    pub fn max_nodes(mut self, limit: u32) -> Self {
        self.max_nodes = limit;
        self
    }

    /// Returns the grammar that will be used for `content`.
    #[must_use]
    pub fn grammar_for(&self, content: &str) -> Grammar {
        self.grammar.unwrap_or_else(|| Grammar::sniff(content))
    }
}

/// Parses markup with default options, sniffing the grammar.
///
/// # Errors
///
/// Returns `ParseError` if the content is XML and not well-formed.
pub fn parse_str(content: &str) -> Result<Document, ParseError> {
    parse_with_options(content, &ParseOptions::default())
}

/// Parses markup with the given options.
///
/// # Errors
///
/// Returns `ParseError` if the selected grammar is XML and the content is
/// not well-formed, or violates a configured limit.
///
/// # Examples
///
/// ```
/// use xmlpull::parser::{parse_with_options, Grammar, ParseOptions};
///
/// let opts = ParseOptions::default().grammar(Some(Grammar::Html));
/// let doc = parse_with_options("<p>unclosed", &opts).unwrap();
/// let html = doc.root_element().unwrap();
/// assert_eq!(doc.node_name(html), Some("html"));
/// ```
pub fn parse_with_options(content: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let content = strip_bom(content);
    match options.grammar_for(content) {
        Grammar::Xml => xml::parse_xml(content, options),
        Grammar::Html => Ok(crate::html::parse_html(content)),
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{FEFF}').unwrap_or(content)
}
