//! Strict XML tree builder.
//!
//! Well-formedness checking, entity expansion and namespace resolution are
//! done by `roxmltree`. This module copies its read-only tree into the
//! arena [`Document`], keeping what the pull cursor needs:
//!
//! - element and attribute prefixes as written in the source text, since
//!   `roxmltree` only keeps expanded names;
//! - the namespace declarations written on each start tag, which are also
//!   exposed as leading `xmlns` attributes the way a DOM reports them.
//!
//! Comments and processing instructions are dropped.

use roxmltree::{Attribute as SourceAttribute, Node, NodeType, ParsingOptions};

use super::ParseOptions;
use crate::error::{ParseError, SourceLocation};
use crate::tree::{Attribute, Document, NamespaceDecl, NodeId, NodeKind, XML_NAMESPACE};
use crate::util::qname::{join_qname, split_qname};

/// Parses a well-formed XML document.
///
/// # Errors
///
/// Returns `ParseError` with the line and column of the first
/// well-formedness violation, a rejected DOCTYPE, or an exceeded node limit.
///
/// # Examples
///
/// ```
/// use xmlpull::parser::{xml::parse_xml, ParseOptions};
///
/// let doc = parse_xml("<a xmlns:x=\"urn:x\"><x:b/></a>", &ParseOptions::default()).unwrap();
/// let a = doc.root_element().unwrap();
/// let b = doc.first_child(a).unwrap();
/// assert_eq!(doc.node_name(b), Some("x:b"));
/// assert_eq!(doc.node_namespace(b), Some("urn:x"));
/// ```
pub fn parse_xml(input: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let mut opts = ParsingOptions::default();
    opts.allow_dtd = options.allow_dtd;
    opts.nodes_limit = options.max_nodes;

    let source = roxmltree::Document::parse_with_options(input, opts).map_err(convert_error)?;

    let mut doc = Document::new();
    let mut pending: Vec<(Node<'_, '_>, NodeId)> = vec![(source.root(), doc.root())];
    while let Some((src, parent)) = pending.pop() {
        for child in src.children() {
            match child.node_type() {
                NodeType::Element => {
                    let id = doc.append_new(parent, element_kind(input, child));
                    pending.push((child, id));
                }
                NodeType::Text => {
                    doc.append_new(parent, NodeKind::text(child.text().unwrap_or_default()));
                }
                _ => {}
            }
        }
    }
    Ok(doc)
}

fn convert_error(err: roxmltree::Error) -> ParseError {
    let pos = err.pos();
    ParseError {
        message: err.to_string(),
        location: SourceLocation {
            line: pos.row,
            column: pos.col,
        },
    }
}

fn element_kind(input: &str, node: Node<'_, '_>) -> NodeKind {
    let tag = node.tag_name();
    let local = tag.name();
    let namespace = tag.namespace();

    // Without a start tag at the node's range, fall back to the resolved scope.
    let start_tag = written_start_tag(input, node);
    let (prefix, namespaces) = match start_tag {
        Some(start) => (
            split_qname(tag_name(start)).0.map(str::to_string),
            written_declarations(start, node),
        ),
        None => (
            namespace.and_then(|uri| prefix_for(node, uri)),
            declared_namespaces(node),
        ),
    };

    let mut attributes: Vec<Attribute> = namespaces.iter().map(Attribute::from_declaration).collect();
    attributes.extend(node.attributes().map(|attr| {
        let prefix = written_prefix(input, node, &attr)
            .or_else(|| attr.namespace().and_then(|uri| prefix_for(node, uri)));
        Attribute {
            name: join_qname(prefix.as_deref(), attr.name()),
            local_name: attr.name().to_string(),
            prefix,
            namespace: attr.namespace().map(str::to_string),
            value: attr.value().to_string(),
        }
    }));

    NodeKind::Element {
        name: join_qname(prefix.as_deref(), local),
        local_name: local.to_string(),
        prefix,
        namespace: namespace.map(str::to_string),
        attributes,
        namespaces,
    }
}

/// Returns the source text following the `<` of the element's start tag,
/// or `None` when the element has no start tag of its own in `input`.
fn written_start_tag<'a>(input: &'a str, node: Node<'_, '_>) -> Option<&'a str> {
    let start = input.get(node.range().start..)?.strip_prefix('<')?;
    (split_qname(tag_name(start)).1 == node.tag_name().name()).then_some(start)
}

fn tag_name(start: &str) -> &str {
    let end = start
        .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
        .unwrap_or(start.len());
    &start[..end]
}

/// Lists the attribute names written on a start tag, in source order.
///
/// The input is already known to be well-formed, so values are skipped by
/// looking for the matching quote.
fn written_attribute_names(start: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = &start[tag_name(start).len()..];
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        if rest.is_empty() || rest.starts_with('>') || rest.starts_with('/') {
            break;
        }
        let name_end = rest
            .find(|c: char| c == '=' || c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        names.push(&rest[..name_end]);

        let value = rest[name_end..].trim_start_matches(|c: char| c == '=' || c.is_ascii_whitespace());
        let Some(quote) = value.chars().next() else {
            break;
        };
        let value = &value[quote.len_utf8()..];
        let Some(close) = value.find(quote) else {
            break;
        };
        rest = &value[close + quote.len_utf8()..];
    }
    names
}

/// Namespace declarations written on the start tag, in source order.
fn written_declarations(start: &str, node: Node<'_, '_>) -> Vec<NamespaceDecl> {
    written_attribute_names(start)
        .into_iter()
        .filter_map(|name| match split_qname(name) {
            (None, "xmlns") => Some(None),
            (Some("xmlns"), prefix) => Some(Some(prefix)),
            _ => None,
        })
        .map(|prefix| NamespaceDecl {
            prefix: prefix.map(str::to_string),
            uri: node.lookup_namespace_uri(prefix).unwrap_or_default().to_string(),
        })
        .collect()
}

/// Reads the prefix an attribute was written with, if that prefix is bound
/// to the attribute's namespace on `node`.
fn written_prefix(input: &str, node: Node<'_, '_>, attr: &SourceAttribute<'_, '_>) -> Option<String> {
    let (prefix, local) = split_qname(input.get(attr.range_qname())?);
    let prefix = prefix?;
    let bound = node.lookup_namespace_uri(Some(prefix)) == attr.namespace();
    (local == attr.name() && bound).then(|| prefix.to_string())
}

fn prefix_for(node: Node<'_, '_>, uri: &str) -> Option<String> {
    if uri == XML_NAMESPACE {
        return Some("xml".to_string());
    }
    node.namespaces()
        .filter(|ns| ns.uri() == uri)
        .find_map(|ns| ns.name())
        .map(str::to_string)
}

/// Namespaces in scope on `node` that were not already in scope on its
/// parent element. Used for elements without a start tag in the input.
fn declared_namespaces(node: Node<'_, '_>) -> Vec<NamespaceDecl> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();

    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| NamespaceDecl {
            prefix: ns.name().map(str::to_string),
            uri: ns.uri().to_string(),
        })
        .collect()
}
