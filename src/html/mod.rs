//! Lenient HTML tree builder.
//!
//! Content that does not start with an XML declaration is handed to
//! `html5ever`, which follows the HTML5 tree construction algorithm: it
//! never fails, closes unclosed elements, and adds implied `html`, `head`
//! and `body` elements. The resulting `markup5ever_rcdom` tree is copied
//! into the arena [`Document`].
//!
//! HTML attributes are not namespace-aware, so `xmlns:epub="..."` is an
//! ordinary attribute to the tree builder. Such attributes are still
//! recorded as namespace declarations on their element, which lets prefix
//! lookups work on XHTML read through this grammar.
//!
//! # Examples
//!
//! ```
//! use xmlpull::html::parse_html;
//!
//! let doc = parse_html("<p>Hello <b>world</b>");
//! let html = doc.root_element().unwrap();
//! assert_eq!(doc.node_name(html), Some("html"));
//! assert_eq!(doc.text_content(html), "Hello world");
//! ```

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::tree::{Attribute, Document, NamespaceDecl, NodeId, NodeKind};
use crate::util::qname::join_qname;

/// Parses HTML into a document. Never fails.
#[must_use]
pub fn parse_html(input: &str) -> Document {
    let dom = parse_document(RcDom::default(), Default::default()).one(input);

    let mut doc = Document::new();
    let mut pending: Vec<(Handle, NodeId)> = vec![(dom.document.clone(), doc.root())];
    while let Some((handle, parent)) = pending.pop() {
        for child in handle.children.borrow().iter() {
            match &child.data {
                NodeData::Element { name, attrs, .. } => {
                    let id = doc.append_new(parent, element_kind(name, &attrs.borrow()));
                    pending.push((child.clone(), id));
                }
                NodeData::Text { contents } => {
                    doc.append_new(parent, NodeKind::text(contents.borrow().to_string()));
                }
                _ => {}
            }
        }
    }
    doc
}

fn non_empty(atom: &str) -> Option<String> {
    (!atom.is_empty()).then(|| atom.to_string())
}

fn element_kind(name: &QualName, attrs: &[html5ever::Attribute]) -> NodeKind {
    let prefix = name.prefix.as_ref().map(|p| p.to_string());
    let attributes: Vec<Attribute> = attrs
        .iter()
        .map(|attr| {
            let prefix = attr.name.prefix.as_ref().map(|p| p.to_string());
            Attribute {
                name: join_qname(prefix.as_deref(), &attr.name.local),
                local_name: attr.name.local.to_string(),
                prefix,
                namespace: non_empty(&attr.name.ns),
                value: attr.value.to_string(),
            }
        })
        .collect();
    let namespaces = attributes.iter().filter_map(declaration).collect();

    NodeKind::Element {
        name: join_qname(prefix.as_deref(), &name.local),
        local_name: name.local.to_string(),
        prefix,
        namespace: non_empty(&name.ns),
        attributes,
        namespaces,
    }
}

/// Recognises `xmlns` and `xmlns:p` attributes, whether the tree builder
/// split them into prefix and local name (foreign content) or not.
fn declaration(attr: &Attribute) -> Option<NamespaceDecl> {
    let prefix = match (attr.prefix.as_deref(), attr.name.as_str()) {
        (Some("xmlns"), _) => Some(attr.local_name.clone()),
        (None, "xmlns") => None,
        (None, name) => Some(name.strip_prefix("xmlns:")?.to_string()),
        _ => return None,
    };
    Some(NamespaceDecl {
        prefix,
        uri: attr.value.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn element_names(doc: &Document) -> Vec<String> {
        doc.descendants(doc.root())
            .filter_map(|n| doc.node_name(n))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_implied_structure() {
        let doc = parse_html("<p>text</p>");
        assert_eq!(element_names(&doc), vec!["html", "head", "body", "p"]);
    }

    #[test]
    fn test_html_elements_are_in_xhtml_namespace() {
        let doc = parse_html("<nav></nav>");
        let html = doc.root_element().unwrap();
        assert_eq!(doc.node_namespace(html), Some("http://www.w3.org/1999/xhtml"));
        assert_eq!(doc.node_prefix(html), None);
    }

    #[test]
    fn test_comments_and_doctype_dropped() {
        let doc = parse_html("<!DOCTYPE html><!-- c --><html><body><!-- d --></body></html>");
        assert_eq!(doc.children(doc.root()).count(), 1);
        assert_eq!(element_names(&doc), vec!["html", "head", "body"]);
    }

    #[test]
    fn test_colon_attributes_kept_whole() {
        let doc = parse_html("<nav epub:type=\"toc\" id=\"toc\"></nav>");
        let nav = doc
            .descendants(doc.root())
            .find(|&n| doc.node_name(n) == Some("nav"))
            .unwrap();
        let attrs = doc.attributes(nav);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].name, "epub:type");
        assert_eq!(attrs[0].namespace, None);
        assert_eq!(attrs[0].value, "toc");
    }

    #[test]
    fn test_xmlns_attributes_become_declarations() {
        let doc = parse_html(
            "<html xmlns=\"http://www.w3.org/1999/xhtml\" \
             xmlns:epub=\"http://www.idpf.org/2007/ops\"><body></body></html>",
        );
        let html = doc.root_element().unwrap();
        let decls = doc.namespace_declarations(html);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].prefix, None);
        assert_eq!(decls[1].prefix.as_deref(), Some("epub"));

        let body = doc.last_child(html).unwrap();
        assert_eq!(
            doc.lookup_namespace_uri(body, Some("epub")),
            Some("http://www.idpf.org/2007/ops")
        );
    }

    #[test]
    fn test_unclosed_tags_are_closed() {
        let doc = parse_html("<ul><li>one<li>two</ul>");
        let items: Vec<String> = doc
            .descendants(doc.root())
            .filter(|&n| doc.node_name(n) == Some("li"))
            .map(|n| doc.text_content(n))
            .collect();
        assert_eq!(items, vec!["one", "two"]);
    }

    #[test]
    fn test_empty_input_still_has_structure() {
        let doc = parse_html("");
        assert_eq!(element_names(&doc), vec!["html", "head", "body"]);
    }
}
