//! Integration tests over real-world e-learning and e-book documents.
//!
//! The OPF package document starts with an XML declaration and goes through
//! the strict grammar. The XHTML navigation document and the TinCan
//! manifest do not, so they are read with the lenient HTML grammar.

#![allow(clippy::unwrap_used)]

use xmlpull::{EventKind, PullParser, FEATURE_PROCESS_NAMESPACES};

const NAMESPACE_OPF: &str = "http://www.idpf.org/2007/opf";
const NAMESPACE_OPS: &str = "http://www.idpf.org/2007/ops";

const PACKAGE_OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" xml:lang="en" unique-identifier="uid" prefix="cc: http://creativecommons.org/ns#">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title id="title">Creative Commons - A Shared Culture</dc:title>
    <dc:creator>Jesse Dylan</dc:creator>
    <dc:identifier id="uid">code.google.com.epub-samples.cc-shared-culture</dc:identifier>
    <dc:language>en-US</dc:language>
    <meta property="dcterms:modified">2012-01-20T12:47:00Z</meta>
    <dc:publisher>Creative Commons</dc:publisher>  
    <dc:contributor>mgylling</dc:contributor>
    <dc:description>Multiple video tests (see Navigation Document (toc) for details)</dc:description>
    <dc:rights>This work is licensed under a Creative Commons Attribution-Noncommercial-Share Alike (CC BY-NC-SA) license.</dc:rights>               
  </metadata>
  <manifest>
    <item id="font1" href="fonts/Quicksand_Light.otf" media-type="application/vnd.ms-opentype"/>
    <item id="font2" href="fonts/Quicksand_Bold_Oblique.otf" media-type="application/vnd.ms-opentype"/>                       
  </manifest>
  <spine>
    <itemref idref="cover" linear="no"/>
    <itemref idref="toc"/>
  </spine>
</package>
"#;

const NAV_XHTML: &str = r#"<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" xml:lang="en" lang="en">
<head>
    <meta charset="utf-8"/>
</head>
<body>
<nav epub:type="toc" id="toc">
    <ol>
        <li><a href="Page_1.xhtml">Page 1</a></li>
        <li><a href="Page_2.xhtml">Page 2</a></li>
        <li><a href="Page_3.xhtml">Page 3</a></li>
        <li><a href="Page_4.xhtml">Page 4</a></li>
        <li><a href="Page_5.xhtml">Page 5</a></li>
        <li><a href="Page_6.xhtml">Page 6</a></li>
        <li><a href="Acknowledgements.xhtml">Acknowledgements</a></li>
    </ol>
</nav>
</body>
</html>"#;

const TINCAN_XML: &str = r#"<tincan xmlns="http://projecttincan.com/tincan.xsd">
<activities>
<activity id="http://192.168.31.22:8087/177892100433350656/3196e3e6-6f56-457c-95ef-882b734ac96d" type="http://adlnet.gov/expapi/activities/module">
<name>True/False Question</name>
<description lang="en-US"/>
<launch lang="en-us">index.html</launch>
</activity>
</activities>
</tincan>"#;

fn parser_for(input: &str) -> PullParser {
    let mut parser = PullParser::new();
    parser.set_feature(FEATURE_PROCESS_NAMESPACES, true).unwrap();
    parser.set_input(input).unwrap();
    parser
}

fn advance_n(parser: &mut PullParser, n: usize) -> EventKind {
    for _ in 1..n {
        parser.advance();
    }
    parser.advance()
}

fn advance_to_start(parser: &mut PullParser, name: &str) {
    while parser.advance() != EventKind::None {
        if parser.event_type() == EventKind::StartTag && parser.name() == Some(name) {
            return;
        }
    }
    panic!("no start tag named {name}");
}

/// Moves from a start tag to the first `Text` event inside it.
fn next_text(parser: &mut PullParser) -> Option<String> {
    loop {
        match parser.advance() {
            EventKind::Text => return parser.text().map(str::to_string),
            EventKind::StartTag => {}
            _ => return None,
        }
    }
}

// --- OPF package ---

#[test]
fn test_opf_first_events() {
    let mut parser = parser_for(PACKAGE_OPF);
    assert_eq!(parser.advance(), EventKind::StartDocument);
    assert_eq!(parser.advance(), EventKind::StartTag);
    assert_eq!(parser.name(), Some("package"));
    assert_eq!(parser.depth(), Some(1));
}

#[test]
fn test_opf_metadata_after_six_events() {
    let mut parser = parser_for(PACKAGE_OPF);
    assert_eq!(advance_n(&mut parser, 6), EventKind::StartTag);
    assert_eq!(parser.name(), Some("metadata"));
    assert_eq!(parser.namespace(), Some(NAMESPACE_OPF));
    assert!(parser.attribute_count().unwrap() > 0);

    let dc = parser.namespace_for_prefix(Some("dc")).unwrap();
    assert!(dc.starts_with("http"));
    assert!(dc.contains("dc"));
}

#[test]
fn test_opf_namespace_disabled() {
    let mut parser = PullParser::new();
    parser.set_input(PACKAGE_OPF).unwrap();
    advance_n(&mut parser, 6);
    assert_eq!(parser.event_type(), EventKind::StartTag);
    assert_eq!(parser.name(), Some("metadata"));
    assert_eq!(parser.namespace(), Some(""));
}

#[test]
fn test_opf_title_text() {
    let mut parser = parser_for(PACKAGE_OPF);
    assert_eq!(advance_n(&mut parser, 10), EventKind::StartTag);
    assert_eq!(parser.name(), Some("dc:title"));
    assert_eq!(parser.prefix(), Some("dc"));
    assert_eq!(parser.attribute_value_ns(None, "id").unwrap(), Some("title"));

    assert_eq!(advance_n(&mut parser, 2), EventKind::Text);
    assert_eq!(parser.text(), Some("Creative Commons - A Shared Culture"));
}

#[test]
fn test_opf_manifest_items() {
    let mut parser = parser_for(PACKAGE_OPF);
    let mut hrefs = Vec::new();
    while parser.advance() != EventKind::None {
        if parser.event_type() == EventKind::StartTag && parser.name() == Some("item") {
            hrefs.push(parser.attribute_value_ns(None, "href").unwrap().unwrap().to_string());
        }
    }
    assert_eq!(
        hrefs,
        vec!["fonts/Quicksand_Light.otf", "fonts/Quicksand_Bold_Oblique.otf"]
    );
}

#[test]
fn test_opf_trailing_whitespace_is_text() {
    let mut parser = parser_for(PACKAGE_OPF);
    let mut blanks = Vec::new();
    while parser.advance() != EventKind::None {
        if parser.is_whitespace() {
            blanks.push(parser.text().unwrap().to_string());
        }
    }
    assert!(blanks.contains(&"  \n    ".to_string()));
    assert!(blanks.contains(&format!("{}\n  ", " ".repeat(15))));
    assert!(blanks.contains(&format!("{}\n  ", " ".repeat(23))));
}

// --- XHTML navigation document ---

#[test]
fn test_xhtml_first_events() {
    let mut parser = parser_for(NAV_XHTML);
    assert_eq!(parser.advance(), EventKind::StartDocument);
    assert_eq!(parser.advance(), EventKind::StartTag);
    assert_eq!(parser.name(), Some("html"));
}

#[test]
fn test_xhtml_nav_attributes() {
    let mut parser = parser_for(NAV_XHTML);
    assert_eq!(advance_n(&mut parser, 20), EventKind::StartTag);
    assert_eq!(parser.name(), Some("nav"));
    assert_eq!(
        parser.attribute_value_ns(Some(NAMESPACE_OPS), "type").unwrap(),
        Some("toc")
    );
    assert_eq!(
        parser.attribute_value_ns(Some(NAMESPACE_OPS), "id").unwrap(),
        Some("toc")
    );
    assert_eq!(parser.namespace_for_prefix(Some("epub")), Some(NAMESPACE_OPS));
}

#[test]
fn test_xhtml_link_href() {
    let mut parser = parser_for(NAV_XHTML);
    advance_to_start(&mut parser, "nav");
    advance_to_start(&mut parser, "a");
    let href = parser.attribute_value_ns(None, "href").unwrap().unwrap();
    assert!(href.contains(".xhtml"));
}

#[test]
fn test_xhtml_first_link_position() {
    let mut parser = parser_for(NAV_XHTML);
    assert_eq!(advance_n(&mut parser, 29), EventKind::StartTag);
    assert_eq!(parser.name(), Some("a"));
    assert_eq!(parser.attribute_value(0).unwrap(), "Page_1.xhtml");
}

#[test]
fn test_xhtml_link_labels_in_order() {
    let mut parser = parser_for(NAV_XHTML);
    let mut labels = Vec::new();
    while parser.advance() != EventKind::None {
        if parser.event_type() == EventKind::StartTag && parser.name() == Some("a") {
            labels.push(next_text(&mut parser).unwrap());
        }
    }
    assert_eq!(labels.len(), 7);
    assert_eq!(labels[0], "Page 1");
    assert_eq!(labels[6], "Acknowledgements");
}

#[test]
fn test_xhtml_cascading_close_after_last_link() {
    let mut parser = parser_for(NAV_XHTML);
    let kinds_after: Vec<(EventKind, Option<String>)> = {
        let mut seen_last = false;
        let mut tail = Vec::new();
        while parser.advance() != EventKind::None {
            if seen_last {
                tail.push((parser.event_type(), parser.name().map(str::to_string)));
            } else if parser.text() == Some("Acknowledgements") {
                seen_last = true;
            }
        }
        tail
    };
    let closes: Vec<&str> = kinds_after
        .iter()
        .take(3)
        .map(|(kind, name)| {
            assert_eq!(*kind, EventKind::EndTag);
            name.as_deref().unwrap()
        })
        .collect();
    assert_eq!(closes, vec!["#text", "a", "li"]);
    assert_eq!(kinds_after.last().unwrap().0, EventKind::EndDocument);
}

// --- TinCan manifest ---

#[test]
fn test_tincan_activity_name() {
    let mut parser = parser_for(TINCAN_XML);
    let mut name = None;
    let mut activity = None;
    while parser.advance() != EventKind::None {
        if parser.event_type() != EventKind::StartTag {
            continue;
        }
        match parser.name() {
            Some("activity") => {
                let id = parser.attribute_value_ns(None, "id").unwrap().unwrap();
                let kind = parser.attribute_value_ns(None, "type").unwrap().unwrap();
                activity = Some((id.to_string(), kind.to_string()));
            }
            Some("name") => name = next_text(&mut parser),
            _ => {}
        }
    }
    assert_eq!(name.as_deref(), Some("True/False Question"));
    let (id, kind) = activity.unwrap();
    assert!(id.starts_with("http://192.168.31.22:8087/"));
    assert_eq!(kind, "http://adlnet.gov/expapi/activities/module");
}

#[test]
fn test_tincan_launch_text() {
    let mut parser = parser_for(TINCAN_XML);
    advance_to_start(&mut parser, "launch");
    assert_eq!(parser.attribute_value_ns(None, "lang").unwrap(), Some("en-us"));
    assert_eq!(next_text(&mut parser).as_deref(), Some("index.html"));
}
