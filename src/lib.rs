//! # xmlpull
//!
//! An XMLPULL-style pull parser for XML and HTML documents such as EPUB
//! package files, XHTML navigation documents and TinCan manifests.
//!
//! Input is parsed into an arena tree up front: strictly when it begins
//! with an XML declaration, leniently (HTML5 tree construction) otherwise.
//! The tree is then compiled into a balanced sequence of `StartDocument`,
//! `StartTag`, `Text`, `EndTag` and `EndDocument` events that the caller
//! steps through one at a time.
//!
//! ## Quick Start
//!
//! ```
//! use xmlpull::{EventKind, PullParser, FEATURE_PROCESS_NAMESPACES};
//!
//! let mut parser = PullParser::new();
//! parser.set_feature(FEATURE_PROCESS_NAMESPACES, true).unwrap();
//! parser
//!     .set_input("<?xml version=\"1.0\"?><package xmlns=\"http://www.idpf.org/2007/opf\"/>")
//!     .unwrap();
//!
//! assert_eq!(parser.advance(), EventKind::StartDocument);
//! assert_eq!(parser.advance(), EventKind::StartTag);
//! assert_eq!(parser.name(), Some("package"));
//! assert_eq!(parser.namespace(), Some("http://www.idpf.org/2007/opf"));
//! ```

pub mod encoding;
pub mod error;
pub mod html;
pub mod parser;
pub mod reader;
pub mod tree;
pub mod util;

// Re-export primary types at the crate root for convenience.
pub use error::{ParseError, PullError};
pub use reader::{EventKind, PullParser, FEATURE_PROCESS_NAMESPACES, FEATURE_RELAXED};
pub use tree::{Attribute, Document, NodeId};
