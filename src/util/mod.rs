//! Utility modules for xmlpull.
//!
//! Contains `QName` handling shared by the tree builders and the cursor.

pub mod qname;
