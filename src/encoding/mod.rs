//! Encoding detection and transcoding for byte input.
//!
//! [`PullParser::set_input_bytes`](crate::reader::PullParser::set_input_bytes)
//! accepts raw bytes. Before the grammar can be sniffed the bytes must be
//! turned into a `String`, which happens here:
//!
//! 1. A Byte Order Mark selects UTF-8, UTF-16BE or UTF-16LE and is skipped.
//! 2. Without a BOM the bytes are assumed to be UTF-8.
//! 3. An `encoding="..."` pseudo-attribute in a leading XML declaration
//!    overrides the assumption when it names a different encoding.
//!
//! Transcoding is delegated to `encoding_rs`.

use std::fmt;

use encoding_rs::Encoding;

/// An error that occurs during encoding detection or transcoding.
#[derive(Debug, Clone)]
pub struct EncodingError {
    /// A human-readable description of the encoding error.
    pub message: String,
}

impl EncodingError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encoding error: {}", self.message)
    }
}

impl std::error::Error for EncodingError {}

/// Inspects the Byte Order Mark.
///
/// Returns the encoding the BOM selects and the number of bytes it occupies.
/// Input without a BOM reports UTF-8 and a length of 0.
///
/// # Examples
///
/// ```
/// use xmlpull::encoding::detect_bom;
///
/// assert_eq!(detect_bom(b"\xEF\xBB\xBF<a/>"), (encoding_rs::UTF_8, 3));
/// assert_eq!(detect_bom(b"\xFF\xFE<\x00"), (encoding_rs::UTF_16LE, 2));
/// assert_eq!(detect_bom(b"<a/>"), (encoding_rs::UTF_8, 0));
/// ```
#[must_use]
pub fn detect_bom(bytes: &[u8]) -> (&'static Encoding, usize) {
    match Encoding::for_bom(bytes) {
        Some((encoding, len)) => (encoding, len),
        None => (encoding_rs::UTF_8, 0),
    }
}

/// Decodes raw bytes into a UTF-8 string.
///
/// # Errors
///
/// Returns `EncodingError` when the declared encoding is unknown or the
/// bytes are malformed for the selected encoding.
///
/// # Examples
///
/// ```
/// use xmlpull::encoding::decode_to_utf8;
///
/// let bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><p>caf\xE9</p>";
/// let text = decode_to_utf8(bytes).unwrap();
/// assert!(text.ends_with("<p>caf\u{e9}</p>"));
/// ```
pub fn decode_to_utf8(bytes: &[u8]) -> Result<String, EncodingError> {
    let (bom_encoding, bom_len) = detect_bom(bytes);
    let content = &bytes[bom_len..];

    if bom_encoding == encoding_rs::UTF_8 {
        if let Some(label) = declared_encoding(content) {
            let declared = lookup(&label)?;
            // A UTF-16 declaration without a BOM cannot describe these bytes:
            // the declaration itself was just read as ASCII.
            let ascii_compatible =
                declared != encoding_rs::UTF_16LE && declared != encoding_rs::UTF_16BE;
            if ascii_compatible && declared != encoding_rs::UTF_8 {
                return transcode(content, declared);
            }
        }
        return std::str::from_utf8(content)
            .map(str::to_string)
            .map_err(|e| EncodingError::new(format!("input is not valid UTF-8: {e}")));
    }

    // UTF-16 input: the BOM decides the byte order, a declaration of plain
    // "UTF-16" is compatible with either.
    transcode(content, bom_encoding)
}

fn lookup(label: &str) -> Result<&'static Encoding, EncodingError> {
    Encoding::for_label(label.as_bytes())
        .ok_or_else(|| EncodingError::new(format!("unsupported encoding: {label}")))
}

fn transcode(bytes: &[u8], encoding: &'static Encoding) -> Result<String, EncodingError> {
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(EncodingError::new(format!(
            "malformed byte sequence for encoding {}",
            encoding.name()
        )));
    }
    Ok(text.into_owned())
}

/// Reads the `encoding` pseudo-attribute of a leading XML declaration.
///
/// The declaration is ASCII by definition, so the scan works on raw bytes
/// and is limited to the first 200 of them.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let scan = &bytes[..bytes.len().min(200)];
    if !scan.starts_with(b"<?xml") {
        return None;
    }
    let decl_end = scan.windows(2).position(|w| w == b"?>")?;
    let decl = &scan[..decl_end];

    let needle = b"encoding";
    let at = decl.windows(needle.len()).position(|w| w == needle)?;
    let rest = trim_ascii_start(&decl[at + needle.len()..]);
    let rest = trim_ascii_start(rest.strip_prefix(b"=")?);

    let quote = *rest.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &rest[1..];
    let end = value.iter().position(|&b| b == quote)?;
    let value = &value[..end];
    value
        .is_ascii()
        .then(|| String::from_utf8_lossy(value).into_owned())
}

fn trim_ascii_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes
        .iter()
        .take_while(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .count();
    &bytes[skip..]
}
