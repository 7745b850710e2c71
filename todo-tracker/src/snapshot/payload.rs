//! Machine-readable issue payload embedded in issue bodies.
//!
//! The payload is the JSON encoding of an [`IssueRecord`] wrapped in an HTML
//! comment, so it is invisible in the rendered issue. `<` and `>` are written
//! as `\u003c`/`\u003e`, so neither `<!--` nor `-->` can occur inside it.

use super::PayloadError;
use crate::extract::IssueRecord;

const PAYLOAD_OPEN: &str = "<!--";
const PAYLOAD_CLOSE: &str = "-->";

/// Encodes a record as an HTML comment.
///
/// # Errors
///
/// Returns an error if the record cannot be serialized.
pub fn encode_payload(record: &IssueRecord) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(record)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e");
    Ok(format!("{PAYLOAD_OPEN}{json}{PAYLOAD_CLOSE}"))
}

/// Decodes the last payload comment in an issue body.
///
/// # Errors
///
/// Returns [`PayloadError::Missing`] if the body has no payload comment and
/// [`PayloadError::Corrupt`] if its content is not a valid record.
pub fn decode_payload(body: &str) -> Result<IssueRecord, PayloadError> {
    let start = body.rfind(PAYLOAD_OPEN).ok_or(PayloadError::Missing)?;
    let rest = &body[start + PAYLOAD_OPEN.len()..];
    let end = rest.find(PAYLOAD_CLOSE).ok_or(PayloadError::Missing)?;
    let json = rest[..end].trim();
    if !json.starts_with('{') {
        return Err(PayloadError::Missing);
    }

    Ok(serde_json::from_str(json)?)
}
