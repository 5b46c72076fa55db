//! Decoding of structured-extractor output.
//!
//! Language-model responses sometimes wrap the JSON document in a markdown
//! code fence or surround it with prose; this module finds the document in
//! either form. Everything beyond JSON decoding is the validator's job.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Error;
use crate::ir::Document;

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\r?\n(.*?)\r?\n[ \t]*```").unwrap());

pub fn parse_document(text: &str) -> Result<Document, Error> {
    let strict_err = match serde_json::from_str::<Document>(text.trim()) {
        Ok(doc) => return Ok(doc),
        Err(err) => err,
    };

    let fenced = FENCE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|body| body.as_str()));
    for candidate in fenced.chain(outer_object(text)) {
        if let Ok(doc) = serde_json::from_str::<Document>(candidate) {
            return Ok(doc);
        }
    }

    Err(Error::Decode(strict_err))
}

/// Text from the first `{` to the last `}`.
fn outer_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
