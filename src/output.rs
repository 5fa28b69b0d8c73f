// src/output.rs
//
// Acceptance checks and cleanup for HTML coming back from a model.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const MIN_OUTPUT_CHARS: usize = 100;

const DOCTYPE: &str = "<!DOCTYPE html>";
const CLOSING_ROOT: &str = "</html>";

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```(?:html)?").expect("valid code fence regex"));

static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script block regex")
});

/// Why a candidate document was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("output is {0} characters, below the minimum of {min}", min = MIN_OUTPUT_CHARS)]
    TooShort(usize),

    #[error("output has no <!DOCTYPE html> or <html> root marker")]
    MissingRoot,

    #[error("output contains dynamic code execution ({0})")]
    DynamicCode(&'static str),

    #[error("output has an unterminated <script> block")]
    UnterminatedScript,
}

/// Checks a candidate document, reporting the first problem found.
pub fn validate(text: &str) -> Result<(), ValidationFailure> {
    let len = text.chars().count();
    if len < MIN_OUTPUT_CHARS {
        return Err(ValidationFailure::TooShort(len));
    }

    let lower = text.to_ascii_lowercase();

    if !lower.contains("<!doctype html>") && !lower.contains("<html") {
        return Err(ValidationFailure::MissingRoot);
    }

    for construct in ["eval(", "javascript:"] {
        if lower.contains(construct) {
            return Err(ValidationFailure::DynamicCode(construct));
        }
    }

    if lower.matches("<script").count() > lower.matches("</script").count() {
        return Err(ValidationFailure::UnterminatedScript);
    }

    Ok(())
}

pub fn is_acceptable(text: &str) -> bool {
    validate(text).is_ok()
}

/// Cleans accepted output: drops code fences and script blocks, then adds a
/// doctype and a closing root tag when the document has none anywhere.
/// `normalize(normalize(x)) == normalize(x)` for every `x`.
pub fn normalize(text: &str) -> String {
    // Removing one construct can splice together another, so strip to a fixed point.
    let mut cleaned = text.to_string();
    loop {
        let without_fences = CODE_FENCE.replace_all(&cleaned, "");
        let next = SCRIPT_BLOCK.replace_all(&without_fences, "").into_owned();
        if next == cleaned {
            break;
        }
        cleaned = next;
    }

    let mut doc = cleaned.trim().to_string();
    let lower = doc.to_ascii_lowercase();

    if !lower.contains("<!doctype") {
        doc = format!("{}\n{}", DOCTYPE, doc);
    }
    if !lower.contains("</html") {
        doc = format!("{}\n{}", doc, CLOSING_ROOT);
    }

    doc
}
