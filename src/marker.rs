//! Injected-context delimiters
//!
//! Recall wraps everything it injects in a fixed marker pair so that capture
//! can recognize and remove it before persisting the transcript. Without the
//! strip step, injected memories would be re-submitted as user content and
//! feed back on themselves turn after turn.
//!
//! The tag name is vendor-prefixed to keep accidental collisions with
//! remembered prose unlikely; no escaping is attempted.

pub const OPEN_MARKER: &str = "<memlink-memories>";
pub const CLOSE_MARKER: &str = "</memlink-memories>";

/// Enclose `body` in the marker pair.
pub fn wrap(body: &str) -> String {
    format!("{}\n{}\n{}", OPEN_MARKER, body, CLOSE_MARKER)
}

/// Remove every non-overlapping marker span (opening marker through the
/// nearest closing marker, across newlines) and trim the remainder.
///
/// An opening marker with no closing counterpart is left untouched.
/// Idempotent: stripping already-stripped text is a no-op.
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(OPEN_MARKER) {
        match rest[start + OPEN_MARKER.len()..].find(CLOSE_MARKER) {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + OPEN_MARKER.len() + end + CLOSE_MARKER.len()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_encloses_body() {
        let wrapped = wrap("KNOWN FACTS:\n- Alice: likes tea");
        assert!(wrapped.starts_with(OPEN_MARKER));
        assert!(wrapped.ends_with(CLOSE_MARKER));
        assert!(wrapped.contains("Alice: likes tea"));
    }

    #[test]
    fn test_strip_removes_wrapped_span_leaving_suffix() {
        let text = format!("{}\nand then the user replied", wrap("remembered stuff"));
        assert_eq!(strip(&text), "and then the user replied");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let text = format!("before {} after", wrap("body"));
        let once = strip(&text);
        assert_eq!(strip(&once), once);

        let plain = "no markers here at all";
        assert_eq!(strip(&strip(plain)), strip(plain));
    }

    #[test]
    fn test_strip_handles_multiple_blocks() {
        let text = format!("{} middle {} tail", wrap("first"), wrap("second"));
        assert_eq!(strip(&text), "middle  tail");
    }

    #[test]
    fn test_strip_fully_injected_message_becomes_empty() {
        assert_eq!(strip(&wrap("only injected content")), "");
    }

    #[test]
    fn test_strip_leaves_unterminated_marker_alone() {
        let text = format!("{} dangling open, no close", OPEN_MARKER);
        assert_eq!(strip(&text), text.trim());
    }

    #[test]
    fn test_strip_spans_newlines() {
        let text = format!(
            "{}\nline one\nline two\n{}\nkept",
            OPEN_MARKER, CLOSE_MARKER
        );
        assert_eq!(strip(&text), "kept");
    }
}
