//! Logging helpers for legacy file content.
//!
//! Area files are full of multi-line descriptions and the occasional
//! control character; flattening them keeps the audit log one line per
//! event.

/// Render a line of legacy text safe for single-line logging: newlines,
/// carriage returns and tabs become escapes, other control characters
/// become `\xNN`, and anything past the preview cap is elided.
pub fn preview(s: &str) -> String {
    const MAX_PREVIEW: usize = 160;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push_str("...");
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn flattens_multiline_text() {
        assert_eq!(preview("line1\nline2\ttab"), "line1\\nline2\\ttab");
    }

    #[test]
    fn caps_very_long_lines() {
        let long = "x".repeat(500);
        let out = preview(&long);
        assert!(out.len() < 200);
        assert!(out.ends_with("..."));
    }
}
