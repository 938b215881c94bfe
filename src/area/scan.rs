//! Line-level scanning primitives shared by the entity extractors.
//!
//! The legacy grammar is line oriented: every extractor walks an in-memory
//! slice of trimmed lines with a cursor and pulls tilde-terminated text
//! blocks out of it. Nothing here allocates beyond the strings it returns.

/// Forward-only cursor over one entity's lines.
pub(crate) struct Cursor<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, pos: 0 }
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(|l| l.as_str())
    }

    pub fn next(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line.as_str())
    }

    /// Collect lines until one ends with `~`. The terminator line itself
    /// contributes whatever precedes the tilde, so both `text~` and a bare
    /// `~` closing a multi-line block work. Returns `None` when the block
    /// runs out of lines first.
    pub fn read_tilde_block(&mut self) -> Option<String> {
        let mut collected: Vec<&str> = Vec::new();
        while let Some(line) = self.next() {
            if let Some(stripped) = line.strip_suffix('~') {
                collected.push(stripped.trim_end_matches('~'));
                return Some(collected.join("\n").trim().to_string());
            }
            collected.push(line);
        }
        None
    }
}

/// Extract the number from a `#<digits>` vnum header line.
pub(crate) fn vnum_of(line: &str) -> Option<i64> {
    let rest = line.strip_prefix('#')?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

/// Parse an integer token, tolerating a leading minus sign. Anything else
/// falls back to `default`.
pub(crate) fn parse_signed_or(token: &str, default: i64) -> i64 {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return default;
    }
    token.parse().unwrap_or(default)
}

/// Parse an unsigned decimal token, falling back to `default`.
pub(crate) fn parse_unsigned_or(token: &str, default: i64) -> i64 {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return default;
    }
    token.parse().unwrap_or(default)
}
