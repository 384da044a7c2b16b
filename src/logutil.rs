//! Logging helpers that keep player-supplied strings on a single log line.
//! Usernames and reply text may contain newlines or control characters;
//! everything is escaped before it reaches the log.

/// Escape player-supplied text for single-line logging. Newlines, tabs,
/// backslashes, and other control characters are escaped; anything past
/// the preview cap is dropped with an ellipsis so one chatty reply cannot
/// flood a log line.
pub fn escape_log(s: &str) -> String {
    // Reply strings here are short; 160 chars is plenty of context.
    const MAX_PREVIEW: usize = 160;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    let mut chars = s.chars();
    for ch in chars.by_ref().take(MAX_PREVIEW) {
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
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
