//! Shared utilities

/// Truncate a string to `max` characters, appending "..." if truncated.
/// Operates on Unicode char boundaries, not bytes.
pub fn truncate_chars(s: &str, max: usize) -> String {
    let mut chars = s.chars();
    let truncated: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

/// Clamp a requested scroll offset (`usize::MAX` means "bottom") to content.
pub fn clamp_scroll(requested: usize, content_height: usize, viewport_height: usize) -> usize {
    requested.min(content_height.saturating_sub(viewport_height))
}
