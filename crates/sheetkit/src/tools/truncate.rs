//! Capping tool output size

/// Text cut down to a byte budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    /// Kept text, followed by a notice when anything was dropped
    pub content: String,
    pub truncated: bool,
    /// Bytes of the input text that were kept
    pub kept_bytes: usize,
    pub total_bytes: usize,
}

/// Keep the start of `text`, at most `max_bytes` of it
///
/// The cut falls after the last complete line that fits. A single line
/// longer than the budget is cut at a character boundary instead.
pub fn truncate_head(text: &str, max_bytes: usize) -> Truncated {
    let total_bytes = text.len();
    if total_bytes <= max_bytes {
        return Truncated {
            content: text.to_string(),
            truncated: false,
            kept_bytes: total_bytes,
            total_bytes,
        };
    }

    let cut = match text.as_bytes()[..max_bytes].iter().rposition(|&b| b == b'\n') {
        Some(newline) => newline,
        None => {
            let mut end = max_bytes;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            end
        }
    };

    Truncated {
        content: format!(
            "{}\n\n[Output truncated: showing {} of {} bytes. Use start_row/end_row to read fewer rows.]",
            &text[..cut],
            cut,
            total_bytes
        ),
        truncated: true,
        kept_bytes: cut,
        total_bytes,
    }
}
