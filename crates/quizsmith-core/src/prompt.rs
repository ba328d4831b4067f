//! Quiz prompt construction

/// Maximum number of characters of document text embedded in a prompt
pub const DEFAULT_PROMPT_CONTEXT_CHARS: usize = 6000;

/// Build the single user prompt sent to the completion model.
///
/// The first `max_chars` characters (Unicode scalar values, not bytes) of `text` are
/// appended after a `---` separator. Parameters and text are embedded as-is.
pub fn build_quiz_prompt(
    text: &str,
    difficulty: &str,
    question_count: i64,
    max_chars: usize,
) -> String {
    format!(
        "Create a {} quiz based on this content. Make it {} questions long.\nUse a clear format. Use multiple choice if possible.\n---\n{}",
        difficulty,
        question_count,
        truncate_chars(text, max_chars)
    )
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
