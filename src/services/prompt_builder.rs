use crate::constants::generation_prompt::{
    MAX_SOURCE_CHARS, SYSTEM_PROMPT_TEMPLATE, USER_TEXT_END, USER_TEXT_START,
};
use crate::models::domain::TestType;

/// System instruction plus user payload, ready for the model call.
#[derive(Clone, Debug)]
pub struct GenerationPrompt {
    pub system: String,
    pub user: String,
}

/// Fill the system template and wrap the (possibly truncated) study
/// material in untrusted-content delimiters. The count is expected to be
/// clamped by the request layer already.
pub fn build_generation_prompt(
    source_text: &str,
    test_type: TestType,
    question_count: u8,
) -> GenerationPrompt {
    let system = SYSTEM_PROMPT_TEMPLATE
        .replace("{question_count}", &question_count.to_string())
        .replace("{test_type}", test_type.as_str());

    let user = format!(
        "{}\n{}\n{}",
        USER_TEXT_START,
        truncate_source(source_text),
        USER_TEXT_END
    );

    GenerationPrompt { system, user }
}

/// Silent prefix cut at the character cap; never splits a code point.
pub fn truncate_source(text: &str) -> &str {
    match text.char_indices().nth(MAX_SOURCE_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
