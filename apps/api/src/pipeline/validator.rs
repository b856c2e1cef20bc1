//! Response Validator — normalizes model output before a JSON parse attempt.
//!
//! Models routinely wrap JSON in ```json fences despite being told not to.
//! This is a pure text transform with no LLM awareness.

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Text that does not start with a fence passes through (trimmed) unchanged.
pub fn normalize(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_with_json_tag() {
        let input = "```json\n{\"a\":1}\n```";
        assert_eq!(normalize(input), "{\"a\":1}");
    }

    #[test]
    fn test_normalize_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(normalize(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_normalize_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(normalize(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_normalize_unterminated_fence_drops_opener() {
        let input = "```json\n{\"key\": \"value\"}";
        assert_eq!(normalize(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "```json\n{\"a\":1}\n```",
            "```\n{\"a\":1}\n```",
            "{\"a\":1}",
            "  plain prose  ",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(once), once, "not idempotent for {input:?}");
        }
    }
}
