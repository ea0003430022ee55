use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;
const REDACTED: &str = "[REDACTED]";

/// Markers after which the following token is a credential.
const SECRET_MARKERS: [&str; 8] = [
    "Bearer ",
    "bearer ",
    "api_key=",
    "apiKey=",
    "access_token=",
    "\"api_key\":\"",
    "\"apiKey\":\"",
    "\"access_token\":\"",
];

/// Key prefixes issued by common hosted model APIs.
const KEY_PREFIXES: [&str; 4] = ["sk-", "tgp_", "hf_", "gsk_"];

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '+' | '/' | '=')
}

fn token_len(rest: &str) -> usize {
    rest.char_indices()
        .find(|&(_, c)| !is_token_char(c))
        .map_or(rest.len(), |(i, _)| i)
}

/// True when `marker` at `start` begins a word rather than sitting inside one.
fn starts_word(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_')))
}

/// Replace the token that follows every occurrence of `marker`.
/// With `keep_marker` the marker itself stays visible. With `word_start`
/// only occurrences at the start of a word count.
fn redact_after(text: &mut String, marker: &str, keep_marker: bool, word_start: bool) {
    let mut from = 0;
    while let Some(rel) = text[from..].find(marker) {
        let start = from + rel;
        let token_start = start + marker.len();
        let len = token_len(&text[token_start..]);
        if len == 0 || (word_start && !starts_word(text, start)) {
            from = token_start;
            continue;
        }
        let replace_from = if keep_marker { token_start } else { start };
        text.replace_range(replace_from..token_start + len, REDACTED);
        from = replace_from + REDACTED.len();
    }
}

/// Redact credentials from text that is about to be logged or shown.
///
/// `known` holds secrets the caller is aware of (the configured API key);
/// every literal occurrence is removed in addition to the pattern-based
/// redaction of bearer tokens, `api_key=` style pairs and key prefixes.
pub fn scrub_secrets<'a>(input: &'a str, known: &[&str]) -> Cow<'a, str> {
    let has_known = known
        .iter()
        .any(|secret| !secret.is_empty() && input.contains(secret));
    let has_marker = SECRET_MARKERS.iter().any(|m| input.contains(m));
    let has_prefix = KEY_PREFIXES.iter().any(|p| input.contains(p));
    if !has_known && !has_marker && !has_prefix {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_string();
    for secret in known.iter().filter(|s| !s.is_empty()) {
        scrubbed = scrubbed.replace(secret, REDACTED);
    }
    for marker in SECRET_MARKERS {
        redact_after(&mut scrubbed, marker, true, false);
    }
    for prefix in KEY_PREFIXES {
        redact_after(&mut scrubbed, prefix, false, true);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets and truncate an upstream error body for display.
pub fn sanitize_api_error(input: &str, known: &[&str]) -> String {
    let scrubbed = scrub_secrets(input.trim(), known);
    if scrubbed.chars().count() <= MAX_API_ERROR_CHARS {
        return scrubbed.into_owned();
    }
    let truncated: String = scrubbed.chars().take(MAX_API_ERROR_CHARS).collect();
    format!("{truncated}...")
}
