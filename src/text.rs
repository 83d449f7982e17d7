pub const MAX_TEXT_CHARS: usize = 140;
pub const ELLIPSIS: &str = "...";

/// Cuts `text` down to [`MAX_TEXT_CHARS`] characters and marks the cut with
/// [`ELLIPSIS`]. Shorter text, including the empty string, comes back as is.
pub fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_TEXT_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Title-cases a changelog field name: the first cased character of every
/// word is upper-cased and the rest are lower-cased, so `"fix version"`
/// becomes `"Fix Version"` and `"RemoteIssueLink"` becomes
/// `"Remoteissuelink"`. Word starts use the plain upper-case mapping, not
/// Unicode titlecase, so `ǆ` becomes `Ǆ` rather than `ǅ`.
pub fn title_case(field: &str) -> String {
    let mut titled = String::with_capacity(field.len());
    let mut previous_cased = false;
    for c in field.chars() {
        if previous_cased {
            titled.extend(c.to_lowercase());
        } else {
            titled.extend(c.to_uppercase());
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }
    titled
}
