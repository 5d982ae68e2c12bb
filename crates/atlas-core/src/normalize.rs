//! Canonicalization of free-text labels and numeric strings.

/// Trim the text and collapse every internal whitespace run to one space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut parts = text.split_whitespace();
    let mut collapsed = String::with_capacity(text.len());
    if let Some(first) = parts.next() {
        collapsed.push_str(first);
        for part in parts {
            collapsed.push(' ');
            collapsed.push_str(part);
        }
    }
    collapsed
}

/// Canonical form of a name or continent.
///
/// Collapses whitespace, then capitalizes each whitespace-separated word
/// (first letter upper, rest lower). Hyphenated or apostrophized words are a
/// single word: `"guinea-bissau"` becomes `"Guinea-bissau"`.
pub fn normalize_name(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    let mut normalized = String::with_capacity(collapsed.len());
    for (idx, word) in collapsed.split(' ').enumerate() {
        if idx > 0 {
            normalized.push(' ');
        }
        capitalize_into(word, &mut normalized);
    }
    normalized
}

fn capitalize_into(word: &str, out: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        for ch in chars {
            out.extend(ch.to_lowercase());
        }
    }
}

/// Remove every `.` and `,` from a numeric string, wherever they appear.
///
/// Separator placement is not checked: `"1.2,3"` becomes `"123"`.
pub fn strip_group_separators(text: &str) -> String {
    text.chars().filter(|ch| !matches!(ch, '.' | ',')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_and_capitalizes() {
        assert_eq!(normalize_name("  juan   carlos "), "Juan Carlos");
        assert_eq!(normalize_name("ARGENTINA"), "Argentina");
        assert_eq!(normalize_name("\tcosta\n rica"), "Costa Rica");
        assert_eq!(normalize_name("ÁFRICA"), "África");
        assert_eq!(normalize_name("españa"), "España");
    }

    #[test]
    fn hyphenated_words_are_one_word() {
        assert_eq!(normalize_name("guinea-BISSAU"), "Guinea-bissau");
        assert_eq!(normalize_name("côte d'IVOIRE"), "Côte D'ivoire");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(normalize_name(""), "");
        assert_eq!(normalize_name("   \t "), "");
        assert_eq!(collapse_whitespace("  a  b  "), "a b");
    }

    #[test]
    fn strips_separators_anywhere() {
        assert_eq!(strip_group_separators("1.234.567"), "1234567");
        assert_eq!(strip_group_separators("1,234,567"), "1234567");
        assert_eq!(strip_group_separators("1.2,3"), "123");
        assert_eq!(strip_group_separators(".,"), "");
        assert_eq!(strip_group_separators(" 12 "), " 12 ");
    }
}
