//! Small text transforms used when turning report keys into display strings.

use crate::constants::REFERENCE_URL_PREFIX;

/// Title-case `input` the way Python's `str.title` does.
///
/// A cased character (upper, lower or titlecase) that follows an uncased one
/// takes its titlecase form; every other cased character is lower-cased. Any
/// uncased character, including digits, punctuation and CJK ideographs,
/// starts a new word, so `"2nd"` becomes `"2Nd"` and `"中a"` becomes `"中A"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_cased = false;

    for c in input.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            push_titlecase(&mut out, c);
        }
        previous_cased = is_cased(c);
    }

    out
}

fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || is_titlecase_letter(c)
}

/// Letters in general category Lt.
fn is_titlecase_letter(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// Append the titlecase mapping of `c`.
///
/// Differs from upper case for the Latin digraphs, Greek letters with
/// ypogegrammeni, and characters whose upper case expands to several letters
/// (`ß` → `Ss`, `ﬁ` → `Fi`).
fn push_titlecase(out: &mut String, c: char) {
    let single = match c {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            char::from_u32(c as u32 + 8)
        }
        '\u{1FB3}' => Some('\u{1FBC}'),
        '\u{1FC3}' => Some('\u{1FCC}'),
        '\u{1FF3}' => Some('\u{1FFC}'),
        _ => None,
    };
    if let Some(t) = single {
        out.push(t);
        return;
    }
    if is_titlecase_letter(c) {
        out.push(c);
        return;
    }
    if c == '\u{0149}' {
        out.push_str("\u{02BC}N");
        return;
    }

    let upper: Vec<char> = c.to_uppercase().collect();
    if upper.len() == 1 {
        out.push(upper[0]);
        return;
    }

    let iota_subscript = matches!(
        c,
        '\u{1FB2}' | '\u{1FB4}' | '\u{1FB7}' | '\u{1FC2}' | '\u{1FC4}' | '\u{1FC7}' | '\u{1FF2}'
            | '\u{1FF4}' | '\u{1FF7}'
    );
    if iota_subscript {
        // Upper case ends in a capital iota; titlecase keeps it subscript.
        out.extend(&upper[..upper.len() - 1]);
        out.push('\u{0345}');
        return;
    }

    out.push(upper[0]);
    for &rest in &upper[1..] {
        out.extend(rest.to_lowercase());
    }
}

/// Heading for a recovery option key: underscores become spaces, then title case.
pub fn option_heading(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

/// Slug used in the reference URL: spaces become hyphens, then lower case.
pub fn reference_slug(disease_name: &str) -> String {
    disease_name.replace(' ', "-").to_lowercase()
}

pub fn reference_url(disease_name: &str) -> String {
    format!("{REFERENCE_URL_PREFIX}{}", reference_slug(disease_name))
}

/// Format a case count for display.
///
/// Whole numbers get thousands separators (`476000` → `476,000`); anything
/// else is shown with its default float formatting.
pub fn format_count(value: f64) -> String {
    if value.fract() != 0.0 || value.abs() >= 1e15 {
        return value.to_string();
    }

    let digits = (value.abs() as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_heading_replaces_underscores() {
        assert_eq!(option_heading("lifestyle_changes"), "Lifestyle Changes");
        assert_eq!(option_heading("ANTIVIRAL_therapy"), "Antiviral Therapy");
        assert_eq!(option_heading("rest"), "Rest");
    }

    #[test]
    fn uncased_characters_start_a_new_word() {
        assert_eq!(option_heading("中a_b"), "中A B");
        assert_eq!(title_case("covid19x"), "Covid19X");
    }

    #[test]
    fn titlecase_mapping_differs_from_upper_case() {
        assert_eq!(title_case("ǆx"), "ǅx");
        assert_eq!(title_case("Ǆungla"), "ǅungla");
        assert_eq!(title_case("ǉubljana"), "ǈubljana");
        assert_eq!(title_case("ßa"), "Ssa");
        assert_eq!(title_case("ﬁsh"), "Fish");
        assert_eq!(title_case("\u{1FB3}x"), "\u{1FBC}x");
        assert_eq!(title_case("\u{1FB2}"), "\u{1FBA}\u{0345}");
    }

    #[test]
    fn titlecase_letter_continues_a_word() {
        assert_eq!(title_case("aǅB"), "Aǆb");
    }

    #[test]
    fn title_case_restarts_after_non_letters() {
        assert_eq!(title_case("2nd line treatment"), "2Nd Line Treatment");
        assert_eq!(title_case("they're fine"), "They'Re Fine");
        assert_eq!(title_case("post-exposure"), "Post-Exposure");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn reference_link_uses_lowercase_hyphenated_slug() {
        assert_eq!(reference_slug("Lyme Disease"), "lyme-disease");
        let url = reference_url("Lyme Disease");
        assert!(url.ends_with("lyme-disease"));
        assert!(url.starts_with("https://www.who.int/"));
    }

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(476000.0), "476,000");
        assert_eq!(format_count(463000000.0), "463,000,000");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(-1234.0), "-1,234");
        assert_eq!(format_count(12.5), "12.5");
    }

    #[test]
    fn reference_slug_keeps_other_characters() {
        assert_eq!(reference_slug("COVID-19"), "covid-19");
        assert_eq!(reference_slug("Hepatitis  B"), "hepatitis--b");
    }
}
