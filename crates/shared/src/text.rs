//! String helpers for names, key/value blobs and case conversion.

use std::collections::BTreeMap;

/// Default separator between a key and its value.
pub const KEY_VALUE_SEPARATOR: char = '=';
/// Default separator between pairs.
pub const PAIR_SEPARATOR: char = ';';

/// `first last middle`, absent parts rendered empty, outer whitespace trimmed.
///
/// ```
/// use fleen_base_shared::text::full_name;
///
/// assert_eq!(full_name(Some("Ada"), Some("Lovelace"), None), "Ada Lovelace");
/// assert_eq!(full_name(Some("Ada"), Some("Lovelace"), Some("King")), "Ada Lovelace King");
/// assert_eq!(full_name(None, None, None), "");
/// ```
pub fn full_name(first: Option<&str>, last: Option<&str>, middle: Option<&str>) -> String {
    format!(
        "{} {} {}",
        first.unwrap_or_default(),
        last.unwrap_or_default(),
        middle.unwrap_or_default()
    )
    .trim()
    .to_string()
}

/// Parse `k1=v1;k2=v2` style blobs into a map.
///
/// Entries that do not split into exactly one key and one value are dropped.
/// Trailing empty segments are ignored, so `a=b=` still yields `a -> b`.
/// Later duplicates win.
pub fn str_to_map(
    input: &str,
    key_value_separator: char,
    pair_separator: char,
) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for pair in split_without_trailing_empties(input, pair_separator) {
        let parts = split_without_trailing_empties(pair, key_value_separator);
        if let [key, value] = parts.as_slice() {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

/// [`str_to_map`] with `=` and `;`.
pub fn str_to_map_default(input: &str) -> BTreeMap<String, String> {
    str_to_map(input, KEY_VALUE_SEPARATOR, PAIR_SEPARATOR)
}

fn split_without_trailing_empties(input: &str, separator: char) -> Vec<&str> {
    let mut parts: Vec<&str> = input.split(separator).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

/// Trim, then upper-case the first character.
pub fn to_sentence_case(value: &str) -> String {
    let trimmed = value.trim();
    let mut characters = trimmed.chars();
    characters.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(characters).collect()
    })
}

/// Trim, then capitalise every whitespace-separated word and lower-case the rest.
pub fn to_title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut characters = word.chars();
            characters.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(characters.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trim, then upper-case.
pub fn to_upper_case(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Hand `value` to `setter` only when present.
pub fn set_if_present<T, F>(value: Option<T>, setter: F)
where
    F: FnOnce(T),
{
    if let Some(value) = value {
        setter(value);
    }
}
