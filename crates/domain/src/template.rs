//! Inline URL parameter templating
//!
//! A human-writable URL such as `/users/user_id: 42` carries a sample value
//! inline. Extraction rewrites each `/name: value` occurrence to the
//! placeholder form `/:name` and records `name -> value`, so an override can
//! change one parameter without rewriting the whole path.

use std::collections::BTreeMap;

/// Scans `url` for `/name: value` segments.
///
/// Each occurrence is recorded and rewritten to `/:name`. A later
/// occurrence of the same name overwrites the earlier value. A URL with no
/// occurrences comes back unchanged with an empty map.
///
/// The name is one or more word characters, the colon may be followed by a
/// single optional space, and the value is one or more word characters or
/// hyphens.
#[must_use]
pub fn extract_url_parameters(url: &str) -> (String, BTreeMap<String, String>) {
    let mut parameters = BTreeMap::new();
    let mut rewritten = String::with_capacity(url.len());
    let mut rest = url;

    while let Some(slash) = rest.find('/') {
        rewritten.push_str(&rest[..=slash]);
        rest = &rest[slash + 1..];
        if let Some((name, value, consumed)) = match_parameter(rest) {
            rewritten.push(':');
            rewritten.push_str(name);
            parameters.insert(name.to_string(), value.to_string());
            rest = &rest[consumed..];
        }
    }
    rewritten.push_str(rest);

    (rewritten, parameters)
}

/// Matches `name: value` at the start of `input`, returning the name, the
/// value and the number of bytes consumed.
fn match_parameter(input: &str) -> Option<(&str, &str, usize)> {
    let name_end = input.find(|c: char| !is_name_char(c))?;
    if name_end == 0 {
        return None;
    }
    let (name, after_name) = input.split_at(name_end);

    let after_colon = after_name.strip_prefix(':')?;
    let value_start = after_colon.strip_prefix(' ').unwrap_or(after_colon);

    let value_end = value_start
        .find(|c: char| !is_value_char(c))
        .unwrap_or(value_start.len());
    if value_end == 0 {
        return None;
    }
    let value = &value_start[..value_end];

    let consumed = input.len() - value_start.len() + value_end;
    Some((name, value, consumed))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_value_char(c: char) -> bool {
    is_name_char(c) || c == '-'
}
