//! Code-unit comparison and search over UTF-16 text.

use std::cmp::Ordering;

pub(crate) fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Simple uppercase mapping of a single code unit. Surrogates and code units
/// whose uppercase form is not a single BMP character map to themselves.
pub(crate) fn fold_unit(unit: u16) -> u16 {
    if (0xD800..=0xDFFF).contains(&unit) {
        return unit;
    }
    let Some(c) = char::from_u32(unit as u32) else {
        return unit;
    };
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if (u as u32) < 0x1_0000 => u as u16,
        _ => unit,
    }
}

pub(crate) fn compare(a: &[u16], b: &[u16], ignore_case: bool) -> Ordering {
    if !ignore_case {
        return a.cmp(b);
    }
    a.iter()
        .map(|&u| fold_unit(u))
        .cmp(b.iter().map(|&u| fold_unit(u)))
}

fn unit_eq(a: &[u16], b: &[u16], ignore_case: bool) -> bool {
    if ignore_case {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| fold_unit(x) == fold_unit(y))
    } else {
        a == b
    }
}

/// First position of `value` inside `window`. An empty value matches at 0.
pub(crate) fn index_of(window: &[u16], value: &[u16], ignore_case: bool) -> Option<usize> {
    let w_len = window.len();
    let v_len = value.len();
    if v_len == 0 {
        return Some(0);
    }
    if v_len > w_len {
        return None;
    }
    (0..=(w_len - v_len)).find(|&i| unit_eq(&window[i..i + v_len], value, ignore_case))
}

/// Last position of `value` lying entirely inside `window`. An empty value
/// matches at the last position of the window.
pub(crate) fn last_index_of(window: &[u16], value: &[u16], ignore_case: bool) -> Option<usize> {
    let w_len = window.len();
    let v_len = value.len();
    if v_len == 0 {
        return Some(w_len.saturating_sub(1));
    }
    if v_len > w_len {
        return None;
    }
    (0..=(w_len - v_len))
        .rev()
        .find(|&i| unit_eq(&window[i..i + v_len], value, ignore_case))
}

pub(crate) fn starts_with(source: &[u16], prefix: &[u16], ignore_case: bool) -> bool {
    prefix.len() <= source.len() && unit_eq(&source[..prefix.len()], prefix, ignore_case)
}

pub(crate) fn ends_with(source: &[u16], suffix: &[u16], ignore_case: bool) -> bool {
    suffix.len() <= source.len()
        && unit_eq(&source[source.len() - suffix.len()..], suffix, ignore_case)
}
