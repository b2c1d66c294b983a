use std::cmp::Ordering;

use crate::descriptor::PropertyDescriptor;

/// Lower-cases the first character, unless the first two characters are both
/// upper case (`FooBar` -> `fooBar`, `URL` -> `URL`).
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return name.to_string();
    }
    let mut out: String = first.to_lowercase().collect();
    out.push_str(&name[first.len_utf8()..]);
    out
}

/// Upper-cases the first character, unless the second one is already upper
/// case (`fooBar` -> `FooBar`, `uRL` -> `uRL`).
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) {
        return name.to_string();
    }
    let mut out: String = first.to_uppercase().collect();
    out.push_str(&name[first.len_utf8()..]);
    out
}

pub fn compare_by_name(a: &PropertyDescriptor, b: &PropertyDescriptor) -> Ordering {
    a.name.cmp(&b.name)
}
