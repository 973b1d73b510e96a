use tracing::trace;

use super::fields::FieldValues;
use super::rules::classify_key;

/// A `key: value` line. The value keeps any further colons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLine<'a> {
    pub key: String,
    pub value: &'a str,
}

pub fn split_key_value(line: &str) -> Option<KeyLine<'_>> {
    let (key, value) = line.split_once(':')?;
    Some(KeyLine {
        key: key.to_lowercase(),
        value: value.trim(),
    })
}

/// Route every recognised `key: value` line to its field. Later lines replace earlier ones.
pub fn classify_lines(text: &str) -> FieldValues {
    let mut values = FieldValues::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(kv) = split_key_value(line) else {
            continue;
        };
        if let Some(field) = classify_key(&kv.key) {
            trace!(key = %kv.key, %field, "line rule matched");
            values.set(field, kv.value);
        }
    }

    values
}

// ── Tests ──
