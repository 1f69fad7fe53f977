//! Derivation of the storage object name for an upload

use std::sync::OnceLock;

use regex::Regex;

fn whitespace_runs() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex is valid"))
}

/// Builds `<voornaam>_<familienaam>_<timestamp_millis>`, lower-cased, with every
/// whitespace run collapsed into a single underscore.
///
/// Absent names count as empty strings, so a form without either name yields
/// `__<timestamp_millis>` rather than a literal placeholder such as
/// `undefined_undefined_<timestamp_millis>`. The result is only unique per
/// millisecond; two uploads for the same person in the same millisecond share a
/// name and the second overwrites the first object.
pub fn object_name(
    voornaam: Option<&str>,
    familienaam: Option<&str>,
    timestamp_millis: i64,
) -> String {
    let joined = format!(
        "{}_{}",
        voornaam.unwrap_or_default(),
        familienaam.unwrap_or_default()
    )
    .to_lowercase();

    let safe = whitespace_runs().replace_all(&joined, "_");
    format!("{}_{}", safe, timestamp_millis)
}
