//! Label normalization.
//!
//! All ontology matching happens over normalized forms so that surface
//! variants ("Machine-Learning", "machine learning (ML)") collapse to one
//! representation before comparison.

/// Normalize a label for comparison.
///
/// Lowercases, strips parenthesized qualifiers, turns hyphens into spaces and
/// collapses runs of whitespace.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut depth = 0usize;
    for c in label.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            '-' => out.push(' '),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical form: normalized label with the last word folded to singular.
///
/// The plural folding is deliberately naive ("networks" -> "network",
/// "ontologies" -> "ontology"); it exists to merge plural/singular label
/// variants, not to be a stemmer.
pub fn canonical_form(label: &str) -> String {
    let normalized = normalize_label(label);
    let mut parts: Vec<String> = normalized.split(' ').map(String::from).collect();
    if let Some(last) = parts.last_mut() {
        *last = fold_plural(last);
    }
    parts.join(" ")
}

fn fold_plural(word: &str) -> String {
    if word.len() > 3 && word.ends_with("ies") {
        return format!("{}y", &word[..word.len() - 3]);
    }
    if word.len() > 4
        && (word.ends_with("sses") || word.ends_with("shes") || word.ends_with("ches"))
    {
        return word[..word.len() - 2].to_string();
    }
    if word.len() > 3 && word.ends_with("es") && !word.ends_with("ss") {
        return word[..word.len() - 2].to_string();
    }
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return word[..word.len() - 1].to_string();
    }
    word.to_string()
}
