// Product code normalization

/// Trim and keep only ASCII alphanumerics: `"123-456 789"` -> `"123456789"`
pub fn normalize_code(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
