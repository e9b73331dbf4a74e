//! Shared CLI utilities.

/// Split an `--exclude-dir` value such as `target, dist` into directory names.
/// Blank names are dropped; `None` means the flag was not given.
pub fn parse_csv(value: &Option<String>) -> Option<Vec<String>> {
    value.as_ref().map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.to_string())
            .collect::<Vec<_>>()
    })
}
