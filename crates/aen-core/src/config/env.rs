/// Source of environment-style settings. `std::env::var` in production, a map
/// in tests.
pub(super) type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

#[must_use]
pub(super) fn read_non_empty(lookup: &Lookup<'_>, name: &str) -> Option<String> {
    lookup(name)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Like [`read_non_empty`] but keeps surrounding whitespace, which may be
/// part of a password.
#[must_use]
pub(super) fn read_secret(lookup: &Lookup<'_>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.is_empty())
}

#[must_use]
pub(super) fn read_u32(lookup: &Lookup<'_>, name: &str) -> Option<u32> {
    lookup(name).and_then(|raw| raw.trim().parse::<u32>().ok())
}

#[must_use]
pub(super) fn read_u64(lookup: &Lookup<'_>, name: &str) -> Option<u64> {
    lookup(name).and_then(|raw| raw.trim().parse::<u64>().ok())
}

#[must_use]
pub(super) fn parse_env_bool(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|value| value.trim().to_ascii_lowercase()),
        Some(value) if matches!(value.as_str(), "1" | "true" | "yes" | "on")
    )
}
