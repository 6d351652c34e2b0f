//! Version string normalization and update classification.
//!
//! Upstreams disagree about how a version is spelled: `v1.2.3`,
//! `release-2.0.0`, `1.2.3-alpine`. [`normalize`] is a best-effort
//! heuristic that strips the common decorations so that versions from
//! different sources compare equal when they name the same release. It
//! performs no numeric validation and never fails; malformed input comes
//! back transformed but otherwise untouched.

/// Normalizes a raw version token into its canonical comparable form.
///
/// When `beautify` is false the input is returned unchanged, preserving
/// exact upstream comparison semantics. When true, the following steps run
/// in this fixed order:
///
/// 1. strip a single leading `v`
/// 2. strip a leading `release-` prefix
/// 3. truncate at the first remaining `-` (drops qualifiers like
///    `-alpine` or `-rc1`)
///
/// The order matters: `"release-v1.0-rc1"` fails the `v` check (it starts
/// with `r`), loses `release-`, and truncates to `"v1.0"`, while
/// `"vrelease-1.0"` loses the `v` first and then `release-`, yielding
/// `"1.0"`.
pub fn normalize(raw: &str, beautify: bool) -> String {
    if !beautify {
        return raw.to_string();
    }

    let stripped = raw.strip_prefix('v').unwrap_or(raw);
    let stripped = stripped.strip_prefix("release-").unwrap_or(stripped);

    match stripped.find('-') {
        Some(idx) => stripped[..idx].to_string(),
        None => stripped.to_string(),
    }
}

/// How far apart two versions are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Major,
    Minor,
    Patch,
}

impl UpdateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateKind::Major => "MAJOR",
            UpdateKind::Minor => "minor",
            UpdateKind::Patch => "patch",
        }
    }
}

/// Classifies the jump from `current` to `latest`.
///
/// Tries semver first and falls back to comparing dot-separated numeric
/// components, so non-semver strings like `2.414` still classify sensibly.
pub fn classify_update(current: &str, latest: &str) -> UpdateKind {
    let current = current.trim_start_matches('v');
    let latest = latest.trim_start_matches('v');

    if let (Ok(cur), Ok(lat)) = (
        semver::Version::parse(current),
        semver::Version::parse(latest),
    ) {
        return if lat.major != cur.major {
            UpdateKind::Major
        } else if lat.minor != cur.minor {
            UpdateKind::Minor
        } else {
            UpdateKind::Patch
        };
    }

    let cur_parts: Vec<Option<u64>> = current.split('.').map(|p| p.parse().ok()).collect();
    let lat_parts: Vec<Option<u64>> = latest.split('.').map(|p| p.parse().ok()).collect();

    match (cur_parts.first(), lat_parts.first()) {
        (Some(Some(c)), Some(Some(l))) if c != l => return UpdateKind::Major,
        _ => {}
    }
    match (cur_parts.get(1), lat_parts.get(1)) {
        (Some(Some(c)), Some(Some(l))) if c != l => return UpdateKind::Minor,
        _ => {}
    }

    UpdateKind::Patch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identity_without_beautify() {
        for raw in ["v1.2.3", "release-2.0.0", "1.2.3-alpine", "garbage"] {
            assert_eq!(normalize(raw, false), raw);
        }
    }

    #[test]
    fn test_normalize_strips_v_prefix() {
        assert_eq!(normalize("v1.2.3", true), "1.2.3");
    }

    #[test]
    fn test_normalize_strips_release_prefix() {
        assert_eq!(normalize("release-2.0.0", true), "2.0.0");
    }

    #[test]
    fn test_normalize_truncates_qualifier() {
        assert_eq!(normalize("v1.2.3-alpine", true), "1.2.3");
        assert_eq!(normalize("1.2.3-rc1", true), "1.2.3");
    }

    #[test]
    fn test_normalize_release_then_v_is_kept() {
        // The v-strip only applies to the very first character, so an input
        // starting with "release-" skips that branch entirely.
        assert_eq!(normalize("release-v1.0-rc1", true), "v1.0");
    }

    #[test]
    fn test_normalize_v_before_release_precedence() {
        assert_eq!(normalize("vrelease-1.0", true), "1.0");
    }

    #[test]
    fn test_normalize_plain_version_untouched() {
        assert_eq!(normalize("1.4.0", true), "1.4.0");
    }

    #[test]
    fn test_normalize_strips_single_v_only() {
        assert_eq!(normalize("vv1.0", true), "v1.0");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let first = normalize("v3.1.4-beta-2", true);
        let second = normalize("v3.1.4-beta-2", true);
        assert_eq!(first, second);
        assert_eq!(first, "3.1.4");
    }

    #[test]
    fn test_classify_update_semver() {
        assert_eq!(classify_update("1.4.0", "2.0.0"), UpdateKind::Major);
        assert_eq!(classify_update("v1.4.0", "v1.5.0"), UpdateKind::Minor);
        assert_eq!(classify_update("1.4.0", "1.4.2"), UpdateKind::Patch);
    }

    #[test]
    fn test_classify_update_non_semver() {
        assert_eq!(classify_update("2.414", "2.426"), UpdateKind::Minor);
        assert_eq!(classify_update("2.414", "3.1"), UpdateKind::Major);
    }
}
