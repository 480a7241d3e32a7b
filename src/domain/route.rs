//! Locale encoded in the first segment of a route path.
//!
//! The default locale never appears in a canonical path; every other locale
//! prefixes the path with its code (`/about`, `/zh/about`). All helpers take a
//! pathname without query string or fragment.

use super::locale::Locale;

/// Locale carried by the first path segment, if it is a supported code.
pub fn route_locale(path: &str) -> Option<Locale> {
    let (first, _) = split_first_segment(path);
    Locale::from_code(first)
}

/// Locale a route renders in: its prefix, or the default when unprefixed.
pub fn active_route_locale(path: &str) -> Locale {
    route_locale(path).unwrap_or(Locale::DEFAULT)
}

/// Rewrite `path` so that it renders in `target`.
///
/// Any existing locale segment is dropped, the target code is prepended
/// unless it is the default locale, a single trailing slash is removed, and
/// an empty result becomes `/`.
pub fn localized_path(path: &str, target: Locale) -> String {
    let rest = strip_route_locale(path);

    let mut rewritten = if target.is_default() {
        rest
    } else {
        format!("/{}{rest}", target.as_str())
    };

    if rewritten.ends_with('/') {
        rewritten.pop();
    }
    if rewritten.is_empty() {
        rewritten.push('/');
    }
    rewritten
}

/// Canonical form of a route that redundantly carries the default locale.
///
/// Returns `None` when the path is already canonical.
pub fn canonical_path(path: &str) -> Option<String> {
    route_locale(path)
        .filter(|locale| locale.is_default())
        .map(|_| localized_path(path, Locale::DEFAULT))
}

fn strip_route_locale(path: &str) -> String {
    let (first, rest) = split_first_segment(path);
    if Locale::from_code(first).is_some() {
        rest.to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn split_first_segment(path: &str) -> (&str, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(idx) => trimmed.split_at(idx),
        None => (trimmed, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_locale_prefix() {
        assert_eq!(route_locale("/zh/blog"), Some(Locale::Zh));
        assert_eq!(route_locale("/en"), Some(Locale::En));
        assert_eq!(route_locale("/blog"), None);
        assert_eq!(route_locale("/zhx/blog"), None);
        assert_eq!(route_locale("/"), None);
        assert_eq!(active_route_locale("/blog/page/2"), Locale::En);
        assert_eq!(active_route_locale("/zh/blog/page/2"), Locale::Zh);
    }

    #[test]
    fn default_prefixed_routes_are_canonicalized() {
        assert_eq!(canonical_path("/en/blog").as_deref(), Some("/blog"));
        assert_eq!(canonical_path("/en").as_deref(), Some("/"));
        assert_eq!(canonical_path("/en/").as_deref(), Some("/"));
        assert_eq!(canonical_path("/zh/blog"), None);
        assert_eq!(canonical_path("/blog"), None);
    }

    #[test]
    fn switching_to_default_drops_the_prefix() {
        assert_eq!(localized_path("/zh/about", Locale::En), "/about");
        assert_eq!(localized_path("/zh", Locale::En), "/");
        assert_eq!(localized_path("/about", Locale::En), "/about");
        assert_eq!(localized_path("/", Locale::En), "/");
    }

    #[test]
    fn switching_to_other_locale_adds_or_replaces_the_prefix() {
        assert_eq!(localized_path("/about", Locale::Zh), "/zh/about");
        assert_eq!(localized_path("/en/about", Locale::Zh), "/zh/about");
        assert_eq!(localized_path("/zh/about", Locale::Zh), "/zh/about");
        assert_eq!(localized_path("/", Locale::Zh), "/zh");
        assert_eq!(localized_path("/blog/page/2/", Locale::Zh), "/zh/blog/page/2");
    }

    #[test]
    fn relative_paths_are_treated_as_rooted() {
        assert_eq!(localized_path("about", Locale::Zh), "/zh/about");
        assert_eq!(localized_path("", Locale::En), "/");
    }
}
