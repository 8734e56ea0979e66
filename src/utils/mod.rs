//! Utility functions and helpers

use std::path::{Component, Path};

/// Logical entry name of `path` relative to `root`, always `/`-separated
///
/// Returns `None` for paths that do not live under `root`.
pub fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = pathdiff::diff_paths(path, root)?;
    let mut parts = Vec::new();

    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Strip leading slashes and surrounding whitespace from a theme root
pub fn normalize_theme_root(theme_root: &str) -> String {
    theme_root.trim().trim_start_matches('/').to_string()
}

/// Format duration as human-readable string
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();

    if secs >= 60.0 {
        let mins = (secs / 60.0).floor() as u64;
        let remaining_secs = secs - (mins as f64 * 60.0);
        format!("{}m {:.2}s", mins, remaining_secs)
    } else if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.0}ms", secs * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name() {
        let root = Path::new("/proj/frontend/entrypoints");

        assert_eq!(entry_name(root, &root.join("theme.ts")).as_deref(), Some("theme.ts"));
        assert_eq!(
            entry_name(root, &root.join("pages").join("cart.ts")).as_deref(),
            Some("pages/cart.ts")
        );
    }

    #[test]
    fn test_entry_name_outside_root() {
        let root = Path::new("/proj/frontend/entrypoints");

        assert_eq!(entry_name(root, Path::new("/proj/frontend/lib/a.ts")), None);
        assert_eq!(entry_name(root, root), None);
    }

    #[test]
    fn test_normalize_theme_root() {
        assert_eq!(normalize_theme_root("  /shopify "), "shopify");
        assert_eq!(normalize_theme_root("///theme/dist"), "theme/dist");
        assert_eq!(normalize_theme_root(" / "), "");
    }

    #[test]
    fn test_format_duration() {
        use std::time::Duration;

        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs_f64(1.5)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5.00s");
    }
}
