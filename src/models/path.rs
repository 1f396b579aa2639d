//! Pure logical-path helpers: reference resolution and file lookup.
//!
//! "Not found" is a normal negative result here, never an error;
//! callers annotate or skip unresolved references.

use super::file_tree::FileView;

/// Resolves a reference string against the path of the file that
/// contains it. Absolute references pass through unchanged, so the
/// function is idempotent on already-absolute paths.
pub fn resolve(current_path: &str, reference: &str) -> String {
    if reference.starts_with('/') {
        return reference.to_string();
    }
    let dir = parent_dir(current_path);
    let relative = reference.strip_prefix("./").unwrap_or(reference);
    format!("{dir}/{relative}")
}

fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Finds a file by exact path, falling back to a bare-filename match.
/// The fallback is a deliberate leniency toward hand-authored
/// references; when several files share the basename the shortest
/// path wins, ties broken lexicographically.
pub fn lookup<'a>(files: &'a [FileView], path: &str) -> Option<&'a FileView> {
    if let Some(found) = files.iter().find(|f| f.path == path) {
        return Some(found);
    }

    let base = basename(path);
    files
        .iter()
        .filter(|f| f.name == base)
        .min_by(|a, b| {
            a.path
                .len()
                .cmp(&b.path.len())
                .then_with(|| a.path.cmp(&b.path))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::language::Language;
    use crate::models::file_tree::FileTree;

    fn view(name: &str, path: &str) -> FileView {
        // Node ids only matter for identity here; mint them from a
        // throwaway tree.
        let mut tree = FileTree::new();
        let id = tree.create_file(name, None).unwrap();
        FileView {
            id,
            name: name.to_string(),
            path: path.to_string(),
            language: Language::from_name(name),
            content: String::new(),
        }
    }

    #[test]
    fn test_resolve_absolute_passes_through() {
        assert_eq!(resolve("/index.html", "/style.css"), "/style.css");
    }

    #[test]
    fn test_resolve_is_idempotent_on_absolute() {
        let once = resolve("/index.html", "style.css");
        assert_eq!(resolve("/index.html", &once), once);
    }

    #[test]
    fn test_resolve_dot_slash() {
        assert_eq!(resolve("/index.html", "./style.css"), "/style.css");
        assert_eq!(resolve("/src/app.js", "./util.js"), "/src/util.js");
    }

    #[test]
    fn test_resolve_bare_relative() {
        assert_eq!(resolve("/index.html", "script.js"), "/script.js");
        assert_eq!(resolve("/src/app.js", "util.js"), "/src/util.js");
    }

    #[test]
    fn test_lookup_exact_path_first() {
        let files = vec![view("a.js", "/src/a.js"), view("a.js", "/a.js")];
        let found = lookup(&files, "/src/a.js").unwrap();
        assert_eq!(found.path, "/src/a.js");
    }

    #[test]
    fn test_lookup_basename_fallback() {
        let files = vec![view("style.css", "/assets/style.css")];
        let found = lookup(&files, "/style.css").unwrap();
        assert_eq!(found.path, "/assets/style.css");
    }

    #[test]
    fn test_lookup_ambiguous_basename_prefers_shortest_path() {
        let files = vec![
            view("a.js", "/deeply/nested/a.js"),
            view("a.js", "/lib/a.js"),
            view("a.js", "/src/a.js"),
        ];
        let found = lookup(&files, "/missing/a.js").unwrap();
        // "/lib/a.js" and "/src/a.js" tie on length; lexicographic
        // order decides.
        assert_eq!(found.path, "/lib/a.js");
    }

    #[test]
    fn test_lookup_miss_is_none() {
        let files = vec![view("a.js", "/a.js")];
        assert!(lookup(&files, "/b.js").is_none());
    }
}
