//! Import specifier resolution against the known file set

use crate::model::{file_name, normalize_separators};
use std::collections::{HashMap, HashSet};

/// Extensions probed when a specifier omits one, in probe order.
pub const MODULE_EXTENSIONS: &[&str] = &[".js", ".ts", ".jsx", ".tsx", ".mjs", ".cjs", ".py"];

/// Leading path-alias prefixes stripped from bare specifiers.
const ALIAS_PREFIXES: &[&str] = &["@/", "~/"];

/// Resolves import specifiers to repository files.
///
/// Built once from the complete file list and read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct ModuleResolver {
    files: HashSet<String>,
    /// (path without extension, full path) in insertion order, for suffix search
    bases: Vec<(String, String)>,
    base_lookup: HashMap<String, String>,
}

impl ModuleResolver {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolver = ModuleResolver::default();
        for path in paths {
            let path = normalize_separators(path.as_ref());
            let base = strip_extension(&path).to_string();
            if let Some(dir) = base.strip_suffix("/index") {
                resolver.register_base(dir.to_string(), path.clone());
            }
            resolver.register_base(base, path.clone());
            resolver.files.insert(path);
        }
        resolver
    }

    fn register_base(&mut self, base: String, full: String) {
        if self.base_lookup.insert(base.clone(), full.clone()).is_none() {
            self.bases.push((base, full));
        } else if let Some(entry) = self.bases.iter_mut().find(|(b, _)| *b == base) {
            // keep the original position, point it at the newer file
            entry.1 = full;
        }
    }

    /// Whether `path` is in the known file set.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Resolve `specifier`, written in `from_file`, to a known file path.
    pub fn resolve(&self, from_file: &str, specifier: &str) -> Option<String> {
        let spec = normalize_separators(specifier.trim());
        if spec.is_empty() {
            return None;
        }
        let from_file = normalize_separators(from_file);

        if spec.starts_with('.') {
            let base = join_normalized(parent_dir(&from_file), &spec);
            return self.try_resolve_base(&base);
        }

        // dotted module paths become slash paths, then resolve like bare specifiers
        let spec = if spec.contains('.') {
            spec.replace('.', "/")
        } else {
            spec
        };
        let bare = ALIAS_PREFIXES
            .iter()
            .find_map(|prefix| spec.strip_prefix(prefix))
            .unwrap_or(&spec);
        self.try_resolve_base(bare)
            .or_else(|| self.suffix_search(bare))
    }

    /// Exact path, then base plus extension, then `base/index` plus extension.
    pub fn try_resolve_base(&self, base: &str) -> Option<String> {
        if self.files.contains(base) {
            return Some(base.to_string());
        }
        MODULE_EXTENSIONS
            .iter()
            .map(|ext| format!("{base}{ext}"))
            .chain(MODULE_EXTENSIONS.iter().map(|ext| format!("{base}/index{ext}")))
            .find(|candidate| self.files.contains(candidate))
    }

    fn suffix_search(&self, bare: &str) -> Option<String> {
        let suffix = format!("/{bare}");
        self.bases
            .iter()
            .find(|(base, _)| base == bare || base.ends_with(&suffix))
            .map(|(_, full)| full.clone())
    }
}

/// Path without the extension of its last segment.
fn strip_extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => path,
        Some(dot) => &path[..path.len() - (name.len() - dot)],
    }
}

fn parent_dir(path: &str) -> &str {
    path.rfind('/').map_or("", |slash| &path[..slash])
}

/// Join `relative` onto `dir` and collapse `.` and `..` segments.
///
/// A `..` that climbs above the root is kept, so the result never matches a
/// repository file.
fn join_normalized(dir: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in dir.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_sibling_file() {
        let resolver = ModuleResolver::new(["a/b.ts", "a/x.ts"]);
        assert_eq!(resolver.resolve("a/b.ts", "./x").as_deref(), Some("a/x.ts"));
    }

    #[test]
    fn test_relative_directory_index() {
        let resolver = ModuleResolver::new(["a/b.js", "a/x/index.js"]);
        assert_eq!(resolver.resolve("a/b.js", "./x").as_deref(), Some("a/x/index.js"));
    }

    #[test]
    fn test_relative_parent_and_explicit_extension() {
        let resolver = ModuleResolver::new(["src/pages/home.jsx", "src/api.ts"]);
        assert_eq!(
            resolver.resolve("src/pages/home.jsx", "../api").as_deref(),
            Some("src/api.ts")
        );
        assert_eq!(
            resolver.resolve("src\\pages\\home.jsx", "..\\api.ts").as_deref(),
            Some("src/api.ts")
        );
    }

    #[test]
    fn test_relative_above_root_is_unresolved() {
        let resolver = ModuleResolver::new(["api.ts", "main.ts"]);
        assert_eq!(resolver.resolve("main.ts", "../api"), None);
    }

    #[test]
    fn test_bare_specifier_suffix_search() {
        let resolver = ModuleResolver::new(["src/utils/helpers.js", "src/index.js"]);
        assert_eq!(
            resolver.resolve("src/index.js", "utils/helpers").as_deref(),
            Some("src/utils/helpers.js")
        );
    }

    #[test]
    fn test_alias_prefix_is_stripped() {
        let resolver = ModuleResolver::new(["src/components/Button.tsx", "src/App.tsx"]);
        assert_eq!(
            resolver.resolve("src/App.tsx", "@/components/Button").as_deref(),
            Some("src/components/Button.tsx")
        );
    }

    #[test]
    fn test_python_dotted_module() {
        let resolver = ModuleResolver::new(["app/models/user.py", "app/main.py"]);
        assert_eq!(
            resolver.resolve("app/main.py", "app.models.user").as_deref(),
            Some("app/models/user.py")
        );
    }

    #[test]
    fn test_extensions_probe_in_order() {
        let resolver = ModuleResolver::new(["a/b.js", "a/x.js", "a/x.py"]);
        assert_eq!(resolver.try_resolve_base("a/x").as_deref(), Some("a/x.js"));
        assert_eq!(resolver.resolve("a/b.js", "./x").as_deref(), Some("a/x.js"));
    }

    #[test]
    fn test_file_wins_over_directory_index() {
        let resolver = ModuleResolver::new(["a/b.ts", "a/x/index.ts", "a/x.ts"]);
        assert_eq!(resolver.resolve("a/b.ts", "./x").as_deref(), Some("a/x.ts"));
    }

    #[test]
    fn test_python_dotted_module_under_subdirectory() {
        let resolver = ModuleResolver::new(["backend/app/main.py", "backend/app/models/user.py"]);
        assert_eq!(
            resolver.resolve("backend/app/main.py", "app.models.user").as_deref(),
            Some("backend/app/models/user.py")
        );
        assert_eq!(resolver.resolve("backend/app/main.py", "numpy.linalg"), None);
    }

    #[test]
    fn test_suffix_search_prefers_first_inserted() {
        let resolver = ModuleResolver::new(["lib/config.js", "src/config.ts", "main.js"]);
        assert_eq!(resolver.resolve("main.js", "config").as_deref(), Some("lib/config.js"));
    }

    #[test]
    fn test_unknown_package_is_unresolved() {
        let resolver = ModuleResolver::new(["src/index.js"]);
        assert_eq!(resolver.resolve("src/index.js", "react"), None);
        assert_eq!(resolver.resolve("src/index.js", "  "), None);
    }

    #[test]
    fn test_join_normalized() {
        assert_eq!(join_normalized("a/b", "./c"), "a/b/c");
        assert_eq!(join_normalized("a/b", "../../c"), "c");
        assert_eq!(join_normalized("", "../c"), "../c");
        assert_eq!(join_normalized("a", "."), "a");
    }
}
