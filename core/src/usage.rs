#![deny(missing_docs)]

//! # Import Usage Analysis
//!
//! Decides whether a simple class name is still referenced in a Java source
//! once its import line is gone. The check is purely syntactic: nine patterns,
//! one per role a type name can play.

use regex::Regex;
use std::collections::HashMap;

/// The compiled usage patterns for one class name.
#[derive(Debug, Clone)]
pub struct UsagePatterns {
    class_name: String,
    patterns: Vec<Regex>,
}

impl UsagePatterns {
    /// Compiles the patterns for `class_name`.
    pub fn new(class_name: &str) -> Self {
        let n = regex::escape(class_name);
        let sources = [
            // Annotation
            format!(r"@{n}\b"),
            // Static member access
            format!(r"\b{n}\."),
            // Constructor call
            format!(r"\bnew\s+{n}\b"),
            // Type declaration, optionally parameterized (`List<Foo> all`)
            format!(r"\b{n}(?:<[^;(){{}}]*>)?\s+\w+"),
            // Generic argument
            format!(r"<{n}[>,]"),
            // Parameter type
            format!(r"\({n}\b"),
            // Checked exception
            format!(r"throws\s+.*\b{n}\b"),
            // Superclass
            format!(r"extends\s+{n}\b"),
            // Implemented interface
            format!(r"implements\s+.*\b{n}\b"),
        ];
        let patterns = sources
            .iter()
            .map(|p| Regex::new(p).expect("escaped class name yields a valid pattern"))
            .collect();

        Self {
            class_name: class_name.to_string(),
            patterns,
        }
    }

    /// The class name these patterns test for.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// True when any pattern matches `source`.
    pub fn is_used_in(&self, source: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(source))
    }
}

/// Memoizes [`UsagePatterns`] per class name.
///
/// Valid for one generation run. Entries are never evicted: class names are
/// stable identifiers for the lifetime of a run.
#[derive(Debug, Default)]
pub struct UsagePatternCache {
    entries: HashMap<String, UsagePatterns>,
}

impl UsagePatternCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the patterns for `class_name`, compiling them on first use.
    pub fn patterns(&mut self, class_name: &str) -> &UsagePatterns {
        self.entries
            .entry(class_name.to_string())
            .or_insert_with(|| UsagePatterns::new(class_name))
    }

    /// Number of class names compiled so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_role_is_detected() {
        let p = UsagePatterns::new("Valid");
        assert!(p.is_used_in("void f(@Valid @RequestBody Foo foo)"));

        let p = UsagePatterns::new("HeaderUtil");
        assert!(p.is_used_in(".headers(HeaderUtil.createAlert(x))"));

        let p = UsagePatterns::new("URI");
        assert!(p.is_used_in("return created(new URI(\"/api\"));"));

        let p = UsagePatterns::new("Objects");
        assert!(p.is_used_in("    Objects check = null;"));

        let p = UsagePatterns::new("List");
        assert!(p.is_used_in("    public List<FooDTO> getAllFoos() {"));
        assert!(p.is_used_in("ResponseEntity<List<FooDTO>> getAll()"));

        let p = UsagePatterns::new("Foo");
        assert!(p.is_used_in("List<Foo> all;"));
        assert!(p.is_used_in("Map<Foo, Bar> m;"));
        assert!(p.is_used_in("void g(Foo)"));
        assert!(p.is_used_in("class A extends Foo {"));
        assert!(p.is_used_in("class A implements Serializable, Foo {"));

        let p = UsagePatterns::new("URISyntaxException");
        assert!(p.is_used_in("void h() throws IOException, URISyntaxException {"));
    }

    #[test]
    fn test_unrelated_names_do_not_match() {
        let p = UsagePatterns::new("Valid");
        assert!(!p.is_used_in("boolean isValidated = true;"));
        assert!(!p.is_used_in("// nothing here"));

        let p = UsagePatterns::new("URI");
        assert!(!p.is_used_in("String URIs;"));
    }

    #[test]
    fn test_cache_reuses_entries() {
        let mut cache = UsagePatternCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.patterns("List").class_name(), "List");
        cache.patterns("List");
        cache.patterns("URI");
        assert_eq!(cache.len(), 2);
    }
}
