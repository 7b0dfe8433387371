//! Read-only recipes for the generated class family of a view-backed entity.
//!
//! Each recipe is a pure function from file text to file text. It records one
//! step per mutation so callers can report what happened without parsing logs.

use crate::error::{AppError, AppResult};
use crate::patcher::files::{insert_once, insert_once_or_skip, Anchor, Placement};
use crate::patcher::imports::prune_unused_imports;
use crate::patcher::methods::{remove_method, MethodMatcher};
use crate::patcher::{EditOutcome, Patched};
use crate::usage::UsagePatternCache;
use regex::Regex;
use std::sync::OnceLock;

/// Import statement for the Hibernate immutability marker.
pub const HIBERNATE_IMMUTABLE_IMPORT: &str = "import org.hibernate.annotations.Immutable;";
/// Witness for the repository doc comment.
pub const READ_ONLY_REPOSITORY_MARKER: &str = "Read-only repository for database view";
/// Witness for the REST resource doc comment.
pub const READ_ONLY_RESOURCE_MARKER: &str = "Read-only REST controller for database view";
/// Witness for the service doc comment.
pub const READ_ONLY_SERVICE_MARKER: &str = "Read-only service for database view";
/// Witness for the integration test doc comment.
pub const VIEW_TEST_MARKER: &str =
    "This test class is disabled because the entity is a database view";

const JUNIT_DISABLED_IMPORT: &str = "import org.junit.jupiter.api.Disabled;";
const DISABLED_ANNOTATION: &str = "@Disabled(\"View entity tests are disabled - @Immutable entities cannot use saveAndFlush/delete operations\")";

/// Mapping annotations of mutating REST endpoints.
pub const MUTATING_MAPPINGS: &[&str] = &[
    "@PostMapping",
    "@PutMapping",
    "@PatchMapping",
    "@DeleteMapping",
];

/// Signatures of mutating service methods.
pub const MUTATING_SERVICE_SIGNATURES: &[&str] = &[
    r"public\s+\S+\s+save\s*\(",
    r"public\s+\S+\s+partialUpdate\s*\(",
    r"public\s+\S+\s+update\s*\(",
    r"public\s+void\s+delete\s*\(",
];

/// Imports that typically become dead once mutating endpoints are gone.
pub const RESOURCE_IMPORT_CANDIDATES: &[&str] = &[
    "import org.springframework.web.bind.annotation.PostMapping;",
    "import org.springframework.web.bind.annotation.PutMapping;",
    "import org.springframework.web.bind.annotation.PatchMapping;",
    "import org.springframework.web.bind.annotation.DeleteMapping;",
    "import org.springframework.web.bind.annotation.RequestBody;",
    "import org.springframework.web.bind.annotation.ResponseStatus;",
    "import org.springframework.http.HttpStatus;",
    "import jakarta.validation.Valid;",
    "import jakarta.validation.constraints.NotNull;",
    "import java.net.URI;",
    "import java.net.URISyntaxException;",
    "import java.util.Objects;",
    "import tech.jhipster.web.util.HeaderUtil;",
];

/// One mutation performed by a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeStep {
    /// Short description of the mutation.
    pub name: String,
    /// What it did.
    pub outcome: EditOutcome,
}

/// The rewritten text plus the outcome of every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeReport {
    /// Resulting source text.
    pub source: String,
    /// Steps in execution order.
    pub steps: Vec<RecipeStep>,
}

impl RecipeReport {
    fn start(source: &str) -> Self {
        Self {
            source: source.to_string(),
            steps: Vec::new(),
        }
    }

    fn record(&mut self, name: impl Into<String>, patched: Patched) {
        self.source = patched.source;
        self.steps.push(RecipeStep {
            name: name.into(),
            outcome: patched.outcome,
        });
    }

    fn note(&mut self, name: impl Into<String>, outcome: EditOutcome) {
        self.steps.push(RecipeStep {
            name: name.into(),
            outcome,
        });
    }

    /// Names of the steps that changed the text.
    pub fn applied(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.outcome.is_applied())
            .map(|s| s.name.as_str())
            .collect()
    }

    /// Steps that stopped early.
    pub fn failures(&self) -> impl Iterator<Item = &RecipeStep> {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, EditOutcome::Failed(_)))
    }
}

fn doc_comment(lines: &[String]) -> String {
    let mut block = String::from("/**\n");
    for line in lines {
        block.push_str(" * ");
        block.push_str(line);
        block.push('\n');
    }
    block.push_str(" */");
    block
}

/// Marks a JPA entity immutable.
///
/// The import goes before the first `org.hibernate.annotations` import, else
/// after the `jakarta.persistence.*` import. Having neither is an error: the
/// annotation without its import would not compile.
pub fn add_immutable_annotation(source: &str) -> AppResult<RecipeReport> {
    let mut report = RecipeReport::start(source);

    let import_anchors = [
        Anchor::before(r"(?m)^import org\.hibernate\.annotations\.[^;]+;")?,
        Anchor::after(r"(?m)^import jakarta\.persistence\.\*;")?,
    ];
    let patched = insert_once(
        &report.source,
        HIBERNATE_IMMUTABLE_IMPORT,
        &import_anchors,
        HIBERNATE_IMMUTABLE_IMPORT,
    )
    .map_err(|e| match e {
        AppError::NotFound(_) => {
            AppError::NotFound("Could not find suitable import location".to_string())
        }
        other => other,
    })?;
    report.record("@Immutable import", patched);

    let annotation_anchors = [Anchor::before(r"(?m)^[ \t]*@Entity\b")?];
    let patched = insert_once_or_skip(
        &report.source,
        "@Immutable",
        &annotation_anchors,
        "@Immutable",
    )?;
    report.record("@Immutable annotation", patched);

    Ok(report)
}

/// Documents a repository interface as read-only.
pub fn mark_repository_read_only(source: &str, table_name: &str) -> AppResult<RecipeReport> {
    let mut report = RecipeReport::start(source);
    let anchors = [Anchor::before(r"public interface \w+Repository")?];
    let doc = doc_comment(&[
        format!("{}: {}", READ_ONLY_REPOSITORY_MARKER, table_name),
        "This entity is mapped to a database view and should not be modified.".to_string(),
    ]);
    let patched = insert_once_or_skip(&report.source, READ_ONLY_REPOSITORY_MARKER, &anchors, &doc)?;
    report.record("read-only repository doc", patched);
    Ok(report)
}

/// Strips mutating endpoints from a REST resource, documents it and prunes dead imports.
pub fn make_resource_read_only(
    source: &str,
    table_name: &str,
    cache: &mut UsagePatternCache,
) -> AppResult<RecipeReport> {
    let mut report = RecipeReport::start(source);

    for annotation in MUTATING_MAPPINGS {
        let patched = remove_method(&report.source, &MethodMatcher::annotation(annotation));
        report.record(format!("remove {} methods", annotation), patched);
    }

    let anchors = [Anchor::before(r"@RestController\s*[\r\n]+\s*@RequestMapping")?];
    let doc = doc_comment(&[
        format!("{}: {}", READ_ONLY_RESOURCE_MARKER, table_name),
        "POST/PUT/PATCH/DELETE operations are not supported for views.".to_string(),
    ]);
    let patched = insert_once_or_skip(&report.source, READ_ONLY_RESOURCE_MARKER, &anchors, &doc)?;
    report.record("read-only resource doc", patched);

    let patched = prune_unused_imports(&report.source, RESOURCE_IMPORT_CANDIDATES, cache);
    report.record("prune unused imports", patched);

    Ok(report)
}

/// Strips mutating methods from a service class and documents it.
pub fn make_service_read_only(source: &str, table_name: &str) -> AppResult<RecipeReport> {
    let mut report = RecipeReport::start(source);

    for signature in MUTATING_SERVICE_SIGNATURES {
        let matcher = MethodMatcher::signature(signature)?;
        let patched = remove_method(&report.source, &matcher);
        report.record(format!("remove methods matching {}", matcher), patched);
    }

    let anchors = [Anchor::before(r"@Service\s*[\r\n]+\s*@Transactional")?];
    let doc = doc_comment(&[
        format!("{}: {}", READ_ONLY_SERVICE_MARKER, table_name),
        "Create/Update/Delete operations are not supported for views.".to_string(),
    ]);
    let patched = insert_once_or_skip(&report.source, READ_ONLY_SERVICE_MARKER, &anchors, &doc)?;
    report.record("read-only service doc", patched);

    Ok(report)
}

/// Disables a generated integration test class; views cannot be written through JPA.
pub fn disable_integration_test(source: &str) -> AppResult<RecipeReport> {
    static CLASS_DISABLED_RE: OnceLock<Regex> = OnceLock::new();
    static WILDCARD_RE: OnceLock<Regex> = OnceLock::new();

    let mut report = RecipeReport::start(source);

    // Import: before the explicit `Test` import, covered by a wildcard, else after `package`.
    let wildcard = WILDCARD_RE.get_or_init(|| {
        Regex::new(r"import org\.junit\.jupiter\.api\.\*;").expect("Invalid regex constant")
    });
    let explicit = Anchor::before(r"import org\.junit\.jupiter\.api\.Test;")?;
    if report.source.contains(JUNIT_DISABLED_IMPORT) {
        report.note("@Disabled import", EditOutcome::SkippedAlreadyPresent);
    } else if explicit.is_present(&report.source) {
        let patched = insert_once(
            &report.source,
            JUNIT_DISABLED_IMPORT,
            &[explicit],
            JUNIT_DISABLED_IMPORT,
        )?;
        report.record("@Disabled import", patched);
    } else if wildcard.is_match(&report.source) {
        tracing::debug!("Wildcard import already provides @Disabled");
        report.note("@Disabled import", EditOutcome::SkippedAlreadyPresent);
    } else {
        let anchors = [Anchor::after(r"(?m)^package\s+[^;]+;")?];
        let insertion = format!("\n{}", JUNIT_DISABLED_IMPORT);
        let patched =
            insert_once_or_skip(&report.source, JUNIT_DISABLED_IMPORT, &anchors, &insertion)?;
        if patched.outcome.is_applied() {
            tracing::warn!("Added @Disabled import after package statement");
        }
        report.record("@Disabled import (after package)", patched);
    }

    // Class-level annotation, unless some @Disabled already sits on its own line.
    let class_disabled = CLASS_DISABLED_RE.get_or_init(|| {
        Regex::new(r"@Disabled\s*(?:\([^)]*\))?\s*[\r\n]").expect("Invalid regex constant")
    });
    if class_disabled.is_match(&report.source) {
        report.note("@Disabled annotation", EditOutcome::SkippedAlreadyPresent);
    } else {
        let anchors = [Anchor::after(r"@IntegrationTest\s*[\r\n]+")?];
        let patched = insert_once_or_skip(
            &report.source,
            DISABLED_ANNOTATION,
            &anchors,
            DISABLED_ANNOTATION,
        )?;
        report.record("@Disabled annotation", patched);
    }

    // Explain why, at the top of the class doc comment.
    let anchors = [Anchor::new(
        r"(?i)/\*\*\s*[\r\n]+\s*\*\s*Integration tests? for",
        Placement::AfterStartLine,
    )?];
    let explanation = [
        format!(" * {}.", VIEW_TEST_MARKER),
        " * @Immutable entities cannot be persisted or deleted via JPA repository.".to_string(),
        " * To test view queries, use native SQL to populate the underlying table.".to_string(),
        " *".to_string(),
    ]
    .join("\n");
    let patched = insert_once_or_skip(&report.source, VIEW_TEST_MARKER, &anchors, &explanation)?;
    if patched.outcome == EditOutcome::SkippedNoAnchor {
        tracing::warn!("Could not find standard Javadoc pattern");
    }
    report.record("view test Javadoc", patched);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ENTITY: &str = "package com.example.app.domain;\n\nimport jakarta.persistence.*;\nimport java.io.Serializable;\n\n/**\n * A Foo.\n */\n@Entity\n@Table(name = \"foo\")\npublic class Foo implements Serializable {\n}\n";

    #[test]
    fn test_add_immutable_with_jakarta_fallback() {
        let res = add_immutable_annotation(ENTITY).unwrap();
        assert_eq!(
            res.source,
            "package com.example.app.domain;\n\nimport jakarta.persistence.*;\nimport org.hibernate.annotations.Immutable;\nimport java.io.Serializable;\n\n/**\n * A Foo.\n */\n@Immutable\n@Entity\n@Table(name = \"foo\")\npublic class Foo implements Serializable {\n}\n"
        );
        assert_eq!(res.applied(), vec!["@Immutable import", "@Immutable annotation"]);

        let again = add_immutable_annotation(&res.source).unwrap();
        assert_eq!(again.source, res.source);
        assert!(again.applied().is_empty());
    }

    #[test]
    fn test_add_immutable_prefers_hibernate_imports() {
        let src = "import jakarta.persistence.*;\nimport org.hibernate.annotations.Cache;\n@Entity\nclass Foo {}\n";
        let res = add_immutable_annotation(src).unwrap();
        assert!(res.source.contains(
            "import org.hibernate.annotations.Immutable;\nimport org.hibernate.annotations.Cache;"
        ));
    }

    #[test]
    fn test_add_immutable_without_import_location_fails() {
        let src = "package a;\n@Entity\nclass Foo {}\n";
        let err = add_immutable_annotation(src).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_repository_doc_is_idempotent() {
        let src = "@Repository\npublic interface FooRepository extends JpaRepository<Foo, Long> {}\n";
        let once = mark_repository_read_only(src, "v_foo").unwrap();
        assert!(once
            .source
            .starts_with("@Repository\n/**\n * Read-only repository for database view: v_foo\n"));
        let twice = mark_repository_read_only(&once.source, "v_foo").unwrap();
        assert_eq!(twice.source, once.source);
        assert_eq!(twice.steps[0].outcome, EditOutcome::SkippedAlreadyPresent);
    }

    #[test]
    fn test_service_read_only() {
        let src = "@Service\n@Transactional\npublic class FooService {\n\n    public Foo save(Foo foo) {\n        return repo.save(foo);\n    }\n\n    public Optional<Foo> partialUpdate(Foo foo) {\n        return repo.findById(foo.getId()).map(existing -> {\n            return existing;\n        });\n    }\n\n    @Transactional(readOnly = true)\n    public List<Foo> findAll() {\n        return repo.findAll();\n    }\n\n    public void delete(Long id) {\n        repo.deleteById(id);\n    }\n}\n";
        let res = make_service_read_only(src, "v_foo").unwrap();
        assert_eq!(
            res.source,
            "/**\n * Read-only service for database view: v_foo\n * Create/Update/Delete operations are not supported for views.\n */\n@Service\n@Transactional\npublic class FooService {\n\n\n\n    @Transactional(readOnly = true)\n    public List<Foo> findAll() {\n        return repo.findAll();\n    }\n\n}\n"
        );
    }

    #[test]
    fn test_disable_integration_test() {
        let src = "package com.example.app.web.rest;\n\nimport org.junit.jupiter.api.Test;\n\n/**\n * Integration tests for the {@link FooResource} REST controller.\n */\n@IntegrationTest\n@AutoConfigureMockMvc\nclass FooResourceIT {\n}\n";
        let res = disable_integration_test(src).unwrap();
        assert_eq!(
            res.source,
            "package com.example.app.web.rest;\n\nimport org.junit.jupiter.api.Disabled;\nimport org.junit.jupiter.api.Test;\n\n/**\n * This test class is disabled because the entity is a database view.\n * @Immutable entities cannot be persisted or deleted via JPA repository.\n * To test view queries, use native SQL to populate the underlying table.\n *\n * Integration tests for the {@link FooResource} REST controller.\n */\n@IntegrationTest\n@Disabled(\"View entity tests are disabled - @Immutable entities cannot use saveAndFlush/delete operations\")\n@AutoConfigureMockMvc\nclass FooResourceIT {\n}\n"
        );

        let again = disable_integration_test(&res.source).unwrap();
        assert_eq!(again.source, res.source);
        assert!(again.applied().is_empty());
    }

    #[test]
    fn test_disable_integration_test_wildcard_and_package_fallback() {
        let wildcard = "import org.junit.jupiter.api.*;\n@IntegrationTest\nclass FooIT {}\n";
        let res = disable_integration_test(wildcard).unwrap();
        assert!(!res.source.contains(JUNIT_DISABLED_IMPORT));
        assert!(res.source.contains("@IntegrationTest\n@Disabled("));

        let bare = "package a;\nimport b.C;\n@IntegrationTest\nclass FooIT {}\n";
        let res = disable_integration_test(bare).unwrap();
        assert!(res
            .source
            .starts_with("package a;\n\nimport org.junit.jupiter.api.Disabled;\nimport b.C;\n"));
    }
}
