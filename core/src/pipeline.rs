#![deny(missing_docs)]

//! # Pipeline
//!
//! Applies every post-generation step to every entity of a project:
//!
//! 1. **View entities**: read-only recipes on the generated class family,
//!    a `createView` changelog registered in the master changelog, and
//!    removal of the table-definition changelogs and fake data.
//! 2. **MyBatis entities**: model and mapper sources, then one
//!    `application.yml` block for the whole run.
//!
//! Nothing here aborts the batch. Every outcome becomes a [`Diagnostic`] in
//! the returned [`RunReport`] and is mirrored as a `tracing` event.

use crate::changelog::{
    existing_view_changelog_timestamp, is_table_changelog, render_view_changelog,
    view_changelog_file_name, CHANGELOG_DIR, FAKE_DATA_DIR, MASTER_CHANGELOG,
};
use crate::entity::{EntityRecord, MapperKind};
use crate::error::{AppError, AppResult};
use crate::manifest::{
    changelog_include, remove_table_includes, splice_fragment, splice_yaml_block,
    TimestampGenerator, MASTER_CHANGELOG_ANCHOR,
};
use crate::mybatis::{application_yaml_block, render_mapper, render_model, MyBatisConfig};
use crate::patcher::workflows::RecipeStep;
use crate::patcher::{
    add_immutable_annotation, disable_integration_test, make_resource_read_only,
    make_service_read_only, mark_repository_read_only, EditOutcome, RecipeReport,
};
use crate::store::{edit_file, Edited, FileStore};
use crate::usage::UsagePatternCache;
use derive_more::Display;
use std::path::{Path, PathBuf};

/// Where generated sources live inside a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Base Java package.
    pub package_name: String,
    /// Main Java source root.
    pub main_java: String,
    /// Test Java source root.
    pub test_java: String,
    /// Main resources root.
    pub main_resources: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            package_name: "com.example.app".into(),
            main_java: "src/main/java/".into(),
            test_java: "src/test/java/".into(),
            main_resources: "src/main/resources/".into(),
        }
    }
}

impl ProjectLayout {
    /// Layout with the default roots and the given package.
    pub fn with_package(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    fn package_dir(&self) -> PathBuf {
        Path::new(&self.main_java).join(self.package_name.replace('.', "/"))
    }

    /// `domain/<Class>.java`
    pub fn entity_file(&self, class: &str) -> PathBuf {
        self.package_dir().join("domain").join(format!("{}.java", class))
    }

    /// `repository/<Class>Repository.java`
    pub fn repository_file(&self, class: &str) -> PathBuf {
        self.package_dir()
            .join("repository")
            .join(format!("{}Repository.java", class))
    }

    /// `web/rest/<Class>Resource.java`
    pub fn resource_file(&self, class: &str) -> PathBuf {
        self.package_dir()
            .join("web/rest")
            .join(format!("{}Resource.java", class))
    }

    /// `service/<Class>Service.java`
    pub fn service_file(&self, class: &str) -> PathBuf {
        self.package_dir()
            .join("service")
            .join(format!("{}Service.java", class))
    }

    /// `web/rest/<Class>ResourceIT.java` under the test root.
    pub fn integration_test_file(&self, class: &str) -> PathBuf {
        Path::new(&self.test_java)
            .join(self.package_name.replace('.', "/"))
            .join("web/rest")
            .join(format!("{}ResourceIT.java", class))
    }

    /// Generated MyBatis source, `relative` to the package directory.
    pub fn package_file(&self, relative: &str) -> PathBuf {
        self.package_dir().join(relative)
    }

    /// A path under the resources root.
    pub fn resource(&self, relative: &str) -> PathBuf {
        Path::new(&self.main_resources).join(relative)
    }
}

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Level {
    /// Something happened.
    #[display("info")]
    Info,
    /// A step was skipped or degraded.
    #[display("warn")]
    Warn,
    /// A step failed.
    #[display("error")]
    Error,
}

/// One recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub level: Level,
    /// Entity the outcome belongs to (`*` for run-wide steps).
    pub entity: String,
    /// File involved, relative to the project root.
    pub file: Option<PathBuf>,
    /// Human readable description.
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: ", self.level, self.entity)?;
        if let Some(file) = &self.file {
            write!(f, "{}: ", file.display())?;
        }
        write!(f, "{}", self.message)
    }
}

/// Everything a run did.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Diagnostics in the order they were produced.
    pub diagnostics: Vec<Diagnostic>,
}

impl RunReport {
    /// True when any error was recorded.
    pub fn has_errors(&self) -> bool {
        self.count(Level::Error) > 0
    }

    /// Number of diagnostics at `level`.
    pub fn count(&self, level: Level) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    /// Diagnostics of one entity.
    pub fn for_entity<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.entity == entity)
    }
}

const RUN_SCOPE: &str = "*";

enum Step {
    Done,
    Missing,
    Failed,
}

/// Runs every step over a set of entities against one project.
pub struct Pipeline<'a, S: FileStore + ?Sized> {
    store: &'a S,
    layout: ProjectLayout,
    cache: UsagePatternCache,
    timestamps: TimestampGenerator,
    mybatis: Option<MyBatisConfig>,
    report: RunReport,
}

impl<'a, S: FileStore + ?Sized> Pipeline<'a, S> {
    /// Creates a pipeline over `store`.
    pub fn new(store: &'a S, layout: ProjectLayout) -> Self {
        Self {
            store,
            layout,
            cache: UsagePatternCache::new(),
            timestamps: TimestampGenerator::new(),
            mybatis: None,
            report: RunReport::default(),
        }
    }

    /// Uses `config` instead of reading `.yo-rc.json`.
    pub fn with_mybatis_config(mut self, config: MyBatisConfig) -> Self {
        self.mybatis = Some(config);
        self
    }

    /// Processes `entities` and returns what happened.
    pub fn run(mut self, entities: &[EntityRecord]) -> RunReport {
        tracing::info!("Processing {} entities", entities.len());

        for entity in entities.iter().filter(|e| e.is_view) {
            self.process_view(entity);
        }

        let mapper_entities: Vec<&EntityRecord> = entities
            .iter()
            .filter(|e| e.mapper != MapperKind::None)
            .collect();
        if !mapper_entities.is_empty() {
            self.note(
                Level::Info,
                RUN_SCOPE,
                None,
                format!("Generating MyBatis files for {} entities", mapper_entities.len()),
            );
            let config = self.mybatis_config();
            for entity in &mapper_entities {
                self.generate_mapper(entity, &config);
            }
            self.append_mybatis_yaml(&config);
        }

        tracing::debug!("Usage pattern cache holds {} class names", self.cache.len());
        self.report
    }

    fn note(&mut self, level: Level, entity: &str, file: Option<&Path>, message: impl Into<String>) {
        let message = message.into();
        let file_display = file.map(|f| f.display().to_string()).unwrap_or_default();
        match level {
            Level::Info => tracing::info!(entity, file = %file_display, "{}", message),
            Level::Warn => tracing::warn!(entity, file = %file_display, "{}", message),
            Level::Error => tracing::error!(entity, file = %file_display, "{}", message),
        }
        self.report.diagnostics.push(Diagnostic {
            level,
            entity: entity.to_string(),
            file: file.map(Path::to_path_buf),
            message,
        });
    }

    fn process_view(&mut self, entity: &EntityRecord) {
        let name = entity.name.as_str();
        let class = entity.class_name();
        let table = entity.table();
        self.note(
            Level::Info,
            name,
            None,
            format!("Making {} read-only (view {})", class, table),
        );

        // A rejected SQL path stops the entity before any file is touched.
        let query = match self.resolve_query(entity) {
            Ok(query) => query,
            Err(e) => {
                self.note(Level::Error, name, None, e.to_string());
                return;
            }
        };

        // The entity class is required; without it the family is left alone.
        let entity_file = self.layout.entity_file(class);
        let java_ok = match self.apply_recipe(name, &entity_file, true, |src, _| {
            add_immutable_annotation(src)
        }) {
            Step::Done => true,
            Step::Missing | Step::Failed => false,
        };

        if java_ok {
            let repository = self.layout.repository_file(class);
            self.apply_recipe(name, &repository, false, |src, _| {
                mark_repository_read_only(src, &table)
            });
            let resource = self.layout.resource_file(class);
            self.apply_recipe(name, &resource, false, |src, cache| {
                make_resource_read_only(src, &table, cache)
            });
            let service = self.layout.service_file(class);
            self.apply_recipe(name, &service, false, |src, _| {
                make_service_read_only(src, &table)
            });
            let test = self.layout.integration_test_file(class);
            self.apply_recipe(name, &test, false, |src, _| disable_integration_test(src));
        }

        match query {
            Some(query) => self.write_view_changelog(entity, &table, &query),
            None => self.note(
                Level::Warn,
                name,
                None,
                "No SQL found for view; skipping changelog generation",
            ),
        }
        self.remove_table_definitions(entity, &table);
    }

    fn resolve_query(&mut self, entity: &EntityRecord) -> AppResult<Option<String>> {
        if entity
            .view_sql
            .as_deref()
            .is_some_and(|sql| sql.trim().is_empty())
        {
            self.note(Level::Warn, &entity.name, None, "Inline SQL is empty");
        }
        entity.view_definition().query(self.store)
    }

    /// Runs one recipe as a read-transform-write cycle and records its outcome.
    fn apply_recipe<F>(&mut self, entity: &str, path: &Path, required: bool, recipe: F) -> Step
    where
        F: FnOnce(&str, &mut UsagePatternCache) -> AppResult<RecipeReport>,
    {
        if !self.store.exists(path) {
            if required {
                self.note(Level::Warn, entity, Some(path), "File not found; skipped");
            } else {
                tracing::debug!(entity, file = %path.display(), "Optional file not found");
                self.note(Level::Info, entity, Some(path), "File not found; skipped");
            }
            return Step::Missing;
        }

        let cache = &mut self.cache;
        let result = edit_file(self.store, path, |text| {
            let RecipeReport { source, steps } = recipe(text, cache)?;
            Ok((source, steps))
        });

        match result {
            Ok(edited) => {
                self.record_steps(entity, path, &edited.detail);
                if !edited.changed {
                    self.note(Level::Info, entity, Some(path), "Already up to date");
                }
                Step::Done
            }
            Err(AppError::NotFound(reason)) => {
                self.note(Level::Warn, entity, Some(path), reason);
                Step::Done
            }
            Err(e) => {
                self.note(Level::Error, entity, Some(path), e.to_string());
                Step::Failed
            }
        }
    }

    fn record_steps(&mut self, entity: &str, path: &Path, steps: &[RecipeStep]) {
        for step in steps {
            match &step.outcome {
                EditOutcome::Applied => {
                    self.note(Level::Info, entity, Some(path), format!("{}: applied", step.name))
                }
                EditOutcome::Failed(reason) => self.note(
                    Level::Warn,
                    entity,
                    Some(path),
                    format!("{}: {}", step.name, reason),
                ),
                other => {
                    tracing::debug!(entity, file = %path.display(), "{}: {}", step.name, other)
                }
            }
        }
    }

    fn write_view_changelog(&mut self, entity: &EntityRecord, table: &str, query: &str) {
        let name = entity.name.as_str();
        let changelog_dir = self.layout.resource(CHANGELOG_DIR);
        let existing = if self.store.exists(&changelog_dir) {
            match self.store.list_dir(&changelog_dir) {
                Ok(files) => files,
                Err(e) => {
                    self.note(
                        Level::Warn,
                        name,
                        Some(&changelog_dir),
                        format!("Failed to list changelogs: {}. Skipping view changelog.", e),
                    );
                    return;
                }
            }
        } else {
            Vec::new()
        };
        let timestamp = match existing_view_changelog_timestamp(&existing, table) {
            Some(stamp) => stamp.to_string(),
            None => self.timestamps.next_timestamp(),
        };

        let file_name = view_changelog_file_name(&timestamp, table);
        let path = changelog_dir.join(&file_name);
        let content = render_view_changelog(entity.class_name(), table, query, &timestamp);
        if let Err(e) = self.store.write(&path, &content) {
            self.note(Level::Error, name, Some(&path), e.to_string());
            return;
        }
        self.note(Level::Info, name, Some(&path), "Generated view changelog");

        let master = self.layout.resource(MASTER_CHANGELOG);
        if !self.store.exists(&master) {
            self.note(
                Level::Warn,
                name,
                Some(&master),
                "Master changelog not found; add the view changelog manually",
            );
            return;
        }
        let fragment = changelog_include(&file_name);
        let result = edit_file(self.store, &master, |text| {
            let spliced = splice_fragment(text, &fragment, &[MASTER_CHANGELOG_ANCHOR]);
            Ok((spliced.patched.source, spliced.patched.outcome))
        });
        self.record_edit(name, &master, "register view changelog", result);
    }

    fn remove_table_definitions(&mut self, entity: &EntityRecord, table: &str) {
        let name = entity.name.as_str();
        let class = entity.class_name();

        let master = self.layout.resource(MASTER_CHANGELOG);
        if self.store.exists(&master) {
            let result = edit_file(self.store, &master, |text| {
                let patched = remove_table_includes(text, class);
                Ok((patched.source, patched.outcome))
            });
            self.record_edit(name, &master, "remove table changelog includes", result);
        }

        let changelog_dir = self.layout.resource(CHANGELOG_DIR);
        if self.store.exists(&changelog_dir) {
            match self.store.list_dir(&changelog_dir) {
                Ok(files) => {
                    for file in files.iter().filter(|f| is_table_changelog(f, class)) {
                        self.delete(name, &changelog_dir.join(file));
                    }
                }
                Err(e) => self.note(Level::Warn, name, Some(&changelog_dir), e.to_string()),
            }
        }

        let fake_data = self
            .layout
            .resource(FAKE_DATA_DIR)
            .join(format!("{}.csv", table));
        if self.store.exists(&fake_data) {
            self.delete(name, &fake_data);
        }
    }

    fn delete(&mut self, entity: &str, path: &Path) {
        match self.store.delete(path) {
            Ok(()) => self.note(Level::Info, entity, Some(path), "Deleted"),
            Err(e) => self.note(
                Level::Warn,
                entity,
                Some(path),
                format!("Failed to delete: {}", e),
            ),
        }
    }

    fn record_edit(
        &mut self,
        entity: &str,
        path: &Path,
        step: &str,
        result: AppResult<Edited<EditOutcome>>,
    ) {
        match result {
            Ok(edited) if edited.detail.is_applied() => {
                self.note(Level::Info, entity, Some(path), format!("{}: applied", step))
            }
            Ok(edited) => {
                tracing::debug!(entity, file = %path.display(), "{}: {}", step, edited.detail)
            }
            Err(e) => self.note(Level::Error, entity, Some(path), e.to_string()),
        }
    }

    fn mybatis_config(&mut self) -> MyBatisConfig {
        if let Some(config) = &self.mybatis {
            return config.clone();
        }
        let yo_rc = Path::new(".yo-rc.json");
        let config = if self.store.exists(yo_rc) {
            match self
                .store
                .read(yo_rc)
                .and_then(|text| MyBatisConfig::from_yo_rc(&text))
            {
                Ok(config) => config,
                Err(e) => {
                    self.note(
                        Level::Warn,
                        RUN_SCOPE,
                        Some(yo_rc),
                        format!("Failed to load MyBatis config: {}. Using defaults.", e),
                    );
                    MyBatisConfig::default()
                }
            }
        } else {
            MyBatisConfig::default()
        };
        self.mybatis = Some(config.clone());
        config
    }

    fn generate_mapper(&mut self, entity: &EntityRecord, config: &MyBatisConfig) {
        let name = entity.name.as_str();
        let package = self.layout.package_name.clone();

        // Views never get a mutating mapper, whatever the record says.
        let kind = if entity.is_view {
            MapperKind::ReadOnly
        } else {
            entity.mapper
        };
        let model = render_model(entity, config, &package);
        let mapper = render_mapper(entity, kind, config, &package);
        let label = match kind {
            MapperKind::Crud => "CRUD mapper",
            _ => "read-only mapper",
        };

        for (label, source) in [("model", model), (label, mapper)] {
            let path = self.layout.package_file(&source.relative_path);
            match self.store.write(&path, &source.content) {
                Ok(()) => self.note(
                    Level::Info,
                    name,
                    Some(&path),
                    format!("Generated MyBatis {}", label),
                ),
                Err(e) => self.note(Level::Error, name, Some(&path), e.to_string()),
            }
        }
    }

    fn append_mybatis_yaml(&mut self, config: &MyBatisConfig) {
        let path = self.layout.resource("config/application.yml");
        if !self.store.exists(&path) {
            self.note(
                Level::Warn,
                RUN_SCOPE,
                Some(&path),
                "application.yml not found; skipping MyBatis configuration",
            );
            return;
        }
        let block = application_yaml_block(config, &self.layout.package_name);
        let result = edit_file(self.store, &path, |text| {
            let spliced = splice_yaml_block(text, "mybatis", &block);
            Ok((spliced.patched.source, spliced.patched.outcome))
        });
        self.record_edit(RUN_SCOPE, &path, "append MyBatis configuration", result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::FieldRecord;
    use crate::store::ProjectFs;
    use std::fs;
    use tempfile::tempdir;

    const REPOSITORY: &str =
        "@Repository\npublic interface GhostRepository extends JpaRepository<Ghost, Long> {}\n";

    fn ghost(view_sql: Option<&str>, view_sql_file: Option<&str>) -> EntityRecord {
        EntityRecord {
            name: "Ghost".into(),
            is_view: true,
            view_sql: view_sql.map(String::from),
            view_sql_file: view_sql_file.map(String::from),
            ..Default::default()
        }
    }

    /// Delegates to the filesystem but can never list a directory.
    struct UnlistableFs(ProjectFs);

    impl FileStore for UnlistableFs {
        fn root(&self) -> &Path {
            self.0.root()
        }
        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }
        fn read(&self, path: &Path) -> AppResult<String> {
            self.0.read(path)
        }
        fn write(&self, path: &Path, content: &str) -> AppResult<()> {
            self.0.write(path, content)
        }
        fn delete(&self, path: &Path) -> AppResult<()> {
            self.0.delete(path)
        }
        fn list_dir(&self, _path: &Path) -> AppResult<Vec<String>> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
        }
    }

    #[test]
    fn test_layout_paths() {
        let layout = ProjectLayout::with_package("org.shop");
        assert_eq!(
            layout.entity_file("Order"),
            PathBuf::from("src/main/java/org/shop/domain/Order.java")
        );
        assert_eq!(
            layout.integration_test_file("Order"),
            PathBuf::from("src/test/java/org/shop/web/rest/OrderResourceIT.java")
        );
        assert_eq!(
            layout.resource(MASTER_CHANGELOG),
            PathBuf::from("src/main/resources/config/liquibase/master.xml")
        );
    }

    #[test]
    fn test_missing_files_never_abort() {
        let dir = tempdir().unwrap();
        let store = ProjectFs::new(dir.path());
        let entities = vec![
            EntityRecord {
                name: "Ghost".into(),
                is_view: true,
                view_sql_file: Some("../outside.sql".into()),
                ..Default::default()
            },
            EntityRecord {
                name: "Book".into(),
                fields: vec![FieldRecord::new("title", "String")],
                mapper: MapperKind::Crud,
                ..Default::default()
            },
        ];

        let report = Pipeline::new(&store, ProjectLayout::default()).run(&entities);

        let ghost: Vec<_> = report.for_entity("Ghost").collect();
        assert!(ghost
            .iter()
            .any(|d| d.level == Level::Error && d.message.contains("path traversal")));
        assert!(store.exists(Path::new(
            "src/main/java/com/example/app/mybatis/mapper/BookModelMapper.java"
        )));
        assert!(report
            .for_entity(RUN_SCOPE)
            .any(|d| d.level == Level::Warn && d.message.contains("application.yml")));
        assert!(report.has_errors());
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic {
            level: Level::Warn,
            entity: "Foo".into(),
            file: Some(PathBuf::from("a/B.java")),
            message: "File not found; skipped".into(),
        };
        assert_eq!(d.to_string(), "[warn] Foo: a/B.java: File not found; skipped");
    }

    #[test]
    fn test_rejected_sql_path_leaves_project_untouched() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("secrets.sql"), "SELECT secret").unwrap();
        let store = ProjectFs::new(dir.path().join("app"));
        let layout = ProjectLayout::default();

        let master = layout.resource(MASTER_CHANGELOG);
        let master_text = "<databaseChangeLog>\n    <include file=\"config/liquibase/changelog/20240101000000_added_entity_Ghost.xml\" relativeToChangelogFile=\"false\"/>\n</databaseChangeLog>\n";
        let table_changelog = layout
            .resource(CHANGELOG_DIR)
            .join("20240101000000_added_entity_Ghost.xml");
        let fake_data = layout.resource(FAKE_DATA_DIR).join("ghost.csv");
        let entity_file = layout.entity_file("Ghost");
        let repository = layout.repository_file("Ghost");
        let files = [
            (master, master_text),
            (table_changelog, "<databaseChangeLog/>\n"),
            (fake_data, "id\n1\n"),
            (entity_file, "import jakarta.persistence.*;\n\n@Entity\npublic class Ghost {}\n"),
            (repository, REPOSITORY),
        ];
        for (path, content) in &files {
            store.write(path, content).unwrap();
        }

        let report = Pipeline::new(&store, layout.clone()).run(&[ghost(None, Some("../secrets.sql"))]);

        assert!(report
            .for_entity("Ghost")
            .any(|d| d.level == Level::Error && d.message.contains("path traversal")));
        for (path, content) in &files {
            assert_eq!(store.read(path).unwrap(), *content, "{} changed", path.display());
        }
        let changelogs = store.list_dir(&layout.resource(CHANGELOG_DIR)).unwrap();
        assert_eq!(changelogs, vec!["20240101000000_added_entity_Ghost.xml".to_string()]);
    }

    #[test]
    fn test_missing_entity_file_skips_class_family() {
        let dir = tempdir().unwrap();
        let store = ProjectFs::new(dir.path());
        let layout = ProjectLayout::default();
        let repository = layout.repository_file("Ghost");
        store.write(&repository, REPOSITORY).unwrap();

        let report = Pipeline::new(&store, layout.clone()).run(&[ghost(Some("SELECT 1"), None)]);

        assert_eq!(store.read(&repository).unwrap(), REPOSITORY);
        assert!(report.for_entity("Ghost").any(|d| d.level == Level::Warn
            && d.file.as_deref() == Some(layout.entity_file("Ghost").as_path())));
        assert!(!report
            .for_entity("Ghost")
            .any(|d| d.file.as_deref() == Some(repository.as_path())));
        // Changelog work does not depend on the Java sources.
        let changelogs = store.list_dir(&layout.resource(CHANGELOG_DIR)).unwrap();
        assert_eq!(changelogs.len(), 1);
        assert!(changelogs[0].ends_with("_create_view_ghost.xml"));
    }

    #[test]
    fn test_unlistable_changelog_dir_skips_view_changelog() {
        let dir = tempdir().unwrap();
        let layout = ProjectLayout::default();
        let changelog_dir = dir.path().join(layout.resource(CHANGELOG_DIR));
        fs::create_dir_all(&changelog_dir).unwrap();
        let store = UnlistableFs(ProjectFs::new(dir.path()));

        let report = Pipeline::new(&store, layout).run(&[ghost(Some("SELECT 1"), None)]);

        assert!(report.for_entity("Ghost").any(|d| d.level == Level::Warn
            && d.message.starts_with("Failed to list changelogs")));
        assert_eq!(fs::read_dir(&changelog_dir).unwrap().count(), 0);
    }
}
