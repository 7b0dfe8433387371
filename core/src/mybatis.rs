#![deny(missing_docs)]

//! # MyBatis Generation
//!
//! Renders a Lombok model class and an annotation-based mapper interface for
//! entities flagged for MyBatis. View entities get a query-only mapper.
//!
//! Generated files are written whole, so they always use `\n` line endings.

use crate::entity::{EntityRecord, FieldRecord, MapperKind};
use crate::error::AppResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Blueprint key in `.yo-rc.json`.
pub const YO_RC_BLUEPRINT_KEY: &str = "generator-jhipster-view-blueprint";

/// Naming and packaging of generated MyBatis sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MyBatisConfig {
    /// Suffix of model classes.
    pub model_suffix: String,
    /// Suffix of mapper interfaces.
    pub mapper_suffix: String,
    /// Model sub-package, relative to the application package.
    pub model_package: String,
    /// Mapper sub-package, relative to the application package.
    pub mapper_package: String,
}

impl Default for MyBatisConfig {
    fn default() -> Self {
        Self {
            model_suffix: "Model".into(),
            mapper_suffix: "ModelMapper".into(),
            model_package: "mybatis.model".into(),
            mapper_package: "mybatis.mapper".into(),
        }
    }
}

impl MyBatisConfig {
    /// Reads the `mybatis` object of the blueprint section of `.yo-rc.json`,
    /// merged over the defaults. Missing sections yield the defaults.
    pub fn from_yo_rc(text: &str) -> AppResult<Self> {
        let root: Value = serde_json::from_str(text)?;
        match root.get(YO_RC_BLUEPRINT_KEY).and_then(|b| b.get("mybatis")) {
            Some(section) => {
                let config = serde_json::from_value(section.clone())?;
                tracing::info!("Loaded MyBatis configuration from .yo-rc.json");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Model class name for `entity_class`.
    pub fn model_class(&self, entity_class: &str) -> String {
        format!("{}{}", entity_class, self.model_suffix)
    }

    /// Mapper interface name for `entity_class`.
    pub fn mapper_class(&self, entity_class: &str) -> String {
        format!("{}{}", entity_class, self.mapper_suffix)
    }
}

/// A generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// Path relative to the application package directory.
    pub relative_path: String,
    /// File content.
    pub content: String,
}

/// Java type used for `field` in a model class.
pub fn map_field_type(field: &FieldRecord) -> String {
    if field.is_blob {
        return "byte[]".to_string();
    }
    match field.field_type.as_str() {
        "BigDecimal" => "java.math.BigDecimal",
        "LocalDate" => "java.time.LocalDate",
        "Instant" => "java.time.Instant",
        "ZonedDateTime" => "java.time.ZonedDateTime",
        "Duration" => "java.time.Duration",
        "UUID" => "java.util.UUID",
        "ByteBuffer" => "java.nio.ByteBuffer",
        "byte" => "byte[]",
        "" => "Object",
        other => other,
    }
    .to_string()
}

/// Import statement needed for `java_type`, if any.
pub fn import_for_type(java_type: &str) -> Option<String> {
    if java_type.starts_with("java.lang.") || !java_type.contains('.') {
        return None;
    }
    Some(format!("import {};", java_type))
}

fn simple_name(java_type: &str) -> &str {
    java_type.rsplit('.').next().unwrap_or(java_type)
}

fn package_dir(package: &str) -> String {
    package.replace('.', "/")
}

/// Renders the model class of `entity`.
pub fn render_model(
    entity: &EntityRecord,
    config: &MyBatisConfig,
    package_name: &str,
) -> GeneratedSource {
    let class_name = config.model_class(entity.class_name());
    let package = format!("{}.{}", package_name, config.model_package);

    let mut imports = BTreeSet::from(["import lombok.Data;".to_string()]);
    let mut fields = vec![format!("    private {} id;", entity.primary_key())];
    for field in &entity.fields {
        let java_type = map_field_type(field);
        if let Some(import) = import_for_type(&java_type) {
            imports.insert(import);
        }
        fields.push(format!(
            "    private {} {};",
            simple_name(&java_type),
            field.field_name
        ));
    }

    let purpose = if entity.is_view {
        " * This is a read-only model mapped to a database view."
    } else {
        " * This model is used for MyBatis data access."
    };

    let mut lines = vec![format!("package {};", package), String::new()];
    lines.extend(imports);
    lines.extend([
        String::new(),
        "/**".into(),
        format!(" * MyBatis POJO for {} entity.", entity.class_name()),
        purpose.into(),
        " */".into(),
        "@Data".into(),
        format!("public class {} {{", class_name),
        String::new(),
        fields.join("\n"),
        String::new(),
        "}".into(),
        String::new(),
    ]);

    GeneratedSource {
        relative_path: format!("{}/{}.java", package_dir(&config.model_package), class_name),
        content: lines.join("\n"),
    }
}

fn push_doc(methods: &mut Vec<String>, doc: &[&str]) {
    methods.push("    /**".into());
    methods.extend(doc.iter().map(|l| format!("     * {}", l)));
    methods.push("     */".into());
}

/// Renders the mapper interface of `entity`. `kind` must not be [`MapperKind::None`].
pub fn render_mapper(
    entity: &EntityRecord,
    kind: MapperKind,
    config: &MyBatisConfig,
    package_name: &str,
) -> GeneratedSource {
    let entity_class = entity.class_name();
    let model = config.model_class(entity_class);
    let mapper = config.mapper_class(entity_class);
    let table = entity.table();
    let id_type = entity.primary_key();
    let read_only = kind != MapperKind::Crud;

    let mut imports = vec![
        format!("import {}.{}.{};", package_name, config.model_package, model),
        "import org.apache.ibatis.annotations.Mapper;".to_string(),
        "import org.apache.ibatis.annotations.Select;".to_string(),
        "import java.util.List;".to_string(),
    ];
    if !read_only {
        for annotation in ["Delete", "Insert", "Options", "Update"] {
            imports.push(format!("import org.apache.ibatis.annotations.{};", annotation));
        }
    }
    if id_type == "UUID" {
        imports.push("import java.util.UUID;".to_string());
    }
    imports.sort();

    let mut methods = Vec::new();
    push_doc(
        &mut methods,
        &["Retrieves all records.", "@return List of all records"],
    );
    methods.push(format!("    @Select(\"SELECT * FROM {}\")", table));
    methods.push(format!("    List<{}> findAll();", model));

    methods.push(String::new());
    push_doc(
        &mut methods,
        &[
            "Retrieves a record by ID.",
            "@param id the record ID",
            "@return the record, or null if not found",
        ],
    );
    methods.push(format!("    @Select(\"SELECT * FROM {} WHERE id = #{{id}}\")", table));
    methods.push(format!("    {} findById({} id);", model, id_type));

    if !read_only {
        let instance = entity.instance_name();
        let columns: Vec<String> = entity.fields.iter().map(FieldRecord::column_name).collect();
        let values: Vec<String> = entity
            .fields
            .iter()
            .map(|f| format!("#{{{}}}", f.field_name))
            .collect();

        if entity.fields.is_empty() {
            tracing::info!(
                entity = %entity.name,
                "Entity has no fields; skipping INSERT and UPDATE generation"
            );
        } else {
            let param = format!("@param {} the record to insert", instance);
            methods.push(String::new());
            push_doc(&mut methods, &["Inserts a new record.", param.as_str()]);
            methods.push(format!(
                "    @Insert(\"INSERT INTO {} ({}) VALUES ({})\")",
                table,
                columns.join(", "),
                values.join(", ")
            ));
            methods.push(
                "    @Options(useGeneratedKeys = true, keyProperty = \"id\")".to_string(),
            );
            methods.push(format!("    void insert({} {});", model, instance));

            let assignments: Vec<String> = columns
                .iter()
                .zip(&values)
                .map(|(c, v)| format!("{} = {}", c, v))
                .collect();
            let param = format!("@param {} the record to update", instance);
            methods.push(String::new());
            push_doc(&mut methods, &["Updates an existing record.", param.as_str()]);
            methods.push(format!(
                "    @Update(\"UPDATE {} SET {} WHERE id = #{{id}}\")",
                table,
                assignments.join(", ")
            ));
            methods.push(format!("    void update({} {});", model, instance));
        }

        methods.push(String::new());
        push_doc(
            &mut methods,
            &["Deletes a record by ID.", "@param id the record ID"],
        );
        methods.push(format!("    @Delete(\"DELETE FROM {} WHERE id = #{{id}}\")", table));
        methods.push(format!("    void deleteById({} id);", id_type));
    }

    let class_doc = if read_only {
        [
            format!(" * MyBatis Mapper for {} view.", entity_class),
            " * This is a read-only mapper - INSERT/UPDATE/DELETE operations are not supported."
                .to_string(),
        ]
    } else {
        [
            format!(" * MyBatis Mapper for {} entity.", entity_class),
            " * Provides CRUD operations via annotation-based SQL.".to_string(),
        ]
    };

    let mut lines = vec![
        format!("package {}.{};", package_name, config.mapper_package),
        String::new(),
    ];
    lines.extend(imports);
    lines.push(String::new());
    lines.push("/**".into());
    lines.extend(class_doc);
    lines.extend([
        " */".into(),
        "@Mapper".into(),
        format!("public interface {} {{", mapper),
        String::new(),
        methods.join("\n"),
        String::new(),
        "}".into(),
        String::new(),
    ]);

    GeneratedSource {
        relative_path: format!("{}/{}.java", package_dir(&config.mapper_package), mapper),
        content: lines.join("\n"),
    }
}

/// The `application.yml` block registering the model package.
pub fn application_yaml_block(config: &MyBatisConfig, package_name: &str) -> String {
    [
        "mybatis:".to_string(),
        format!(
            "  type-aliases-package: {}.{}",
            package_name, config.model_package
        ),
        "  configuration:".to_string(),
        "    map-underscore-to-camel-case: true".to_string(),
    ]
    .join("\n")
}
