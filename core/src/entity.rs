#![deny(missing_docs)]

//! # Entity Records
//!
//! The per-entity input of a run. Records are either deserialized directly or
//! built from the generator's entity JSON (`.jhipster/<Class>.json`), whose
//! `annotations` object carries the `view`, `sql`, `sqlFile` and `mybatis`
//! markers.

use crate::error::AppResult;
use crate::view_sql::ViewDefinition;
use heck::{ToLowerCamelCase, ToSnakeCase};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default primary-key type of generated entities.
pub const DEFAULT_PRIMARY_KEY_TYPE: &str = "Long";

/// Which mapper, if any, is generated for an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapperKind {
    /// No mapper.
    #[default]
    None,
    /// Full CRUD mapper.
    Crud,
    /// Query-only mapper (view entities).
    ReadOnly,
}

/// One entity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Java field name (`camelCase`).
    pub field_name: String,
    /// Generator field type (`String`, `Instant`, an enum name, ...).
    pub field_type: String,
    /// Binary content; mapped to `byte[]`.
    #[serde(default)]
    pub is_blob: bool,
}

impl FieldRecord {
    /// Creates a non-blob field.
    pub fn new(field_name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_type: field_type.into(),
            is_blob: false,
        }
    }

    /// Column name: the snake_case field name.
    pub fn column_name(&self) -> String {
        self.field_name.to_snake_case()
    }
}

/// Everything the pipeline needs to know about one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Entity name as written in the model.
    pub name: String,
    /// Java class name; defaults to `name`.
    #[serde(default)]
    pub entity_class: Option<String>,
    /// Table or view name; defaults to the snake_case class name.
    #[serde(default)]
    pub table_name: Option<String>,
    /// Declared fields, `id` excluded.
    #[serde(default)]
    pub fields: Vec<FieldRecord>,
    /// Primary-key Java type; defaults to `Long`.
    #[serde(default)]
    pub primary_key_type: Option<String>,
    /// Backed by a database view.
    #[serde(default)]
    pub is_view: bool,
    /// Mapper generation.
    #[serde(default)]
    pub mapper: MapperKind,
    /// Inline view SQL.
    #[serde(default)]
    pub view_sql: Option<String>,
    /// View SQL file, relative to the project root.
    #[serde(default)]
    pub view_sql_file: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratorEntity {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    entity_table_name: Option<String>,
    #[serde(default)]
    fields: Vec<GeneratorField>,
    #[serde(default)]
    annotations: Map<String, Value>,
    #[serde(default)]
    primary_key: Option<GeneratorPrimaryKey>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratorField {
    field_name: String,
    field_type: String,
    #[serde(default)]
    field_type_blob_content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeneratorPrimaryKey {
    #[serde(rename = "type")]
    key_type: Option<String>,
}

impl EntityRecord {
    /// Java class name.
    pub fn class_name(&self) -> &str {
        self.entity_class.as_deref().unwrap_or(&self.name)
    }

    /// Table (or view) name, falling back to the snake_case class name.
    pub fn table(&self) -> String {
        match self.table_name.as_deref() {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => self.class_name().to_snake_case(),
        }
    }

    /// Primary-key Java type.
    pub fn primary_key(&self) -> &str {
        self.primary_key_type
            .as_deref()
            .unwrap_or(DEFAULT_PRIMARY_KEY_TYPE)
    }

    /// Variable name for an instance of the entity (`orderSummary`).
    pub fn instance_name(&self) -> String {
        self.class_name().to_lower_camel_case()
    }

    /// Where the view's SQL comes from.
    pub fn view_definition(&self) -> ViewDefinition {
        ViewDefinition {
            name: self.table(),
            inline_sql: self.view_sql.clone(),
            sql_file: self.view_sql_file.clone(),
        }
    }

    /// Builds a record from the raw annotation map of a generator entity.
    ///
    /// Keys are matched case-insensitively. Presence follows the generator's
    /// truthiness rules (`true`, a non-empty string, a non-zero number).
    pub fn from_annotations(
        name: &str,
        table_name: Option<String>,
        fields: Vec<FieldRecord>,
        primary_key_type: Option<String>,
        annotations: &Map<String, Value>,
    ) -> Self {
        let lookup = |key: &str| {
            annotations
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        };
        let text = |key: &str| match lookup(key) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        let is_view = lookup("view").is_some_and(is_truthy);
        let mut record = EntityRecord {
            name: name.to_string(),
            entity_class: None,
            table_name,
            fields,
            primary_key_type,
            is_view,
            mapper: MapperKind::None,
            view_sql: None,
            view_sql_file: None,
        };

        if is_view {
            record.view_sql = text("sql").filter(|sql| {
                let blank = sql.trim().is_empty();
                if blank {
                    tracing::warn!(entity = name, "@Sql annotation is empty");
                }
                !blank
            });
            record.view_sql_file = text("sqlFile");
            tracing::info!(entity = name, "View entity detected");
        }

        if lookup("mybatis").is_some_and(is_truthy) {
            record.mapper = if is_view {
                MapperKind::ReadOnly
            } else {
                MapperKind::Crud
            };
            tracing::info!(entity = name, mapper = ?record.mapper, "Marked for MyBatis generation");
        }

        record
    }

    /// Parses a generator entity file (`.jhipster/<Class>.json`).
    pub fn from_entity_json(entity_class: &str, json: &str) -> AppResult<Self> {
        let raw: GeneratorEntity = serde_json::from_str(json)?;
        let fields = raw
            .fields
            .into_iter()
            .map(|f| FieldRecord {
                is_blob: f.field_type_blob_content.is_some_and(|c| !c.is_empty()),
                field_name: f.field_name,
                field_type: f.field_type,
            })
            .collect();
        let pk = raw.primary_key.and_then(|pk| pk.key_type);

        let mut record = Self::from_annotations(
            raw.name.as_deref().unwrap_or(entity_class),
            raw.entity_table_name,
            fields,
            pk,
            &raw.annotations,
        );
        record.entity_class = Some(entity_class.to_string());
        Ok(record)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
