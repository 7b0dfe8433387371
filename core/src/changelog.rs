#![deny(missing_docs)]

//! # View Changelogs
//!
//! Renders the Liquibase changelog that creates a database view.

use crate::view_sql::escape_xml;

/// Changelog directory, relative to the resources root.
pub const CHANGELOG_DIR: &str = "config/liquibase/changelog";

/// Fake-data directory, relative to the resources root.
pub const FAKE_DATA_DIR: &str = "config/liquibase/fake-data";

/// Master changelog, relative to the resources root.
pub const MASTER_CHANGELOG: &str = "config/liquibase/master.xml";

/// Author recorded on generated changesets.
pub const CHANGESET_AUTHOR: &str = "jhipster-view-blueprint";

/// File name of the view changelog for `table_name`.
pub fn view_changelog_file_name(timestamp: &str, table_name: &str) -> String {
    format!("{}_create_view_{}.xml", timestamp, table_name)
}

/// Timestamp of an earlier view changelog for `table_name` among `file_names`.
///
/// Reusing it keeps the changeset id stable across runs.
pub fn existing_view_changelog_timestamp<'a>(
    file_names: &'a [String],
    table_name: &str,
) -> Option<&'a str> {
    let suffix = format!("_create_view_{}.xml", table_name);
    file_names.iter().find_map(|name| {
        let stamp = name.strip_suffix(&suffix)?;
        (stamp.len() == 17 && stamp.bytes().all(|b| b.is_ascii_digit())).then_some(stamp)
    })
}

/// Renders a `createView` changelog. `query` is the bare SELECT, unescaped.
pub fn render_view_changelog(
    entity_class: &str,
    table_name: &str,
    query: &str,
    timestamp: &str,
) -> String {
    let view_name = escape_xml(table_name);
    let sql = escape_xml(query);

    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<databaseChangeLog
    xmlns="http://www.liquibase.org/xml/ns/dbchangelog"
    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
    xsi:schemaLocation="http://www.liquibase.org/xml/ns/dbchangelog
                        http://www.liquibase.org/xml/ns/dbchangelog/dbchangelog-latest.xsd">

    <!--
        Database view for entity: {entity_class}
        Generated by JHipster View Blueprint
    -->
    <changeSet id="{timestamp}-create-view-{view_name}" author="{CHANGESET_AUTHOR}">
        <createView viewName="{view_name}" replaceIfExists="true">
            {sql}
        </createView>
    </changeSet>

</databaseChangeLog>
"#
    )
}

/// True when `file_name` is one of the generator's table-definition changelogs for `entity_class`.
///
/// Accepts `<14 digits>_added_entity_<Class>.xml` and
/// `<14 digits>_added_entity_constraints_<Class>.xml`, nothing looser.
pub fn is_table_changelog(file_name: &str, entity_class: &str) -> bool {
    let Some(rest) = file_name.get(14..) else {
        return false;
    };
    if !file_name.as_bytes()[..14].iter().all(u8::is_ascii_digit) {
        return false;
    }
    let Some(class_part) = rest
        .strip_prefix("_added_entity_")
        .and_then(|r| r.strip_suffix(".xml"))
    else {
        return false;
    };
    class_part == entity_class
        || class_part
            .strip_prefix("constraints_")
            .is_some_and(|c| c == entity_class)
}
