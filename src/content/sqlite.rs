use std::path::Path;

use bevy_utils::tracing::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::content::repository::{CatalogStats, ComponentRepository};
use crate::content::schema::{CONTENT_SCHEMA, CONTENT_SCHEMA_VERSION};
use crate::data::components::{CatalogError, Category, Component, ComponentKind};

const COMPONENT_COLUMNS: &str =
    "id, name, description, wiki, category, shape, color, stiffness, pattern, symbol";

/// Read-only catalog stored in a SQLite content database.
pub struct SqliteComponentRepository {
    conn: Connection,
}

impl SqliteComponentRepository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA query_only = ON;")?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, CatalogError> {
        validate_content_meta(&conn)?;
        Ok(Self { conn })
    }
}

impl ComponentRepository for SqliteComponentRepository {
    fn stats(&self) -> Result<CatalogStats, CatalogError> {
        Ok(CatalogStats {
            cells: count_category(&self.conn, Category::Cells)?,
            scaffolds: count_category(&self.conn, Category::Scaffolds)?,
            growth_factors: count_category(&self.conn, Category::GrowthFactors)?,
        })
    }

    fn components(&self) -> Result<Vec<Component>, CatalogError> {
        let sql = format!(
            "SELECT {} FROM component ORDER BY sort_order, rowid",
            COMPONENT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], read_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(build_component(row?)?);
        }
        debug!(count = out.len(), "loaded components from content db");
        Ok(out)
    }

    fn component(&self, id: &str) -> Result<Option<Component>, CatalogError> {
        let sql = format!("SELECT {} FROM component WHERE id = ?1", COMPONENT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![id], read_row)
            .optional()?;
        row.map(build_component).transpose()
    }
}

/// Create the schema on a writable connection and stamp its version.
pub fn install_schema(conn: &Connection, content_version: &str) -> Result<(), CatalogError> {
    conn.execute_batch(CONTENT_SCHEMA)?;
    conn.execute(
        "INSERT OR REPLACE INTO content_meta (id, schema_version, content_version) VALUES (1, ?1, ?2)",
        params![CONTENT_SCHEMA_VERSION, content_version],
    )?;
    Ok(())
}

/// Write components in order; used when exporting a catalog to a content db.
pub fn insert_components(conn: &Connection, components: &[Component]) -> Result<(), CatalogError> {
    let sql = format!(
        "INSERT INTO component ({}, sort_order) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        COMPONENT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    for (order, component) in components.iter().enumerate() {
        let (shape, color, stiffness, pattern, symbol) = match &component.kind {
            ComponentKind::Cell { shape, color } => {
                (Some(shape.as_str()), Some(color.as_str()), None, None, None)
            }
            ComponentKind::Scaffold { stiffness, pattern } => {
                (None, None, Some(*stiffness), Some(pattern.as_str()), None)
            }
            ComponentKind::GrowthFactor { symbol } => {
                (None, None, None, None, Some(symbol.as_str()))
            }
        };
        stmt.execute(params![
            component.id,
            component.name,
            component.description,
            component.wiki,
            component.category().as_str(),
            shape,
            color,
            stiffness,
            pattern,
            symbol,
            order as i64,
        ])?;
    }
    Ok(())
}

struct ComponentRow {
    id: String,
    name: String,
    description: String,
    wiki: Option<String>,
    category: String,
    shape: Option<String>,
    color: Option<String>,
    stiffness: Option<i64>,
    pattern: Option<String>,
    symbol: Option<String>,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ComponentRow> {
    Ok(ComponentRow {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        wiki: row.get(3)?,
        category: row.get(4)?,
        shape: row.get(5)?,
        color: row.get(6)?,
        stiffness: row.get(7)?,
        pattern: row.get(8)?,
        symbol: row.get(9)?,
    })
}

fn build_component(row: ComponentRow) -> Result<Component, CatalogError> {
    let category: Category = row
        .category
        .parse()
        .map_err(|err| CatalogError::Validation(format!("component {}: {}", row.id, err)))?;
    let kind = match category {
        Category::Cells => ComponentKind::Cell {
            shape: row.shape.unwrap_or_default(),
            color: row.color.unwrap_or_default(),
        },
        Category::Scaffolds => {
            let stiffness = row
                .stiffness
                .and_then(|value| u32::try_from(value).ok())
                .filter(|value| *value > 0)
                .ok_or_else(|| {
                    CatalogError::Validation(format!(
                        "scaffold {} needs a positive stiffness",
                        row.id
                    ))
                })?;
            ComponentKind::Scaffold {
                stiffness,
                pattern: row.pattern.unwrap_or_default(),
            }
        }
        Category::GrowthFactors => ComponentKind::GrowthFactor {
            symbol: row.symbol.unwrap_or_default(),
        },
    };
    Ok(Component {
        id: row.id,
        name: row.name,
        description: row.description,
        wiki: row.wiki,
        kind,
    })
}

fn count_category(conn: &Connection, category: Category) -> Result<usize, CatalogError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM component WHERE category = ?1",
        params![category.as_str()],
        |row| row.get(0),
    )?;
    Ok(count.max(0) as usize)
}

fn validate_content_meta(conn: &Connection) -> Result<(), CatalogError> {
    let table = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='content_meta'",
            [],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    if table.is_none() {
        return Err(CatalogError::Validation(
            "content_meta table missing".to_string(),
        ));
    }

    let schema_version = conn
        .query_row(
            "SELECT schema_version FROM content_meta WHERE id = 1",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    let Some(schema_version) = schema_version else {
        return Err(CatalogError::Validation(
            "content_meta missing row id=1".to_string(),
        ));
    };

    if schema_version != CONTENT_SCHEMA_VERSION {
        return Err(CatalogError::Validation(format!(
            "content_meta schema_version {} != expected {}",
            schema_version, CONTENT_SCHEMA_VERSION
        )));
    }
    Ok(())
}
