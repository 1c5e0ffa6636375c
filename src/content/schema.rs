pub const CONTENT_SCHEMA_VERSION: i64 = 1;

/// DDL for a sandbox content database.
pub const CONTENT_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS content_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL,
    content_version TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS component (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    wiki TEXT,
    category TEXT NOT NULL,
    shape TEXT,
    color TEXT,
    stiffness INTEGER,
    pattern TEXT,
    symbol TEXT,
    sort_order INTEGER NOT NULL DEFAULT 0
);
";
