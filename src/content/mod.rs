pub mod repository;
pub mod schema;
pub mod sqlite;
pub mod translator;

pub use repository::{CatalogStats, ComponentRepository};
pub use sqlite::SqliteComponentRepository;
pub use translator::{translate, TranslateError, TranslationOutcome, Translator};
