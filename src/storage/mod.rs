pub mod postgres;
pub mod sqlite;
pub mod trait_def;

pub use postgres::PostgresLeadStore;
pub use sqlite::SqliteLeadStore;
pub use trait_def::LeadStore;
