mod sqlite_response_cache;

pub use sqlite_response_cache::SqliteResponseCache;
