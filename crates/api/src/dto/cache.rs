use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub deleted: u64,
}
