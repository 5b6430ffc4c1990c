pub mod cache_limit;
pub mod identity_rotation;
pub mod runner;

pub use cache_limit::CacheLimitJob;
pub use identity_rotation::IdentityRotationJob;
pub use runner::{join_all, JobRunner};
