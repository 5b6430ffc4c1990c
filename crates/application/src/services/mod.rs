mod identity_pool;

pub use identity_pool::{IdentityPool, IdentityPoolSettings, RotationOutcome};
