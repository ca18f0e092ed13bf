mod shared_identity;

pub use shared_identity::{SharedIdentity, SubscriptionId};
