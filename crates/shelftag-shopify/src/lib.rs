pub mod client;
pub mod enumerate;
pub mod error;
pub mod reader;
mod retry;
pub mod subscriptions;
pub mod types;
pub mod writer;

pub use client::ShopifyClient;
pub use enumerate::CatalogEnumeration;
pub use error::ShopifyError;
pub use reader::VariantSnapshot;
pub use subscriptions::SubscriptionReconcile;

/// Metafield namespace/key holding the merchandising label on a variant.
pub const LABEL_NAMESPACE: &str = "merchandising";
pub const LABEL_KEY: &str = "status";

/// Metafield namespace/key of the externally-maintained best-seller signal.
pub const SIGNAL_NAMESPACE: &str = "signals";
pub const SIGNAL_KEY: &str = "bestseller";
