mod loader;

pub use loader::{Config, VariantConfig};
