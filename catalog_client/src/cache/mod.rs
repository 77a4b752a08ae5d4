//! Tiered caching of decoded catalog responses

pub mod clock;
mod disk;
mod memory;
pub mod registry;
pub mod tiered;

pub use clock::{Clock, ManualClock, SystemClock};
pub use registry::{CacheRegistry, Namespace, RegistryConfig};
pub use tiered::{CacheEntry, CacheError, CacheStats, TieredCache};
