// 缓存模块
// 包含GEO索引、附近的人有序集合以及它们的 Redis / 内存实现

pub mod keys;
pub mod memory;
pub mod operations;
mod traits;

// 重新导出常用类型，方便其他模块使用
pub use keys::NearbyKeys;
pub use memory::MemoryStore;
pub use operations::{RedisGeoIndex, RedisRankedCache};
pub use traits::{GeoIndexStore, RankedResultCache};
