/// 缓存键模块
/// 提供附近的人相关的缓存键生成
mod nearby_keys;

pub use nearby_keys::{DEFAULT_GEO_INDEX_KEY, DEFAULT_RANKED_KEY_PREFIX, NearbyKeys};
