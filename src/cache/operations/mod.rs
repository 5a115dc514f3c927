/// 缓存操作
/// 提供 Redis 上GEO索引与有序集合的操作实现

// GEO索引操作
pub mod geo;

// 附近的人有序集合操作
pub mod ranked;

// 重新导出常用操作
pub use geo::RedisGeoIndex;
pub use ranked::RedisRankedCache;
