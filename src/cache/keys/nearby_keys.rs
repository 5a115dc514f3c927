use crate::config::Config;

/// 全局GEO索引键
pub const DEFAULT_GEO_INDEX_KEY: &str = "nearby:geo";

/// 附近的人有序集合键前缀
pub const DEFAULT_RANKED_KEY_PREFIX: &str = "nearby:ranked:";

/// 附近的人相关缓存键，由配置传入而不是全局常量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearbyKeys {
    geo_index_key: String,
    ranked_prefix: String,
}

impl Default for NearbyKeys {
    fn default() -> Self {
        Self::new(DEFAULT_GEO_INDEX_KEY, DEFAULT_RANKED_KEY_PREFIX)
    }
}

impl NearbyKeys {
    pub fn new(geo_index_key: impl Into<String>, ranked_prefix: impl Into<String>) -> Self {
        Self {
            geo_index_key: geo_index_key.into(),
            ranked_prefix: ranked_prefix.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.geo_index_key, &config.ranked_key_prefix)
    }

    pub fn geo_index_key(&self) -> &str {
        &self.geo_index_key
    }

    /// 生成用户附近的人有序集合键，同一用户多次分页命中同一个键
    pub fn ranked_set_key(&self, member_id: &str) -> String {
        format!("{}{}", self.ranked_prefix, member_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranked_key_is_prefix_plus_member() {
        let keys = NearbyKeys::default();
        assert_eq!(keys.ranked_set_key("zhangsan"), "nearby:ranked:zhangsan");
        assert_eq!(keys.ranked_set_key("zhangsan"), keys.ranked_set_key("zhangsan"));
        assert_ne!(keys.ranked_set_key("a:b"), keys.ranked_set_key("a"));
        assert_eq!(keys.geo_index_key(), "nearby:geo");
    }
}
