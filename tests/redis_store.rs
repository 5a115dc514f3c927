//! 需要真实的 Redis：`REDIS_URL=redis://127.0.0.1/ cargo test -- --ignored`

use std::sync::Arc;
use std::time::Duration;

use nearby::cache::{GeoIndexStore, RankedResultCache, RedisGeoIndex, RedisRankedCache};
use nearby::error::NearbyError;
use nearby::models::{LocationRecord, RadiusQuery, SortOrder};

fn client() -> Arc<redis::Client> {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".into());
    Arc::new(redis::Client::open(url).unwrap())
}

#[tokio::test]
#[ignore]
async fn search_store_writes_sorted_set_atomically() {
    let client = client();
    let index_key = "nearby:test:geo";
    let store_key = "nearby:test:ranked:A";
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let _: () = redis::cmd("DEL")
        .arg(index_key)
        .arg(store_key)
        .query_async(&mut conn)
        .await
        .unwrap();

    let geo = RedisGeoIndex::new(client.clone(), index_key);
    let ranked = RedisRankedCache::new(client);
    for (member, lon, lat) in [("A", 0.0, 0.0), ("B", 0.0, 0.01), ("C", 10.0, 10.0)] {
        geo.upsert(&LocationRecord::new(member, lon, lat).unwrap())
            .await
            .unwrap();
    }
    // 重复上报只覆盖坐标
    geo.upsert(&LocationRecord::new("B", 0.0, 0.01).unwrap())
        .await
        .unwrap();

    let query = RadiusQuery {
        member_id: "A",
        radius_km: 100.0,
        limit: 1000,
        order: SortOrder::Asc,
        store_key,
        ttl: Some(Duration::from_secs(60)),
    };
    assert_eq!(geo.query_within_radius(&query).await.unwrap(), 2);

    assert!(ranked.remove_member(store_key, "A").await.unwrap());
    assert!(!ranked.remove_member(store_key, "A").await.unwrap());

    let members = ranked.range_by_rank(store_key, 0, 9).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].0, "B");
    assert!((members[0].1 - 1.112).abs() < 0.01);
    assert!(ranked.range_by_rank(store_key, 5, 9).await.unwrap().is_empty());
    // 结束排名超过 isize::MAX 时截断而不是返回空
    assert_eq!(ranked.range_by_rank(store_key, 0, u64::MAX - 1).await.unwrap().len(), 1);

    let ghost = RadiusQuery {
        member_id: "ghost",
        ..query
    };
    let err = geo.query_within_radius(&ghost).await.unwrap_err();
    assert!(matches!(err, NearbyError::MemberNotRegistered(_)));
}
