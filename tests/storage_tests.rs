//! Storage backend integration tests
//!
//! 覆盖包含查询、嵌套区间的 tie-break、Empty/Ready 状态机
//! 和 full-replace 语义，基于临时 SQLite 数据库。

use std::sync::Arc;

use tempfile::TempDir;

use ipdb::storage::{IndexState, IpRange, SeaOrmStorage};
use ipdb::utils::to_precision_string;

async fn test_storage(dir: &TempDir, name: &str) -> Arc<SeaOrmStorage> {
    let db_path = dir.path().join(name);
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    Arc::new(
        SeaOrmStorage::new(&db_url, "sqlite")
            .await
            .expect("创建 SQLite 存储失败"),
    )
}

fn range(start: &str, end: &str, country: &str) -> IpRange {
    IpRange {
        start_ip: start.to_string(),
        end_ip: end.to_string(),
        start_ip_int: to_precision_string(start).unwrap(),
        end_ip_int: to_precision_string(end).unwrap(),
        country: Some(country.to_string()),
        country_name: None,
        continent_name: None,
        asn: None,
        as_name: None,
        ip_version: None,
    }
}

async fn locate_literal(storage: &SeaOrmStorage, literal: &str) -> Option<IpRange> {
    let addr_int = to_precision_string(literal).unwrap();
    storage.locate(&addr_int).await.expect("locate 查询失败")
}

#[tokio::test]
async fn test_containment_basic() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir, "containment.db").await;

    storage
        .insert_batch(&[
            range("10.0.0.10", "10.0.0.20", "AA"),
            range("10.0.1.0", "10.0.1.255", "BB"),
        ])
        .await
        .unwrap();
    storage.finish_load();

    let hit = locate_literal(&storage, "10.0.0.15").await.unwrap();
    assert_eq!(hit.country.as_deref(), Some("AA"));

    // 合法地址但无覆盖区间：正常未命中，不是错误
    assert!(locate_literal(&storage, "10.0.2.1").await.is_none());
}

#[tokio::test]
async fn test_nested_ranges_return_innermost() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir, "nested.db").await;

    // [10,20]→A 嵌套 [15,18]→B：按 start 降序取第一条，即最内层
    storage
        .insert_batch(&[
            range("10.0.0.10", "10.0.0.20", "A"),
            range("10.0.0.15", "10.0.0.18", "B"),
        ])
        .await
        .unwrap();
    storage.finish_load();

    let inner = locate_literal(&storage, "10.0.0.16").await.unwrap();
    assert_eq!(inner.country.as_deref(), Some("B"));

    let outer = locate_literal(&storage, "10.0.0.12").await.unwrap();
    assert_eq!(outer.country.as_deref(), Some("A"));

    assert!(locate_literal(&storage, "10.0.0.25").await.is_none());
}

#[tokio::test]
async fn test_cross_family_lookups() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir, "families.db").await;

    storage
        .insert_batch(&[
            range("8.8.8.0", "8.8.8.255", "US"),
            range("2001:db8::", "2001:db8::ffff", "V6"),
        ])
        .await
        .unwrap();
    storage.finish_load();

    let v4 = locate_literal(&storage, "8.8.8.8").await.unwrap();
    assert_eq!(v4.country.as_deref(), Some("US"));

    // IPv4-mapped 写法与点分写法落到同一区间
    let mapped = locate_literal(&storage, "::ffff:8.8.8.8").await.unwrap();
    assert_eq!(mapped.country.as_deref(), Some("US"));

    let v6 = locate_literal(&storage, "2001:db8::1234").await.unwrap();
    assert_eq!(v6.country.as_deref(), Some("V6"));

    // 纯 IPv6 地址不应命中 IPv4 区间
    assert!(locate_literal(&storage, "2001:db9::1").await.is_none());
}

#[tokio::test]
async fn test_empty_state_short_circuits() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir, "empty.db").await;

    assert_eq!(storage.state(), IndexState::Empty);
    assert!(locate_literal(&storage, "8.8.8.8").await.is_none());
}

#[tokio::test]
async fn test_clear_all_resets_state() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir, "clear.db").await;

    storage
        .insert_batch(&[range("1.0.0.0", "1.0.0.255", "AU")])
        .await
        .unwrap();
    storage.finish_load();
    assert_eq!(storage.state(), IndexState::Ready);
    assert_eq!(storage.count().await.unwrap(), 1);

    let removed = storage.clear_all().await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(storage.state(), IndexState::Empty);
    assert_eq!(storage.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_reopen_nonempty_database_is_ready() {
    let dir = TempDir::new().unwrap();
    {
        let storage = test_storage(&dir, "reopen.db").await;
        storage
            .insert_batch(&[range("1.0.0.0", "1.0.0.255", "AU")])
            .await
            .unwrap();
        storage.finish_load();
    }

    // 重新打开同一个库：表非空，句柄直接进入 Ready
    let storage = test_storage(&dir, "reopen.db").await;
    assert_eq!(storage.state(), IndexState::Ready);
    let hit = locate_literal(&storage, "1.0.0.128").await.unwrap();
    assert_eq!(hit.country.as_deref(), Some("AU"));
}

#[tokio::test]
async fn test_insert_batch_empty_is_noop() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir, "noop.db").await;

    assert_eq!(storage.insert_batch(&[]).await.unwrap(), 0);
    assert_eq!(storage.count().await.unwrap(), 0);
}
