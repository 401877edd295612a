//! End-to-end cycle: page views in, converged tags out.

use std::sync::Arc;

use autotag_engine::{Autotag, CycleOutcome, MemoryTagRegistry, TagRegistry};
use autotag_storage::MemoryStore;
use autotag_types::{AutotagConfig, PageLocator, PageSnapshot};
use chrono::Utc;

fn shop_config() -> AutotagConfig {
    AutotagConfig {
        topic_list: vec!["shoes".to_string(), "hats".to_string()],
        min_views: 2,
        ..Default::default()
    }
}

fn locator(pathname: &str) -> PageLocator {
    PageLocator::new(
        format!("https://shop.example{pathname}"),
        "shop.example",
        pathname,
    )
}

#[tokio::test]
async fn test_single_view_never_produces_a_favorite() {
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(MemoryTagRegistry::new());
    let engine = Autotag::new(shop_config(), store, registry.clone()).unwrap();

    let snapshot = PageSnapshot::with_title("Best Shoes 2024");
    let outcome = engine
        .handle_page_view(&locator("/post/1"), Some(&snapshot))
        .await;
    assert_eq!(
        outcome,
        CycleOutcome::Applied {
            recorded: 1,
            added: 0,
            removed: 0
        }
    );

    let now = Utc::now().timestamp_millis();
    assert!(engine.favorite_topics(now).await.unwrap().is_empty());
    assert!(registry.get_tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_second_view_makes_favorite_and_adds_tag() {
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(MemoryTagRegistry::new());
    let engine = Autotag::new(shop_config(), store, registry.clone()).unwrap();

    let snapshot = PageSnapshot::with_title("Best Shoes 2024");
    engine
        .handle_page_view(&locator("/post/1"), Some(&snapshot))
        .await;
    let outcome = engine
        .handle_page_view(&locator("/post/2"), Some(&snapshot))
        .await;
    assert_eq!(
        outcome,
        CycleOutcome::Applied {
            recorded: 1,
            added: 1,
            removed: 0
        }
    );

    let now = Utc::now().timestamp_millis();
    assert_eq!(engine.favorite_topics(now).await.unwrap(), vec!["shoes"]);
    assert_eq!(registry.get_tags().await.unwrap(), vec!["topic:shoes"]);
}

#[tokio::test]
async fn test_interest_shift_swaps_tags() {
    let config = AutotagConfig {
        topic_list: vec!["shoes".to_string(), "hats".to_string()],
        min_views: 2,
        num_topics: 1,
        ..Default::default()
    };
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(MemoryTagRegistry::new());
    let engine = Autotag::new(config, store, registry.clone()).unwrap();

    let shoes = PageSnapshot::with_title("Best Shoes 2024");
    engine.handle_page_view(&locator("/s/1"), Some(&shoes)).await;
    engine.handle_page_view(&locator("/s/2"), Some(&shoes)).await;
    assert_eq!(registry.get_tags().await.unwrap(), vec!["topic:shoes"]);

    // Three hat views outweigh two equally-recent shoe views.
    let hats = PageSnapshot::with_title("Hats for winter");
    engine.handle_page_view(&locator("/h/1"), Some(&hats)).await;
    engine.handle_page_view(&locator("/h/2"), Some(&hats)).await;
    engine.handle_page_view(&locator("/h/3"), Some(&hats)).await;

    assert_eq!(registry.get_tags().await.unwrap(), vec!["topic:hats"]);
}

#[tokio::test]
async fn test_foreign_tags_survive_reconciliation() {
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(MemoryTagRegistry::with_tags(vec![
        "vip".to_string(),
        "newsletter".to_string(),
    ]));
    let engine = Autotag::new(shop_config(), store, registry.clone()).unwrap();

    let snapshot = PageSnapshot::with_title("Best Shoes 2024");
    engine.handle_page_view(&locator("/p/1"), Some(&snapshot)).await;
    engine.handle_page_view(&locator("/p/2"), Some(&snapshot)).await;

    let tags = registry.get_tags().await.unwrap();
    assert!(tags.contains(&"vip".to_string()));
    assert!(tags.contains(&"newsletter".to_string()));
    assert!(tags.contains(&"topic:shoes".to_string()));
}

#[tokio::test]
async fn test_url_position_end_to_end() {
    // No topic list configured: the second path segment names the topic.
    let config = AutotagConfig {
        min_views: 2,
        url_position: 1,
        ..Default::default()
    };
    let store = Arc::new(MemoryStore::new());
    let registry = Arc::new(MemoryTagRegistry::new());
    let engine = Autotag::new(config, store, registry.clone()).unwrap();

    engine
        .handle_page_view(&locator("/c/shoes/sneaker-1/"), None)
        .await;
    engine
        .handle_page_view(&locator("/c/shoes/boot-2/"), None)
        .await;

    assert_eq!(registry.get_tags().await.unwrap(), vec!["topic:shoes"]);
}
