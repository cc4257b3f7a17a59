use super::*;
use crate::reddit::test_helpers::{Call, MockApi, item};

fn ten_items() -> Vec<Item> {
    (1..=10).map(|i| item(&format!("t{i}"), &format!("Story {i}"), 1000 - i)).collect()
}

#[tokio::test]
async fn blank_topic_is_a_noop() {
    let api = MockApi::new().with_feed("technology", ten_items());
    let mut feed = TopicFeed::new();
    feed.refresh(&api, "technology", 10).await;
    let before = feed.clone();
    api.clear_calls();

    assert_eq!(feed.refresh(&api, "", 10).await, FeedRefresh::Skipped);
    assert_eq!(feed.refresh(&api, "   ", 10).await, FeedRefresh::Skipped);

    assert_eq!(feed, before);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn refresh_fetches_items_and_icon() {
    let api = MockApi::new()
        .with_feed("technology", ten_items())
        .with_icon("technology", "https://img.example/tech.png");
    let mut feed = TopicFeed::new();

    let outcome = feed.refresh(&api, "technology", 10).await;

    assert_eq!(outcome, FeedRefresh::Applied { items: true, icon: true });
    assert_eq!(feed.topic.as_deref(), Some("technology"));
    assert_eq!(feed.items.len(), 10);
    assert_eq!(feed.items[0].id, "t1");
    assert_eq!(feed.icon, "https://img.example/tech.png");
    assert_eq!(
        api.calls(),
        vec![
            Call::Hot { topic: "technology".into(), limit: 10 },
            Call::About { topic: "technology".into() },
        ]
    );
}

#[tokio::test]
async fn refresh_trims_topic() {
    let api = MockApi::new().with_feed("rust", vec![item("r1", "Rust", 1)]);
    let mut feed = TopicFeed::new();
    feed.refresh(&api, "  rust ", 10).await;
    assert_eq!(feed.topic.as_deref(), Some("rust"));
    assert_eq!(feed.items.len(), 1);
}

#[tokio::test]
async fn refresh_respects_limit() {
    let api = MockApi::new().with_feed("technology", ten_items());
    let mut feed = TopicFeed::new();
    feed.refresh(&api, "technology", 3).await;
    assert_eq!(feed.items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(), vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn failed_listing_keeps_previous_items() {
    let api = MockApi::new()
        .with_feed("technology", ten_items())
        .with_feed("science", vec![item("s1", "Science", 5)])
        .with_icon("science", "https://img.example/sci.png");
    let mut feed = TopicFeed::new();
    feed.refresh(&api, "technology", 10).await;

    api.set_failing("hot", true);
    let outcome = feed.refresh(&api, "science", 10).await;

    assert_eq!(outcome, FeedRefresh::Applied { items: false, icon: true });
    assert_eq!(feed.topic.as_deref(), Some("technology"));
    assert_eq!(feed.items.len(), 10);
    assert_eq!(feed.icon, "https://img.example/sci.png");
}

#[tokio::test]
async fn failed_icon_keeps_previous_icon() {
    let api = MockApi::new()
        .with_feed("technology", ten_items())
        .with_icon("technology", "https://img.example/tech.png")
        .with_feed("science", vec![item("s1", "Science", 5)]);
    let mut feed = TopicFeed::new();
    feed.refresh(&api, "technology", 10).await;

    api.set_failing("about", true);
    let outcome = feed.refresh(&api, "science", 10).await;

    assert_eq!(outcome, FeedRefresh::Applied { items: true, icon: false });
    assert_eq!(feed.items, vec![item("s1", "Science", 5)]);
    assert_eq!(feed.icon, "https://img.example/tech.png");
}

#[tokio::test]
async fn topic_without_icon_clears_icon() {
    let api = MockApi::new()
        .with_feed("technology", ten_items())
        .with_icon("technology", "https://img.example/tech.png")
        .with_feed("plain", vec![]);
    let mut feed = TopicFeed::new();
    feed.refresh(&api, "technology", 10).await;
    feed.refresh(&api, "plain", 10).await;
    assert_eq!(feed.icon, "");
    assert!(feed.items.is_empty());
}

#[test]
fn item_at_rank_is_one_based() {
    let feed = TopicFeed { topic: Some("t".into()), items: ten_items(), icon: String::new() };
    assert_eq!(feed.item_at_rank(1).map(|i| i.id.as_str()), Some("t1"));
    assert_eq!(feed.item_at_rank(10).map(|i| i.id.as_str()), Some("t10"));
    assert!(feed.item_at_rank(0).is_none());
    assert!(feed.item_at_rank(11).is_none());
}
