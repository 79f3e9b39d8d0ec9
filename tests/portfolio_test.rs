//! Integration tests for the public aggregate endpoint.

mod common;

use common::{base_url, TestHarness};
use serde_json::{json, Value};

async fn fetch(addr: std::net::SocketAddr, path: &str) -> Value {
    let resp = reqwest::get(format!("{}{path}", base_url(addr)))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn aggregate_end_to_end() {
    let (h, addr) = TestHarness::with_server().await;
    h.seed_profile("Ada Lovelace");
    h.seed_skill("order1", 1);
    h.seed_skill("order0", 0);
    h.seed_project("Engine", "A,B", 0);
    h.seed_social_link("GitHub", 0);

    let data = fetch(addr, "/portfolio-data/").await;
    let obj = data.as_object().unwrap();
    assert_eq!(obj.len(), 4);
    for key in ["profile", "skills", "projects", "social_links"] {
        assert!(obj.contains_key(key), "missing {key}");
    }

    assert_eq!(data["skills"], json!(["order0", "order1"]));
    assert_eq!(data["projects"][0]["technologies"], json!(["A", "B"]));
    assert_eq!(data["profile"]["name"], "Ada Lovelace");
    assert_eq!(data["social_links"][0]["icon_name"], "GitHub");
}

#[tokio::test]
async fn empty_store_returns_all_keys() {
    let (_h, addr) = TestHarness::with_server().await;

    let data = fetch(addr, "/portfolio-data/").await;
    assert_eq!(
        data,
        json!({
            "profile": {},
            "skills": [],
            "projects": [],
            "social_links": [],
        })
    );
}

#[tokio::test]
async fn profile_has_exactly_public_fields() {
    let (h, addr) = TestHarness::with_server().await;
    h.seed_profile("Ada");

    let data = fetch(addr, "/portfolio-data/").await;
    let profile = data["profile"].as_object().unwrap();
    let mut keys: Vec<&str> = profile.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["bio", "name", "profile_image", "tagline"]);
    assert!(profile["profile_image"].is_null());
}

#[tokio::test]
async fn first_profile_wins() {
    let (h, addr) = TestHarness::with_server().await;
    h.seed_profile("First");
    h.seed_profile("Second");

    let data = fetch(addr, "/portfolio-data/").await;
    assert_eq!(data["profile"]["name"], "First");
}

#[tokio::test]
async fn lists_sorted_by_order_with_insertion_tiebreak() {
    let (h, addr) = TestHarness::with_server().await;
    h.seed_project("Late", "Go", 5);
    h.seed_project("Tie A", "Go", 1);
    h.seed_project("Tie B", "Go", 1);
    h.seed_project("Early", "Go", 0);
    h.seed_social_link("Mastodon", 2);
    h.seed_social_link("LinkedIn", 0);

    let data = fetch(addr, "/portfolio-data/").await;
    let titles: Vec<&str> = data["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Early", "Tie A", "Tie B", "Late"]);

    let links: Vec<&str> = data["social_links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(links, vec!["LinkedIn", "Mastodon"]);
}

#[tokio::test]
async fn project_public_shape() {
    let (h, addr) = TestHarness::with_server().await;
    h.seed_project("Site", "Go, Rust , Python,,", 0);

    let data = fetch(addr, "/portfolio-data/").await;
    let project = &data["projects"][0];
    assert_eq!(project["technologies"], json!(["Go", "Rust", "Python"]));
    assert!(project["image"].is_null());
    assert_eq!(project["liveDemo"], "");
    assert_eq!(project["githubRepo"], "");
    assert!(project["id"].is_i64());
    assert!(project.get("live_demo_url").is_none());
}

#[tokio::test]
async fn api_prefixed_path_serves_same_document() {
    let (h, addr) = TestHarness::with_server().await;
    h.seed_skill("Rust", 0);

    let plain = fetch(addr, "/portfolio-data/").await;
    let api = fetch(addr, "/api/portfolio-data/").await;
    assert_eq!(plain, api);
}

#[tokio::test]
async fn aggregate_is_public_with_auth_enabled() {
    let (h, addr) = TestHarness::with_auth_server().await;
    h.seed_skill("Rust", 0);

    let data = fetch(addr, "/portfolio-data/").await;
    assert_eq!(data["skills"], json!(["Rust"]));
}

#[tokio::test]
async fn health_check() {
    let (_h, addr) = TestHarness::with_server().await;
    let data = fetch(addr, "/health").await;
    assert_eq!(data["status"], "ok");
}
