//! HTTP round-trips for bounty browsing and creation.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::json;

fn bounty_json(title: &str, description: &str, category: &str, project: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": description,
        "reward": "100",
        "category": category,
        "project": project,
        "tags": ["Seed"],
    })
}

macro_rules! app {
    ($harness:expr) => {
        test::init_service(
            App::new()
                .app_data($harness.state.clone())
                .configure(bb_api::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn create_then_search_roundtrip() {
    let harness = common::harness().await;
    let app = app!(harness);

    let create = test::TestRequest::post()
        .uri("/bounties")
        .insert_header(common::bearer())
        .set_json(bounty_json(
            "Create a video about Petra Wallet",
            "Showcase wallet features",
            "video",
            "PETRA WALLET",
        ))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["reward"], 100.0);
    assert_eq!(created["rewardCurrency"], "APT");
    assert_eq!(created["status"], "OPEN");
    assert_eq!(created["progress"], 0);
    assert_eq!(created["creator"]["username"], "demo_user");
    assert_eq!(created["submissions"], json!([]));

    // Case-insensitive substring over the title finds it back.
    let found: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/bounties?search=petra")
            .to_request(),
    )
    .await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], created["id"]);

    let missed: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/bounties?search=no-such-term")
            .to_request(),
    )
    .await;
    assert!(missed.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn filters_are_conjunctive_and_search_is_disjunctive() {
    let harness = common::harness().await;
    let app = app!(harness);

    for (title, description, category, project) in [
        ("UI review", "polish the dashboard", "design", "APTOS FINANCE"),
        ("Explainer video", "walkthrough recording", "video", "PETRA WALLET"),
        ("Logo refresh", "new brand mark", "design", "THALA"),
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/bounties")
                .insert_header(common::bearer())
                .set_json(bounty_json(title, description, category, project))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // category AND search must both hold; search may match any of the
    // three text fields (here: project).
    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/bounties?category=design&search=aptos")
            .to_request(),
    )
    .await;
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|bounty| bounty["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["UI review"]);

    // The sentinel keeps everything.
    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/bounties?category=all&status=all")
            .to_request(),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn listing_is_newest_first_and_stable() {
    let harness = common::harness().await;
    let app = app!(harness);

    for title in ["first bounty", "second bounty"] {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/bounties")
                .insert_header(common::bearer())
                .set_json(bounty_json(title, "d", "content", "HYPERION"))
                .to_request(),
        )
        .await;
    }

    let first_read: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/bounties").to_request(),
    )
    .await;
    assert_eq!(first_read[0]["title"], "second bounty");
    assert_eq!(first_read[1]["title"], "first bounty");

    // Identical filters, no intervening writes: identical response.
    let second_read: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/bounties").to_request(),
    )
    .await;
    assert_eq!(first_read, second_read);
}

#[actix_web::test]
async fn get_bounty_by_id_and_missing_id() {
    let harness = common::harness().await;
    let app = app!(harness);

    let created: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/bounties")
            .insert_header(common::bearer())
            .set_json(bounty_json("Single fetch", "d", "development", "PACT"))
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let fetched: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/bounties/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(fetched["title"], "Single fetch");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/bounties/{}", uuid::Uuid::now_v7()))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_rejects_bad_input_and_missing_token() {
    let harness = common::harness().await;
    let app = app!(harness);

    // No Authorization header at all.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/bounties")
            .set_json(bounty_json("t", "d", "design", "p"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // A token nobody owns.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/bounties")
            .insert_header(common::bearer_for("forged-token"))
            .set_json(bounty_json("t", "d", "design", "p"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Unknown category is rejected, not coerced.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/bounties")
            .insert_header(common::bearer())
            .set_json(bounty_json("t", "d", "drawing", "p"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("unknown category"));

    // Non-numeric reward is rejected, never stored as NaN.
    let mut bad_reward = bounty_json("t", "d", "design", "p");
    bad_reward["reward"] = json!("abc");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/bounties")
            .insert_header(common::bearer())
            .set_json(bad_reward)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Nothing slipped into storage.
    let all: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/bounties").to_request(),
    )
    .await;
    assert!(all.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn due_date_accepts_plain_dates() {
    let harness = common::harness().await;
    let app = app!(harness);

    let mut with_date = bounty_json("Dated", "d", "content", "HYPERION");
    with_date["dueDate"] = json!("2026-09-01");
    let created: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/bounties")
            .insert_header(common::bearer())
            .set_json(with_date)
            .to_request(),
    )
    .await;
    assert_eq!(created["dueDate"], "2026-09-01T00:00:00Z");
}
