//! HTTP round-trips for per-user stats and the leaderboard.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use bb_core::models::{Submission, SubmissionStatus};
use bb_core::traits::BountyRepo;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

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
async fn stats_require_a_token() {
    let harness = common::harness().await;
    let app = app!(harness);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/stats").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn stats_for_inactive_user_are_zero_not_an_error() {
    let harness = common::harness().await;
    common::add_user(&harness, "newbie@example.com", "newbie", 0.0, Some("newbie-token")).await;
    let app = app!(harness);

    let stats: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/stats")
            .insert_header(common::bearer_for("newbie-token"))
            .to_request(),
    )
    .await;

    assert_eq!(stats["earnings"], 0.0);
    assert_eq!(stats["tasksCount"], 0);
    assert_eq!(stats["recentSubmissions"], json!([]));
    assert_eq!(stats["recentBounties"], json!([]));
}

#[actix_web::test]
async fn stats_cap_recents_at_five_newest_first() {
    let harness = common::harness().await;
    let app = app!(harness);

    for index in 0..7 {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/bounties")
                .insert_header(common::bearer())
                .set_json(json!({
                    "title": format!("bounty {index}"),
                    "description": "d",
                    "reward": 10,
                    "category": "content",
                    "project": "HYPERION",
                    "tags": [],
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let stats: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/stats")
            .insert_header(common::bearer())
            .to_request(),
    )
    .await;

    assert_eq!(stats["earnings"], 19.0);
    assert_eq!(stats["tasksCount"], 7);
    let recents = stats["recentBounties"].as_array().unwrap();
    assert_eq!(recents.len(), 5);
    assert_eq!(recents[0]["title"], "bounty 6");
    assert_eq!(recents[4]["title"], "bounty 2");
}

#[actix_web::test]
async fn stats_embed_bounty_summaries_under_recent_submissions() {
    let harness = common::harness().await;
    let app = app!(harness);

    let created: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/bounties")
            .insert_header(common::bearer())
            .set_json(json!({
                "title": "summarized",
                "description": "d",
                "reward": 75,
                "category": "design",
                "project": "THALA",
                "tags": [],
            }))
            .to_request(),
    )
    .await;

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submissions")
            .insert_header(common::bearer())
            .set_json(json!({ "bountyId": created["id"], "content": "take a look" }))
            .to_request(),
    )
    .await;

    let stats: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/stats")
            .insert_header(common::bearer())
            .to_request(),
    )
    .await;

    let recent = &stats["recentSubmissions"][0];
    assert_eq!(recent["content"], "take a look");
    assert_eq!(recent["bounty"]["title"], "summarized");
    assert_eq!(recent["bounty"]["reward"], 75.0);
    assert_eq!(recent["bounty"]["rewardCurrency"], "APT");
}

#[actix_web::test]
async fn leaderboard_orders_by_earnings_and_counts_approvals() {
    let harness = common::harness().await;
    let alice = common::add_user(&harness, "alice@example.com", "alice", 2500.0, None).await;
    let bob = common::add_user(&harness, "bob@example.com", "bob", 1800.0, None).await;
    let app = app!(harness);

    // One bounty; alice lands two approved submissions, bob one pending.
    let created: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/bounties")
            .insert_header(common::bearer())
            .set_json(json!({
                "title": "ranked",
                "description": "d",
                "reward": 10,
                "category": "social",
                "project": "THALA",
                "tags": [],
            }))
            .to_request(),
    )
    .await;
    let bounty_id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();

    for (user_id, status) in [
        (alice.id, SubmissionStatus::Approved),
        (alice.id, SubmissionStatus::Approved),
        (bob.id, SubmissionStatus::Pending),
    ] {
        harness
            .repo
            .create_submission(Submission {
                id: Uuid::now_v7(),
                bounty_id,
                user_id,
                content: "reviewed offline".into(),
                status,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    let board: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/leaderboard").to_request(),
    )
    .await;
    let rows = board.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["user"]["username"], "alice");
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[0]["completedCount"], 2);
    assert_eq!(rows[1]["user"]["username"], "bob");
    assert_eq!(rows[1]["completedCount"], 0);
    assert_eq!(rows[2]["user"]["username"], "demo_user");

    // The limit parameter truncates the board.
    let top_one: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/leaderboard?limit=1")
            .to_request(),
    )
    .await;
    assert_eq!(top_one.as_array().unwrap().len(), 1);
    assert_eq!(top_one[0]["user"]["username"], "alice");
}
