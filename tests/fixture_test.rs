use reqwest::Client;
use serde_json::json;

mod common;
use common::utils::{create_admin, create_fixture, create_player, spawn_app};

#[tokio::test]
async fn create_fixture_materializes_both_teams_slot_layouts() {
    let app = spawn_app().await;
    let (_, admin_token) = create_admin(&app).await;

    let fixture_id = create_fixture(&app, &admin_token, "7").await;

    // 7-a-side layout has 9 entries per team
    let slot_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM fixture_slots WHERE fixture_id = $1")
            .bind(fixture_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to count slots.");
    assert_eq!(slot_count, 18);

    let (status, venue): (String, String) =
        sqlx::query_as("SELECT status, venue FROM fixtures WHERE id = $1")
            .bind(fixture_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to fetch fixture.");
    assert_eq!(status, "open");
    assert_eq!(venue, "City Arena");
}

#[tokio::test]
async fn unknown_formation_size_falls_back_to_eleven_a_side() {
    let app = spawn_app().await;
    let (_, admin_token) = create_admin(&app).await;

    let fixture_id = create_fixture(&app, &admin_token, "9").await;

    let slot_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM fixture_slots WHERE fixture_id = $1")
            .bind(fixture_id)
            .fetch_one(&app.db_pool)
            .await
            .expect("Failed to count slots.");
    // 13 entries per team for the full-size layout
    assert_eq!(slot_count, 26);
}

#[tokio::test]
async fn create_fixture_requires_admin_role() {
    let app = spawn_app().await;
    let (_, player_token) = create_player(&app).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/admin/fixtures", app.address))
        .bearer_auth(player_token)
        .json(&json!({
            "venue": "City Arena",
            "starts_at": "2026-09-01T18:30:00Z",
            "formation_size": "5"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn create_fixture_rejects_blank_venue() {
    let app = spawn_app().await;
    let (_, admin_token) = create_admin(&app).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/admin/fixtures", app.address))
        .bearer_auth(admin_token)
        .json(&json!({
            "venue": "   ",
            "starts_at": "2026-09-01T18:30:00Z",
            "formation_size": "5"
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn list_fixtures_is_paginated_and_ordered_by_kickoff() {
    let app = spawn_app().await;
    let (_, admin_token) = create_admin(&app).await;
    let client = Client::new();

    for (venue, starts_at) in [
        ("Late pitch", "2026-09-03T18:00:00Z"),
        ("Early pitch", "2026-09-01T18:00:00Z"),
        ("Middle pitch", "2026-09-02T18:00:00Z"),
    ] {
        let response = client
            .post(format!("{}/admin/fixtures", app.address))
            .bearer_auth(&admin_token)
            .json(&json!({
                "venue": venue,
                "starts_at": starts_at,
                "formation_size": "5"
            }))
            .send()
            .await
            .expect("Failed to execute request.");
        assert_eq!(response.status().as_u16(), 201);
    }

    let response = client
        .get(format!("{}/fixtures?page=1&limit=2", app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Cannot parse body.");
    let data = body["data"].as_array().expect("data is not an array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["venue"], "Early pitch");
    assert_eq!(data[1]["venue"], "Middle pitch");

    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 2);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["pagination"]["has_next"], true);
    assert_eq!(body["pagination"]["has_prev"], false);
    assert!(body["server_now"].is_string());

    let response = client
        .get(format!("{}/fixtures?page=2&limit=2", app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    let body: serde_json::Value = response.json().await.expect("Cannot parse body.");
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["venue"], "Late pitch");
    assert_eq!(body["pagination"]["has_next"], false);
    assert_eq!(body["pagination"]["has_prev"], true);
}

#[tokio::test]
async fn get_fixture_returns_slots_with_occupant_profiles() {
    let app = spawn_app().await;
    let (_, admin_token) = create_admin(&app).await;
    let (player_id, player_token) = create_player(&app).await;
    let client = Client::new();

    let fixture_id = create_fixture(&app, &admin_token, "5").await;

    let response = common::utils::book_slot(&app, &player_token, fixture_id, "A", "GK").await;
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/fixtures/{}", app.address, fixture_id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Cannot parse body.");
    assert_eq!(body["fixture"]["id"], fixture_id.to_string());

    let slots = body["slots"].as_array().expect("slots is not an array");
    // 7 per team for 5-a-side
    assert_eq!(slots.len(), 14);

    let goalkeeper = slots
        .iter()
        .find(|s| s["team"] == "A" && s["position_code"] == "GK")
        .expect("GK slot missing");
    let occupant = &goalkeeper["occupant"];
    assert_eq!(occupant["id"], player_id.to_string());
    // Default skills are all 100, so the derived overall is 100
    assert_eq!(occupant["overall"], 100);
    // The password hash must never be serialized
    assert!(occupant.get("password_hash").is_none());

    let vacant = slots
        .iter()
        .find(|s| s["team"] == "B" && s["position_code"] == "GK")
        .expect("team B GK slot missing");
    assert!(vacant["occupant"].is_null());
}

#[tokio::test]
async fn get_missing_fixture_returns_not_found() {
    let app = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/fixtures/{}", app.address, uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_fixture_cascades_to_slots_and_stats() {
    let app = spawn_app().await;
    let (_, admin_token) = create_admin(&app).await;
    let (player_id, _) = create_player(&app).await;
    let client = Client::new();

    let fixture_id = create_fixture(&app, &admin_token, "5").await;

    let response = common::utils::submit_results(
        &app,
        &admin_token,
        fixture_id,
        &json!({
            "match_stats": { "shots_a": 5 },
            "players_stats": [{ "user_id": player_id, "team": "A", "goals": 1 }]
        }),
    )
    .await;
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/admin/fixtures/{}", app.address, fixture_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    for table in ["fixture_slots", "match_stats", "player_match_stats"] {
        let remaining: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {} WHERE fixture_id = $1",
            table
        ))
        .bind(fixture_id)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count rows.");
        assert_eq!(remaining, 0, "{} rows not cleaned up", table);
    }

    let response = client
        .get(format!("{}/fixtures/{}", app.address, fixture_id))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_fixture_requires_admin_role() {
    let app = spawn_app().await;
    let (_, admin_token) = create_admin(&app).await;
    let (_, player_token) = create_player(&app).await;
    let client = Client::new();

    let fixture_id = create_fixture(&app, &admin_token, "5").await;

    let response = client
        .delete(format!("{}/admin/fixtures/{}", app.address, fixture_id))
        .bearer_auth(player_token)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 403);
}
