mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn log_create_then_list_round_trip() -> Result<()> {
    let Some(server) = common::try_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let alice = common::signup(server, &client, "alice").await?;

    common::create_log(server, &client, &alice, "run", &[]).await?;

    let res = client
        .post(format!("{}/api/logs", server.base_url))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let records = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["entry"], "run");
    assert_eq!(records[0]["user_id"], alice.user_id.as_str());
    assert!(records[0]["habits_info"].as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn log_join_omits_deleted_habits() -> Result<()> {
    let Some(server) = common::try_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let alice = common::signup(server, &client, "alice").await?;

    let h1 = common::create_habit(server, &client, &alice, "stretch").await?;
    let h2 = common::create_habit(server, &client, &alice, "meditate").await?;
    let log_id =
        common::create_log(server, &client, &alice, "morning", &[h1.as_str(), h2.as_str()]).await?;

    let log_url = format!("{}/api/logs/{}", server.base_url, log_id);

    let res = client.get(&log_url).bearer_auth(&alice.token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["habits_info"].as_array().unwrap().len(), 2);

    // Remove one referenced habit; the join tolerates the dangling id
    let res = client
        .delete(format!("{}/api/habits/{}", server.base_url, h2))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(&log_url).bearer_auth(&alice.token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;

    let habits_info = body["habits_info"].as_array().unwrap();
    assert_eq!(habits_info.len(), 1);
    assert_eq!(habits_info[0]["id"], h1.as_str());
    // The raw id set still carries both references
    assert_eq!(body["habits"].as_array().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn get_one_scopes_by_owner() -> Result<()> {
    let Some(server) = common::try_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let alice = common::signup(server, &client, "alice").await?;
    let bob = common::signup(server, &client, "bob").await?;

    let log_id = common::create_log(server, &client, &alice, "run", &[]).await?;
    let log_url = format!("{}/api/logs/{}", server.base_url, log_id);

    // Another user's record is indistinguishable from a missing one
    let res = client.get(&log_url).bearer_auth(&bob.token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.get(&log_url).bearer_auth(&alice.token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn list_never_exceeds_the_page_cap() -> Result<()> {
    let Some(server) = common::try_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let alice = common::signup(server, &client, "pager").await?;

    for i in 0..12 {
        common::create_log(server, &client, &alice, &format!("entry {}", i), &[]).await?;
    }

    let res = client
        .post(format!("{}/api/logs", server.base_url))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    let records = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(records.len(), 10);
    Ok(())
}

#[tokio::test]
async fn update_replaces_mutable_fields_only() -> Result<()> {
    let Some(server) = common::try_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let alice = common::signup(server, &client, "alice").await?;

    let log_id = common::create_log(server, &client, &alice, "run", &[]).await?;
    let log_url = format!("{}/api/logs/{}", server.base_url, log_id);

    // A body that tries to smuggle a new owner changes nothing but the
    // allow-listed fields
    let res = client
        .put(&log_url)
        .bearer_auth(&alice.token)
        .json(&serde_json::json!({
            "entry": "walk",
            "habits": [],
            "user_id": "00000000-0000-0000-0000-000000000000"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let ack = res.json::<serde_json::Value>().await?;
    assert_eq!(ack["matched_count"], 1);

    let res = client.get(&log_url).bearer_auth(&alice.token).send().await?;
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["entry"], "walk");
    assert_eq!(body["user_id"], alice.user_id.as_str());
    Ok(())
}

#[tokio::test]
async fn invalid_record_id_is_bad_request() -> Result<()> {
    let Some(server) = common::try_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let alice = common::signup(server, &client, "alice").await?;

    let res = client
        .get(format!("{}/api/logs/not-a-uuid", server.base_url))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn undecodable_body_is_bad_request() -> Result<()> {
    let Some(server) = common::try_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let alice = common::signup(server, &client, "alice").await?;

    let res = client
        .post(format!("{}/api/logs/create", server.base_url))
        .bearer_auth(&alice.token)
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("error").is_some());
    Ok(())
}

#[tokio::test]
async fn habit_and_identity_crud_round_trip() -> Result<()> {
    let Some(server) = common::try_server().await else { return Ok(()) };
    let client = reqwest::Client::new();
    let alice = common::signup(server, &client, "alice").await?;

    let habit_id = common::create_habit(server, &client, &alice, "read").await?;

    // Group the habit under a new identity
    let res = client
        .post(format!("{}/api/identities/create", server.base_url))
        .bearer_auth(&alice.token)
        .json(&serde_json::json!({
            "name": "reader",
            "description": "someone who reads daily",
            "habits": [habit_id]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let identity_id = res.json::<serde_json::Value>().await?["inserted_id"]
        .as_str()
        .unwrap()
        .to_string();

    // Point the habit back at its identity
    let res = client
        .put(format!("{}/api/habits/{}", server.base_url, habit_id))
        .bearer_auth(&alice.token)
        .json(&serde_json::json!({
            "name": "read",
            "description": "30 pages",
            "identity": identity_id
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/habits/{}", server.base_url, habit_id))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    let habit = res.json::<serde_json::Value>().await?;
    assert_eq!(habit["description"], "30 pages");
    assert_eq!(habit["identity"], identity_id.as_str());
    assert_eq!(habit["user_id"], alice.user_id.as_str());

    let res = client
        .get(format!("{}/api/identities/{}", server.base_url, identity_id))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    let identity = res.json::<serde_json::Value>().await?;
    assert_eq!(identity["habits"].as_array().unwrap().len(), 1);

    // Delete and confirm the 404
    let res = client
        .delete(format!("{}/api/identities/{}", server.base_url, identity_id))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    assert_eq!(res.json::<serde_json::Value>().await?["deleted_count"], 1);

    let res = client
        .get(format!("{}/api/identities/{}", server.base_url, identity_id))
        .bearer_auth(&alice.token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
