mod common;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

async fn register(client: &Client, base: &str, name: &str, email: &str) -> Result<String> {
    let res = client
        .post(format!("{}/api/users", base))
        .json(&json!({ "name": name, "email": email, "password": "secret1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    Ok(body["data"]["token"].as_str().expect("token").to_string())
}

async fn whoami(client: &Client, base: &str, token: &str) -> Result<Value> {
    let res = client
        .get(format!("{}/api/auth", base))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(res.json::<Value>().await?["data"].clone())
}

/// Registration, login outcomes, posting, like toggling, and comment
/// ownership - the full request path against a live database.
#[tokio::test]
async fn end_to_end_scenario() -> Result<()> {
    if !common::database_available() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let base = server.base_url.as_str();
    let client = Client::new();

    // Unique emails so the test can rerun against the same database
    let run = unique_suffix();
    let alice_email = format!("alice-{}@example.com", run);
    let bob_email = format!("bob-{}@example.com", run);

    // Register Alice, then Bob
    let alice_token = register(&client, base, "Alice", &alice_email).await?;
    let bob_token = register(&client, base, "Bob", &bob_email).await?;
    let bob_id = whoami(&client, base, &bob_token).await?["id"]
        .as_str()
        .expect("id")
        .to_string();

    // Duplicate registration is refused
    let res = client
        .post(format!("{}/api/users", base))
        .json(&json!({ "name": "Alice", "email": alice_email, "password": "secret1" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Wrong password and unknown email produce identical outcomes
    let wrong_password = client
        .post(format!("{}/api/auth/login", base))
        .json(&json!({ "email": alice_email, "password": "wrong-password" }))
        .send()
        .await?;
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    let wrong_password = wrong_password.json::<Value>().await?;

    let unknown_email = client
        .post(format!("{}/api/auth/login", base))
        .json(&json!({ "email": format!("nobody-{}@example.com", run), "password": "secret1" }))
        .send()
        .await?;
    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    let unknown_email = unknown_email.json::<Value>().await?;

    assert_eq!(wrong_password["message"], unknown_email["message"]);
    assert_eq!(wrong_password["message"], "invalid credentials");

    // Alice creates a post; creation answers plain 200 like the rest of the API
    let res = client
        .post(format!("{}/api/posts", base))
        .bearer_auth(&alice_token)
        .json(&json!({ "text": "hello devnet" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let post = res.json::<Value>().await?["data"].clone();
    let post_id = post["id"].as_str().expect("post id").to_string();

    // Posting without text fails validation
    let res = client
        .post(format!("{}/api/posts", base))
        .bearer_auth(&alice_token)
        .json(&json!({ "text": "" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["field_errors"]["text"], "Text is required");

    // Bob likes the post: exactly one like, owned by Bob, at the front
    let res = client
        .put(format!("{}/api/posts/{}/like", base, post_id))
        .bearer_auth(&bob_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let likes = res.json::<Value>().await?["data"].clone();
    assert_eq!(likes.as_array().map(Vec::len), Some(1));
    assert_eq!(likes[0]["user"], bob_id.as_str());

    // Bob likes again: toggle removes his like
    let res = client
        .put(format!("{}/api/posts/{}/like", base, post_id))
        .bearer_auth(&bob_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let likes = res.json::<Value>().await?["data"].clone();
    assert_eq!(likes.as_array().map(Vec::len), Some(0));

    // Bob comments; Alice may not remove Bob's comment
    let res = client
        .post(format!("{}/api/posts/{}/comments", base, post_id))
        .bearer_auth(&bob_token)
        .json(&json!({ "text": "nice post" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let post_with_comment = res.json::<Value>().await?["data"].clone();
    let comment_id = post_with_comment["comments"][0]["id"]
        .as_str()
        .expect("comment id")
        .to_string();

    let res = client
        .delete(format!("{}/api/posts/{}/comments/{}", base, post_id, comment_id))
        .bearer_auth(&alice_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // The comment list is unchanged
    let res = client
        .get(format!("{}/api/posts/{}", base, post_id))
        .bearer_auth(&alice_token)
        .send()
        .await?;
    let post = res.json::<Value>().await?["data"].clone();
    assert_eq!(post["comments"].as_array().map(Vec::len), Some(1));

    // Removing an unknown comment is an error
    let res = client
        .delete(format!(
            "{}/api/posts/{}/comments/7d3e1a52-0b54-4a7e-9e37-5f2b1f6d9c01",
            base, post_id
        ))
        .bearer_auth(&bob_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Bob removes his own comment
    let res = client
        .delete(format!("{}/api/posts/{}/comments/{}", base, post_id, comment_id))
        .bearer_auth(&bob_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let comments = res.json::<Value>().await?["data"].clone();
    assert_eq!(comments.as_array().map(Vec::len), Some(0));

    // Only the owner may delete the post itself
    let res = client
        .delete(format!("{}/api/posts/{}", base, post_id))
        .bearer_auth(&bob_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Profile upsert plus the experience list's silent-miss removal contract.
#[tokio::test]
async fn profile_and_experience_flow() -> Result<()> {
    if !common::database_available() {
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let base = server.base_url.as_str();
    let client = Client::new();

    let email = format!("carol-{}@example.com", unique_suffix());
    let token = register(&client, base, "Carol", &email).await?;

    // No profile yet
    let res = client
        .get(format!("{}/api/profile/me", base))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Create, then update in place (upsert keyed by owner)
    let res = client
        .post(format!("{}/api/profile", base))
        .bearer_auth(&token)
        .json(&json!({ "status": "Developer", "skills": "rust, sql" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let profile = res.json::<Value>().await?["data"].clone();
    assert_eq!(profile["skills"], json!(["rust", "sql"]));

    let res = client
        .post(format!("{}/api/profile", base))
        .bearer_auth(&token)
        .json(&json!({ "status": "Senior Developer", "skills": "rust" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?["data"].clone();
    assert_eq!(updated["id"], profile["id"]);
    assert_eq!(updated["status"], "Senior Developer");

    // Add two experience entries; the newer one sits at the front
    for title in ["First role", "Second role"] {
        let res = client
            .put(format!("{}/api/profile/experience", base))
            .bearer_auth(&token)
            .json(&json!({ "title": title, "company": "Acme", "from": "2020-01-01" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = client
        .get(format!("{}/api/profile/me", base))
        .bearer_auth(&token)
        .send()
        .await?;
    let me = res.json::<Value>().await?["data"].clone();
    let experience = me["experience"].as_array().expect("experience").clone();
    assert_eq!(experience.len(), 2);
    assert_eq!(experience[0]["title"], "Second role");
    let exp_id = experience[1]["id"].as_str().expect("exp id").to_string();

    // Removing an entry that does not exist is a silent no-op
    let res = client
        .delete(format!(
            "{}/api/profile/experience/7d3e1a52-0b54-4a7e-9e37-5f2b1f6d9c01",
            base
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let profile = res.json::<Value>().await?["data"].clone();
    assert_eq!(profile["experience"].as_array().map(Vec::len), Some(2));

    // Removing a real entry takes exactly that one
    let res = client
        .delete(format!("{}/api/profile/experience/{}", base, exp_id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let profile = res.json::<Value>().await?["data"].clone();
    let experience = profile["experience"].as_array().expect("experience");
    assert_eq!(experience.len(), 1);
    assert_eq!(experience[0]["title"], "Second role");

    Ok(())
}

fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    format!("{}-{}", std::process::id(), nanos)
}
