// tests/profile_tests.rs

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use elearn_backend::{
    config::Config,
    models::profile::LearnerProfile,
    routes, seed,
    state::AppState,
    store::InMemoryStore,
    utils::jwt::sign_jwt,
};
use serde_json::{Value, json};
use tower::ServiceExt;

const TEST_SECRET: &str = "profile_test_secret";

fn test_config() -> Config {
    Config {
        jwt_secret: TEST_SECRET.to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        dataset_path: None,
        scoring_service_url: None,
    }
}

/// Builds state over the demo catalog plus one freshly registered learner.
async fn test_state(learner_id: &str) -> AppState {
    let store = InMemoryStore::from_dataset(seed::demo_dataset()).unwrap();
    let mut learner = LearnerProfile::new(learner_id, "Test Learner", &format!("{}@demo.com", learner_id));
    learner.interests = vec!["Java".to_string()];
    store.insert_profile(learner).await.unwrap();
    AppState::in_memory(store, test_config())
}

async fn spawn_app(learner_id: &str) -> String {
    let app = routes::create_router(test_state(learner_id).await);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn fresh_learner_id() -> String {
    format!("u_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

#[tokio::test]
async fn test_profile_complex_flow() {
    // Arrange
    let learner = fresh_learner_id();
    let address = spawn_app(&learner).await;
    let client = reqwest::Client::new();
    let token = sign_jwt(&learner, TEST_SECRET, 600).unwrap();

    // 1. Enroll, then enroll again (no-op)
    let res = client
        .post(&format!("{}/api/enrollments/c_java", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 201);

    let res = client
        .post(&format!("{}/api/enrollments/c_java", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);

    // 2. Complete the first module
    let res = client
        .post(&format!(
            "{}/api/enrollments/c_java/modules/m_c_java_1/complete",
            address
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["progress"], 25);
    assert_eq!(body["points"], 5);
    assert_eq!(body["badges"], json!(["Course Starter"]));

    // 3. Repeating a module keeps progress but still awards points
    let body: Value = client
        .post(&format!(
            "{}/api/enrollments/c_java/modules/m_c_java_1/complete",
            address
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["progress"], 25);
    assert_eq!(body["points"], 10);

    // 4. Finish the course
    for n in 2..=4 {
        let res = client
            .post(&format!(
                "{}/api/enrollments/c_java/modules/m_c_java_{}/complete",
                address, n
            ))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 200);
    }

    // 5. Unknown module is a 404
    let res = client
        .post(&format!(
            "{}/api/enrollments/c_java/modules/m_c_dsa_1/complete",
            address
        ))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);

    // 6. Profile reflects progress, badges and today's activity
    let me: Value = client
        .get(&format!("{}/api/profile/me", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(me["id"], learner.as_str());
    assert_eq!(me["points"], 25);
    assert_eq!(me["streak"], 1);
    let badges = me["badges"].as_array().unwrap();
    assert!(badges.contains(&json!("Course Starter")));
    assert!(badges.contains(&json!("Course Master")));
    assert_eq!(me["courses"][0]["courseId"], "c_java");
    assert_eq!(me["courses"][0]["progress"], 100);
    assert!(me["courses"][0]["lastScore"].is_null());

    let week = me["weeklyActivity"].as_array().unwrap();
    assert_eq!(week.len(), 7);
    assert_eq!(week[6]["count"], 1);
    assert_eq!(week[0]["count"], 0);

    // 7. Unenroll keeps points and badges
    let res = client
        .delete(&format!("{}/api/enrollments/c_java", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 204);

    let me: Value = client
        .get(&format!("{}/api/profile/me", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["points"], 25);
    assert!(me["enrollments"].get("c_java").is_none());
    assert!(me["badges"].as_array().unwrap().contains(&json!("Course Master")));
}

#[tokio::test]
async fn enrolling_in_unknown_course_is_404() {
    let learner = fresh_learner_id();
    let address = spawn_app(&learner).await;
    let client = reqwest::Client::new();
    let token = sign_jwt(&learner, TEST_SECRET, 600).unwrap();

    let res = client
        .post(&format!("{}/api/enrollments/c_cobol", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn update_preferences_validates_and_normalizes() {
    let learner = fresh_learner_id();
    let address = spawn_app(&learner).await;
    let client = reqwest::Client::new();
    let token = sign_jwt(&learner, TEST_SECRET, 600).unwrap();

    // Invalid: empty name
    let res = client
        .patch(&format!("{}/api/profile/me", address))
        .bearer_auth(&token)
        .json(&json!({ "name": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);

    // Invalid: goal too large
    let res = client
        .patch(&format!("{}/api/profile/me", address))
        .bearer_auth(&token)
        .json(&json!({ "dailyGoalMin": 1000 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 400);

    // Valid: interests are trimmed and de-duplicated
    let res = client
        .patch(&format!("{}/api/profile/me", address))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Renamed",
            "interests": [" DSA ", "DSA", "Cloud"],
            "dailyGoalMin": 45
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let profile: Value = res.json().await.unwrap();
    assert_eq!(profile["name"], "Renamed");
    assert_eq!(profile["interests"], json!(["DSA", "Cloud"]));
    assert_eq!(profile["dailyGoalMin"], 45);
    assert_eq!(profile["points"], 0);
}

#[tokio::test]
async fn recommendations_are_capped_and_ranked() {
    let learner = fresh_learner_id();
    let address = spawn_app(&learner).await;
    let client = reqwest::Client::new();
    let token = sign_jwt(&learner, TEST_SECRET, 600).unwrap();

    let res = client
        .get(&format!("{}/api/profile/recommendations", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);

    let recs: Value = res.json().await.unwrap();
    let recs = recs.as_array().unwrap();
    assert_eq!(recs.len(), 4);

    let scores: Vec<f64> = recs.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));

    // An interest in Java puts a Java course first.
    let top_tags = recs[0]["course"]["tags"].as_array().unwrap();
    assert!(top_tags.contains(&json!("Java")));
    assert_eq!(recs[0]["factors"]["interestMatch"], 0.5);
}

#[tokio::test]
async fn me_without_token_is_unauthorized_oneshot() {
    let app = routes::create_router(test_state(&fresh_learner_id()).await);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_unknown_learner_is_404_oneshot() {
    let app = routes::create_router(test_state(&fresh_learner_id()).await);
    let token = sign_jwt("u_ghost", TEST_SECRET, 600).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile/me")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
