use crate::helpers::test_app::TestApp;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/health", app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!("healthy".to_string(), response.text().await.unwrap());
}

#[tokio::test]
async fn metrics_are_exposed() {
    let game = TestApp::create_game_without_players(false).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{}/metrics", game.app.base_address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("tictacgo_active_games"));
    assert!(body.contains("tictacgo_connected_players"));
    assert!(body.contains("tictacgo_finished_games"));
}
