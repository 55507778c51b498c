//! Scénario de bout en bout : upload → diffusion → téléchargement → cache hit

use adscache::{FetchOutcome, MediaCache};
use adsdevice::DeviceAgent;
use adsserver::{screen_routes, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn spawn_server() -> (SocketAddr, AppState, tempfile::TempDir) {
    let media_dir = tempfile::tempdir().unwrap();
    let state = AppState::new(media_dir.path());

    let app = screen_routes(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    (addr, state, media_dir)
}

async fn wait_for_file(cache: &MediaCache, filename: &str) {
    for _ in 0..100 {
        if cache.contains(filename) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("file {filename} never arrived in {}", cache.storage_dir().display());
}

#[tokio::test]
async fn upload_reaches_two_devices_and_skips_duplicates() {
    let (addr, state, _media_dir) = spawn_server().await;

    // Deux écrans pilotés par l'agent, chacun avec son propre stockage
    let storage1 = tempfile::tempdir().unwrap();
    let storage2 = tempfile::tempdir().unwrap();
    let cache1 = Arc::new(MediaCache::new(storage1.path(), format!("http://{addr}"), 15).unwrap());
    let cache2 = Arc::new(MediaCache::new(storage2.path(), format!("http://{addr}"), 15).unwrap());

    let agent1 = Arc::new(DeviceAgent::new(
        "SCREEN-101",
        format!("ws://{addr}/ws"),
        cache1.clone(),
    ));
    let agent2 = Arc::new(DeviceAgent::new(
        "SCREEN-102",
        format!("ws://{addr}/ws"),
        cache2.clone(),
    ));
    tokio::spawn({
        let agent = agent1.clone();
        async move { agent.run().await }
    });
    tokio::spawn({
        let agent = agent2.clone();
        async move { agent.run().await }
    });

    // Un troisième écran en cours de déconnexion au moment de l'upload
    let (mut doomed, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(state.registry.count(), 3);
    doomed.close(None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(state.registry.count(), 2);

    // Upload d'un média de 500 KB : exactement 2 écrans notifiés
    let payload: Vec<u8> = (0..500 * 1024).map(|i| (i % 251) as u8).collect();
    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(payload.clone()).file_name("ad1.png"),
    );
    let body: serde_json::Value = reqwest::Client::new()
        .post(format!("http://{addr}/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["notified_screens"], 2);

    // Chaque écran télécharge le fichier complet
    wait_for_file(&cache1, "ad1.png").await;
    wait_for_file(&cache2, "ad1.png").await;
    assert_eq!(std::fs::read(cache1.local_path("ad1.png")).unwrap(), payload);
    assert_eq!(std::fs::read(cache2.local_path("ad1.png")).unwrap(), payload);

    // Une notification dupliquée est un pur cache hit sur les deux écrans
    assert_eq!(cache1.fetch("ad1.png").await.unwrap(), FetchOutcome::Hit);
    agent2.handle_message("NEW_CONTENT:ad1.png").await;
    assert_eq!(cache2.fetch("ad1.png").await.unwrap(), FetchOutcome::Hit);
    assert_eq!(std::fs::read(cache2.local_path("ad1.png")).unwrap(), payload);
}

#[tokio::test]
async fn unknown_messages_do_not_disturb_the_agent() {
    let (addr, _state, _media_dir) = spawn_server().await;

    let storage = tempfile::tempdir().unwrap();
    let cache = Arc::new(MediaCache::new(storage.path(), format!("http://{addr}"), 15).unwrap());
    let agent = DeviceAgent::new("SCREEN-103", format!("ws://{addr}/ws"), cache.clone());

    // Heartbeat et notification vide : tracés, jamais de téléchargement
    agent.handle_message("hello").await;
    agent.handle_message("NEW_CONTENT:   ").await;
    assert!(std::fs::read_dir(storage.path()).unwrap().next().is_none());
}
