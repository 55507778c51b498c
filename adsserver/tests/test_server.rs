use adsserver::{screen_routes, screens_api_router, AppState};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;

async fn spawn_server() -> (SocketAddr, AppState, tempfile::TempDir) {
    let media_dir = tempfile::tempdir().unwrap();
    let state = AppState::new(media_dir.path());

    let app = screen_routes(state.clone()).merge(screens_api_router(state.clone()));
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

async fn connect_screen(
    addr: SocketAddr,
) -> tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
> {
    let (stream, _response) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .expect("websocket handshake");
    stream
}

async fn expect_text(
    stream: &mut tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >,
) -> String {
    let msg = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .expect("notification within 5s")
        .expect("stream still open")
        .expect("no transport error");
    msg.into_text().expect("text frame").to_string()
}

#[tokio::test]
async fn upload_notifies_live_screens_and_counts_them() {
    let (addr, state, _media_dir) = spawn_server().await;

    let mut screen1 = connect_screen(addr).await;
    let mut screen2 = connect_screen(addr).await;
    let mut screen3 = connect_screen(addr).await;

    // Le troisième écran se déconnecte juste avant l'upload
    screen3.close(None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(state.registry.count(), 2);

    // Upload d'un média de 500 KB
    let payload: Vec<u8> = (0..500 * 1024).map(|i| (i % 251) as u8).collect();
    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(payload.clone()).file_name("ad1.png"),
    );
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "uploaded");
    assert_eq!(body["filename"], "ad1.png");
    assert_eq!(body["file_url"], "/media/ad1.png");
    assert_eq!(body["file_size_kb"], 500.0);
    assert_eq!(body["notified_screens"], 2);

    // Les deux écrans vivants reçoivent le message filaire
    assert_eq!(expect_text(&mut screen1).await, "NEW_CONTENT:ad1.png");
    assert_eq!(expect_text(&mut screen2).await, "NEW_CONTENT:ad1.png");

    // Le fichier stocké est servi tel quel
    let served = reqwest::get(format!("http://{addr}/media/ad1.png"))
        .await
        .unwrap();
    assert!(served.status().is_success());
    assert_eq!(served.bytes().await.unwrap().as_ref(), payload.as_slice());
}

#[tokio::test]
async fn inbound_text_is_heartbeat_not_disconnect() {
    let (addr, state, _media_dir) = spawn_server().await;

    let mut screen = connect_screen(addr).await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(state.registry.count(), 1);

    // Un heartbeat arbitraire ne ferme pas la connexion
    screen
        .send(Message::Text("hello from SCREEN-101".into()))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(state.registry.count(), 1);

    // La connexion reçoit toujours les diffusions
    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(vec![1u8, 2, 3]).file_name("ping.png"),
    );
    reqwest::Client::new()
        .post(format!("http://{addr}/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(expect_text(&mut screen).await, "NEW_CONTENT:ping.png");
}

#[tokio::test]
async fn screens_api_lists_live_connections() {
    let (addr, _state, _media_dir) = spawn_server().await;

    let _screen1 = connect_screen(addr).await;
    let _screen2 = connect_screen(addr).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let screens: serde_json::Value = reqwest::get(format!("http://{addr}/screens"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(screens.as_array().unwrap().len(), 2);

    let status: serde_json::Value = reqwest::get(format!("http://{addr}/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["status"], "online");
    assert_eq!(status["connected_screens"], 2);
}

#[tokio::test]
async fn upload_rejects_traversal_filenames() {
    let (addr, _state, media_dir) = spawn_server().await;

    let form = reqwest::multipart::Form::new().part(
        "file",
        reqwest::multipart::Part::bytes(vec![0u8; 16]).file_name("a/b.png"),
    );
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert!(std::fs::read_dir(media_dir.path()).unwrap().next().is_none());
}
