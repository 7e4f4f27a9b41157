use std::sync::{Arc, Once};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use monitor_core::{progress_endpoint, ChannelSettings, Stage};
use monitor_engine::{ChannelHandle, WebSocketTransport};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(monitor_logging::initialize_for_tests);
}

#[tokio::test]
async fn websocket_transport_streams_progress_and_heartbeats() {
    init_logging();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        ws.send(Message::Text(
            r#"{"stage":"processing","current_video":"intro.mp4","total_videos":4}"#.into(),
        ))
        .await
        .unwrap();
        ws.send(Message::Text("not json".into())).await.unwrap();

        // Wait for the client's heartbeat and acknowledge it.
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) if text == "ping" => break,
                Some(Ok(_)) => continue,
                other => panic!("unexpected frame: {other:?}"),
            }
        }
        ws.send(Message::Text("pong".into())).await.unwrap();
        ws.send(Message::Text(r#"{"video_index":1}"#.into()))
            .await
            .unwrap();
        ws
    });

    let mut settings = ChannelSettings::new(progress_endpoint(&format!("http://{addr}")).unwrap());
    settings.heartbeat_interval = Duration::from_millis(50);
    let handle = ChannelHandle::spawn(settings, Arc::new(WebSocketTransport));
    handle.connect();

    let mut store = handle.subscribe();
    tokio::time::timeout(
        Duration::from_secs(5),
        store.wait_for(|store| store.snapshot().video_index == 1),
    )
    .await
    .expect("progress within 5s")
    .unwrap();

    let snapshot = handle.store().snapshot().clone();
    assert_eq!(snapshot.stage, Stage::Processing);
    assert_eq!(snapshot.current_video.as_deref(), Some("intro.mp4"));
    assert_eq!(snapshot.total_videos, 4);
    assert!(handle.is_connected());

    let _ws = server.await.unwrap();
    handle.shutdown().await;
}

#[tokio::test]
async fn websocket_transport_reports_refused_handshake() {
    init_logging();
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let mut settings = ChannelSettings::new(progress_endpoint(&format!("http://{addr}")).unwrap());
    settings.reconnect_base_delay = Duration::from_millis(10);
    settings.max_reconnect_attempts = 2;
    let handle = ChannelHandle::spawn(settings, Arc::new(WebSocketTransport));
    handle.connect();

    let mut status = handle.subscribe_status();
    tokio::time::timeout(
        Duration::from_secs(5),
        status.wait_for(|status| status.reconnect_attempts == 2),
    )
    .await
    .expect("retries within 5s")
    .unwrap();
    assert!(!handle.is_connected());
    handle.shutdown().await;
}
