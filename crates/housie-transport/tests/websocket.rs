//! Integration tests for the WebSocket transport.
//!
//! These spin up a real listener and a tokio-tungstenite client to
//! verify that frames actually flow over the network.

use futures_util::{SinkExt, StreamExt};
use housie_transport::WebSocketListener;
use tokio_tungstenite::tungstenite::Message;

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

async fn connect_client(addr: &str) -> ClientWs {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("client should connect");
    ws
}

#[tokio::test]
async fn test_accept_and_send_receive() {
    // Port 0: let the OS pick one, then read it back.
    let mut listener = WebSocketListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let server_handle =
        tokio::spawn(async move { listener.accept().await.expect("accept") });
    let mut client_ws = connect_client(&addr).await;
    let server_conn = server_handle.await.expect("accept task");

    assert!(server_conn.id().into_inner() > 0);

    server_conn
        .send(b"hello from server")
        .await
        .expect("send should succeed");
    let msg = client_ws.next().await.unwrap().unwrap();
    assert_eq!(msg.into_data().as_ref(), b"hello from server");

    client_ws
        .send(Message::Binary(b"hello from client".to_vec().into()))
        .await
        .unwrap();
    let received = server_conn
        .recv()
        .await
        .expect("recv should succeed")
        .expect("should have data");
    assert_eq!(received, b"hello from client");

    server_conn.close().await.expect("close should succeed");
}

#[tokio::test]
async fn test_recv_returns_none_on_client_close() {
    let mut listener = WebSocketListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let server_handle =
        tokio::spawn(async move { listener.accept().await.expect("accept") });
    let mut client_ws = connect_client(&addr).await;
    let server_conn = server_handle.await.unwrap();

    client_ws.send(Message::Close(None)).await.unwrap();

    let result = server_conn.recv().await.expect("recv should not error");
    assert!(result.is_none(), "should return None on client close");
}

#[tokio::test]
async fn test_text_frames_are_delivered_as_bytes() {
    let mut listener = WebSocketListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let server_handle =
        tokio::spawn(async move { listener.accept().await.expect("accept") });
    let mut client_ws = connect_client(&addr).await;
    let server_conn = server_handle.await.unwrap();

    client_ws
        .send(Message::Text(r#"{"type":"StartRound"}"#.into()))
        .await
        .unwrap();

    let received = server_conn.recv().await.unwrap().unwrap();
    assert_eq!(received, br#"{"type":"StartRound"}"#);
}

#[tokio::test]
async fn test_send_while_recv_is_pending() {
    // The halves are split: a clone must be able to send while the
    // original sits blocked in recv.
    let mut listener = WebSocketListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let server_handle =
        tokio::spawn(async move { listener.accept().await.expect("accept") });
    let mut client_ws = connect_client(&addr).await;
    let server_conn = server_handle.await.unwrap();

    let reader = server_conn.clone();
    let recv_task = tokio::spawn(async move { reader.recv().await });

    // Sending must complete even though recv holds the source lock.
    server_conn.send(b"pushed mid-recv").await.expect("send");
    let msg = client_ws.next().await.unwrap().unwrap();
    assert_eq!(msg.into_data().as_ref(), b"pushed mid-recv");

    client_ws
        .send(Message::Binary(b"reply".to_vec().into()))
        .await
        .unwrap();
    let received = recv_task.await.unwrap().unwrap().unwrap();
    assert_eq!(received, b"reply");
}

#[tokio::test]
async fn test_connection_ids_are_distinct() {
    let mut listener = WebSocketListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let server_handle = tokio::spawn(async move {
        let a = listener.accept().await.expect("accept");
        let b = listener.accept().await.expect("accept");
        (a, b)
    });
    let _c1 = connect_client(&addr).await;
    let _c2 = connect_client(&addr).await;
    let (a, b) = server_handle.await.unwrap();

    assert_ne!(a.id(), b.id());
}
