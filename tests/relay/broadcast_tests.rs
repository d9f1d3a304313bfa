//! Room-scoped fan-out tests

use pretty_assertions::assert_eq;
use room_relay::config::Settings;

use crate::common::{TestApp, TestClient};

/// A and B in "lobby", C left in the default room.
async fn lobby_pair_and_bystander(app: &TestApp) -> (TestClient, TestClient, TestClient) {
    let mut a = app.connect().await;
    let mut b = app.connect().await;
    let c = app.connect().await;

    a.join_room("lobby").await;
    b.join_room("lobby").await;
    // A sees B arrive.
    a.next_frame().await;

    (a, b, c)
}

#[tokio::test]
async fn test_delivery_is_scoped_to_room() {
    let app = TestApp::new();
    let (mut a, mut b, mut c) = lobby_pair_and_bystander(&app).await;

    a.send(r#"{"clientName":"Alice","text":"hello lobby","room":"lobby"}"#);

    assert!(a.next_frame().await.contains("hello lobby"));
    assert!(b.next_frame().await.contains("hello lobby"));
    c.assert_silent().await;
}

#[tokio::test]
async fn test_sender_copy_carries_self_marker() {
    let app = TestApp::new();
    let (mut a, mut b, _c) = lobby_pair_and_bystander(&app).await;

    a.send(r#"{"clientName":"Alice","text":"marked"}"#);

    let own = a.next_frame().await;
    let other = b.next_frame().await;
    assert_ne!(own, other);
    assert!(own.contains(r#"class="message me""#));
    assert!(other.contains(r#"class="message them""#));
    assert_eq!(own.replacen("message me", "message them", 1), other);
}

#[tokio::test]
async fn test_room_choice_persists() {
    let app = TestApp::new();
    let (mut a, mut b, mut c) = lobby_pair_and_bystander(&app).await;

    a.send(r#"{"text":"no room given"}"#);

    let frame = b.next_frame().await;
    assert!(frame.contains("no room given"));
    assert!(frame.contains(r#"data-room="lobby""#));
    a.next_frame().await;
    c.assert_silent().await;
}

#[tokio::test]
async fn test_new_connection_defaults_to_chatroom() {
    let app = TestApp::new();
    let mut listener = app.connect().await;
    let bob = app.connect().await;

    bob.send(r#"{"smt":"Bob","text":"yo"}"#);

    let frame = listener.next_frame().await;
    assert!(frame.contains(r#"<span class="sender">Bob</span>"#));
    assert!(frame.contains(r#"<p class="text">yo</p>"#));
    assert!(frame.contains(r#"data-room="chatroom""#));
    assert_eq!(app.state.registry.room_of(bob.id), "chatroom");
}

#[tokio::test]
async fn test_alice_scenario() {
    let app = TestApp::new();
    let mut alice = app.connect().await;

    alice.send(r#"{"clientName":"Alice","text":"  hi  ","room":"lobby"}"#);

    let frame = alice.next_frame().await;
    assert!(frame.contains(r#"<span class="sender">Alice</span>"#));
    assert!(frame.contains(r#"<p class="text">hi</p>"#));
    assert!(frame.contains(r#"data-room="lobby""#));
    assert_eq!(app.state.registry.room_of(alice.id), "lobby");
}

#[tokio::test]
async fn test_blank_and_malformed_payloads_are_dropped() {
    let app = TestApp::new();
    let mut a = app.connect().await;
    let mut b = app.connect().await;

    a.send(r#"{"text":"   "}"#);
    a.send(r#"{"text":"","room":"elsewhere"}"#);
    a.send("definitely not json");
    a.send(r#"{"text":["array"]}"#);

    a.assert_silent().await;
    b.assert_silent().await;
    assert_eq!(app.state.registry.room_of(a.id), "chatroom");

    // The connection survives all of it.
    a.send(r#"{"text":"still here"}"#);
    assert!(b.next_frame().await.contains("still here"));
    assert!(a.next_frame().await.contains("still here"));
}

#[tokio::test]
async fn test_messages_arrive_in_queue_order() {
    let app = TestApp::new();
    let a = app.connect().await;
    let mut b = app.connect().await;

    for i in 0..20 {
        a.send(&format!(r#"{{"text":"message-{i}"}}"#));
    }

    for i in 0..20 {
        let frame = b.next_frame().await;
        assert!(frame.contains(&format!(">message-{i}<")), "out of order: {frame}");
    }
}

#[tokio::test]
async fn test_full_queue_blocks_instead_of_dropping() {
    let mut settings = Settings::defaults().unwrap();
    settings.relay.queue_capacity = 1;
    let app = TestApp::with_settings(settings);

    let a = app.connect().await;
    let b = app.connect().await;
    let mut listener = app.connect().await;

    for i in 0..50 {
        a.send(&format!(r#"{{"text":"a-{i}"}}"#));
        b.send(&format!(r#"{{"text":"b-{i}"}}"#));
    }

    let mut received = 0;
    for _ in 0..100 {
        listener.next_frame().await;
        received += 1;
    }
    assert_eq!(received, 100);
    listener.assert_silent().await;
}
