#![allow(clippy::float_cmp)]

use super::*;

fn channel() -> (mpsc::Sender<ServerMessage>, mpsc::Receiver<ServerMessage>) {
    mpsc::channel(8)
}

fn clients_msg() -> ServerMessage {
    ServerMessage::Clients { clients: vec![] }
}

#[test]
fn register_starts_cursor_at_origin_with_palette_color() {
    let mut sessions = Sessions::new();
    let (tx, _rx) = channel();
    let session = sessions.register("a".into(), tx);

    assert_eq!(session.id, "a");
    assert_eq!((session.cursor_x, session.cursor_y), (0.0, 0.0));
    assert!(PaletteColor::ALL.contains(&session.color));
    assert_eq!(sessions.get("a"), Some(&session));
    assert_eq!(sessions.len(), 1);
}

#[test]
fn random_color_is_always_from_palette() {
    for _ in 0..100 {
        assert!(PaletteColor::ALL.contains(&random_color()));
    }
}

#[test]
fn unregister_removes_and_returns_session() {
    let mut sessions = Sessions::new();
    let (tx, _rx) = channel();
    sessions.register("a".into(), tx);

    let removed = sessions.unregister("a").expect("session");
    assert_eq!(removed.id, "a");
    assert!(sessions.is_empty());
    assert!(sessions.unregister("a").is_none());
}

#[test]
fn clients_are_listed_in_join_order() {
    let mut sessions = Sessions::new();
    for id in ["zulu", "alpha", "mike", "bravo"] {
        let (tx, _rx) = channel();
        sessions.register(id.into(), tx);
    }
    sessions.unregister("mike");

    let ids: Vec<String> = sessions.clients().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["zulu", "alpha", "bravo"]);
}

#[test]
fn update_cursor_overwrites_and_builds_broadcast() {
    let mut sessions = Sessions::new();
    let (tx, _rx) = channel();
    let color = sessions.register("a".into(), tx).color;

    sessions.update_cursor("a", 10.0, 20.0);
    let event = sessions.update_cursor("a", 30.0, 40.0);

    assert_eq!(event, Some(ServerMessage::CursorMoved { client_id: "a".into(), x: 30.0, y: 40.0, color }));
    let session = sessions.get("a").expect("session");
    assert_eq!((session.cursor_x, session.cursor_y), (30.0, 40.0));
}

#[test]
fn update_cursor_for_unknown_session_is_none() {
    let mut sessions = Sessions::new();
    assert!(sessions.update_cursor("ghost", 1.0, 1.0).is_none());
}

#[test]
fn send_to_reaches_only_target() {
    let mut sessions = Sessions::new();
    let (tx_a, mut rx_a) = channel();
    let (tx_b, mut rx_b) = channel();
    sessions.register("a".into(), tx_a);
    sessions.register("b".into(), tx_b);

    assert!(sessions.send_to("a", clients_msg()));
    assert_eq!(rx_a.try_recv().ok(), Some(clients_msg()));
    assert!(rx_b.try_recv().is_err());
    assert!(!sessions.send_to("ghost", clients_msg()));
}

#[test]
fn broadcast_reaches_everyone_or_all_but_excluded() {
    let mut sessions = Sessions::new();
    let (tx_a, mut rx_a) = channel();
    let (tx_b, mut rx_b) = channel();
    sessions.register("a".into(), tx_a);
    sessions.register("b".into(), tx_b);

    assert_eq!(sessions.broadcast(&clients_msg(), None), 2);
    assert!(rx_a.try_recv().is_ok());
    assert!(rx_b.try_recv().is_ok());

    assert_eq!(sessions.broadcast(&clients_msg(), Some("a")), 1);
    assert!(rx_a.try_recv().is_err());
    assert!(rx_b.try_recv().is_ok());
}

#[test]
fn broadcast_skips_full_and_closed_queues() {
    let mut sessions = Sessions::new();
    let (tx_full, _rx_full) = mpsc::channel(1);
    let (tx_closed, rx_closed) = channel();
    let (tx_ok, mut rx_ok) = channel();
    sessions.register("full".into(), tx_full);
    sessions.register("closed".into(), tx_closed);
    sessions.register("ok".into(), tx_ok);
    drop(rx_closed);

    assert!(sessions.send_to("full", clients_msg()));
    assert_eq!(sessions.broadcast(&clients_msg(), None), 1);
    assert!(rx_ok.try_recv().is_ok());
}
