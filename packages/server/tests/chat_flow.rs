//! Integration tests for the WebSocket event protocol.

mod support;

use std::time::Duration;

use serde_json::json;
use support::{TestClient, spawn_app};

const SILENCE: Duration = Duration::from_millis(200);

#[tokio::test]
async fn test_two_users_chat_in_one_room() {
    // テスト項目: 名前の重複拒否から発言・切断通知までの一連の流れ
    // given (前提条件):
    let addr = spawn_app().await;
    let mut a = TestClient::connect(addr).await;

    // when (操作): A が alice として general に入る
    let identified = a.identify("alice").await;
    let snapshot = a.join("general").await;

    // then (期待する結果):
    assert_eq!(identified, json!({"event": "identified", "name": "alice"}));
    assert_eq!(snapshot["room_name"], "General");
    assert_eq!(snapshot["history"], json!([]));
    assert_eq!(snapshot["occupants"], json!(["alice"]));

    // when (操作): B が同じ名前を名乗る
    let mut b = TestClient::connect(addr).await;
    let rejected = b.identify("alice").await;

    // then (期待する結果):
    assert_eq!(rejected["event"], "error");
    assert_eq!(rejected["code"], "NameTaken");

    // when (操作): B が bob として general に入る
    b.identify("bob").await;
    b.send(json!({"event": "join", "room_id": "general"})).await;

    // then (期待する結果): 両者が参加者数 2 を観測する
    let b_snapshot = b.recv_event("joined_room").await;
    assert_eq!(b_snapshot["occupants"], json!(["alice", "bob"]));
    assert_eq!(b.recv_event("user_joined").await["occupant_count"], 2);
    let joined = a.recv().await;
    assert_eq!(joined["event"], "user_joined");
    assert_eq!(joined["name"], "bob");
    assert_eq!(joined["occupant_count"], 2);

    // when (操作): A が発言する
    a.send(json!({"event": "send_message", "text": "hi"})).await;

    // then (期待する結果): 送信者を含む両者に届く
    for client in [&mut a, &mut b] {
        let message = client.recv().await;
        assert_eq!(message["event"], "new_message");
        assert_eq!(message["author"], "alice");
        assert_eq!(message["body"], "hi");
        assert!(message["sent_at"].as_str().unwrap().contains('T'));
    }

    // when (操作): B が切断する
    b.close().await;

    // then (期待する結果):
    let left = a.recv().await;
    assert_eq!(
        left,
        json!({"event": "user_left", "name": "bob", "room_id": "general", "occupant_count": 1})
    );

    // when (操作): A が Room 一覧を要求する
    a.send(json!({"event": "list_rooms"})).await;

    // then (期待する結果): general は参加者 1 人・メッセージ 1 件
    let rooms = a.recv_event("rooms_list").await;
    assert_eq!(
        rooms["general"],
        json!({"name": "General", "occupant_count": 1, "message_count": 1})
    );
}

#[tokio::test]
async fn test_typing_is_not_echoed_to_sender() {
    // テスト項目: 入力中通知は他の参加者にだけ届く
    // given (前提条件):
    let addr = spawn_app().await;
    let mut a = TestClient::connect(addr).await;
    a.identify("alice").await;
    a.join("general").await;
    let mut b = TestClient::connect(addr).await;
    b.identify("bob").await;
    b.join("general").await;
    a.recv_event("user_joined").await;

    // when (操作):
    a.send(json!({"event": "typing", "flag": true})).await;

    // then (期待する結果):
    assert_eq!(
        b.recv().await,
        json!({"event": "user_typing", "name": "alice", "flag": true})
    );
    assert!(a.try_recv(SILENCE).await.is_none());
}

#[tokio::test]
async fn test_blank_message_is_dropped() {
    // テスト項目: 空白のみのメッセージは誰にも配信されず、エラーも返らない
    // given (前提条件):
    let addr = spawn_app().await;
    let mut a = TestClient::connect(addr).await;
    a.identify("alice").await;
    a.join("general").await;

    // when (操作):
    a.send(json!({"event": "send_message", "text": "   "})).await;

    // then (期待する結果):
    assert!(a.try_recv(SILENCE).await.is_none());
}

#[tokio::test]
async fn test_history_is_replayed_on_join() {
    // テスト項目: 後から join したセッションに直近の履歴が古い順で届く
    // given (前提条件):
    let addr = spawn_app().await;
    let mut a = TestClient::connect(addr).await;
    a.identify("alice").await;
    a.join("general").await;
    for text in ["one", "two", "three"] {
        a.send(json!({"event": "send_message", "text": text})).await;
        a.recv_event("new_message").await;
    }

    // when (操作):
    let mut b = TestClient::connect(addr).await;
    b.identify("bob").await;
    let snapshot = b.join("general").await;

    // then (期待する結果):
    let bodies: Vec<&str> = snapshot["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_errors_go_to_requester_only() {
    // テスト項目: 不正な操作のエラーは要求元にだけ返り、接続は維持される
    // given (前提条件):
    let addr = spawn_app().await;
    let mut a = TestClient::connect(addr).await;
    a.identify("alice").await;
    a.join("general").await;
    let mut b = TestClient::connect(addr).await;

    // when (操作):
    b.send(json!({"event": "send_message", "text": "hi"})).await;
    b.send_raw("not json").await;
    b.identify("bob").await;
    b.send(json!({"event": "join", "room_id": "cooking"})).await;

    // then (期待する結果):
    assert_eq!(b.recv().await["code"], "NotIdentified");
    assert_eq!(b.recv().await["code"], "MalformedEvent");
    assert_eq!(b.recv().await["event"], "identified");
    let unknown_room = b.recv().await;
    assert_eq!(unknown_room["code"], "RoomUnknown");
    assert_eq!(unknown_room["message"], "Room not found: cooking");
    assert!(a.try_recv(SILENCE).await.is_none());
}

#[tokio::test]
async fn test_switching_rooms() {
    // テスト項目: Room を移ると元の Room に退出が通知され、以後のメッセージは届かない
    // given (前提条件):
    let addr = spawn_app().await;
    let mut a = TestClient::connect(addr).await;
    a.identify("alice").await;
    a.join("general").await;
    let mut b = TestClient::connect(addr).await;
    b.identify("bob").await;
    b.join("general").await;
    a.recv_event("user_joined").await;

    // when (操作):
    b.join("tech").await;
    a.send(json!({"event": "send_message", "text": "still here?"}))
        .await;

    // then (期待する結果):
    let left = a.recv().await;
    assert_eq!(left["event"], "user_left");
    assert_eq!(left["name"], "bob");
    assert_eq!(left["occupant_count"], 1);
    assert_eq!(a.recv().await["event"], "new_message");
    assert!(b.try_recv(SILENCE).await.is_none());
}

#[tokio::test]
async fn test_list_rooms() {
    // テスト項目: 名前を決める前でも Room 一覧を取得できる
    // given (前提条件):
    let addr = spawn_app().await;
    let mut a = TestClient::connect(addr).await;
    a.identify("alice").await;
    a.join("general").await;
    let mut b = TestClient::connect(addr).await;

    // when (操作):
    b.send(json!({"event": "list_rooms"})).await;

    // then (期待する結果):
    let rooms = b.recv().await;
    assert_eq!(rooms["event"], "rooms_list");
    assert_eq!(
        rooms["general"],
        json!({"name": "General", "occupant_count": 1, "message_count": 0})
    );
    assert_eq!(rooms["tech"]["occupant_count"], 0);
    assert!(rooms.get("rooms").is_none());
}
