use chrono::{Duration, Utc};
use uuid::Uuid;

use videotube_backend::models::{Subscription, User};
use videotube_backend::{subscriptions, users};
use videotube_backend::{ApiError, Db};

fn test_user(name: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        username: name.to_string(),
        email: format!("{}@example.com", name),
        fullname: format!("{} Example", name),
        avatar: format!("https://cdn.example.com/avatars/{}.png", name),
        cover_image: None,
        password_hash: "hashed-password".to_string(),
        refresh_token: None,
        watch_history: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_toggle_subscription_on_and_off() {
    let db = Db::new();
    let channel = db.insert_user(test_user("channel")).await.unwrap();
    let subscriber = db.insert_user(test_user("subscriber")).await.unwrap();

    let toggled = subscriptions::toggle_subscription(&db, channel.id, subscriber.id)
        .await
        .unwrap();
    assert!(toggled.data.subscribed);
    assert!(db
        .find_subscription(channel.id, subscriber.id)
        .await
        .is_some());

    let toggled = subscriptions::toggle_subscription(&db, channel.id, subscriber.id)
        .await
        .unwrap();
    assert!(!toggled.data.subscribed);
    assert!(db
        .find_subscription(channel.id, subscriber.id)
        .await
        .is_none());
}

#[tokio::test]
async fn test_self_subscription_rejected() {
    let db = Db::new();
    let channel = db.insert_user(test_user("channel")).await.unwrap();

    let err = subscriptions::toggle_subscription(&db, channel.id, channel.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_subscription_uniqueness_enforced_by_store() {
    let db = Db::new();
    let channel = db.insert_user(test_user("channel")).await.unwrap();
    let subscriber = db.insert_user(test_user("subscriber")).await.unwrap();

    db.insert_subscription(Subscription {
        id: Uuid::new_v4(),
        channel: channel.id,
        subscriber: subscriber.id,
        created_at: Utc::now(),
    })
    .await
    .unwrap();

    let err = db
        .insert_subscription(Subscription {
            id: Uuid::new_v4(),
            channel: channel.id,
            subscriber: subscriber.id,
            created_at: Utc::now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_channel_subscribers_ordered_by_subscription_time() {
    let db = Db::new();
    let channel = db.insert_user(test_user("channel")).await.unwrap();
    let early = db.insert_user(test_user("early_bird")).await.unwrap();
    let late = db.insert_user(test_user("late_comer")).await.unwrap();

    let now = Utc::now();
    db.insert_subscription(Subscription {
        id: Uuid::new_v4(),
        channel: channel.id,
        subscriber: late.id,
        created_at: now,
    })
    .await
    .unwrap();
    db.insert_subscription(Subscription {
        id: Uuid::new_v4(),
        channel: channel.id,
        subscriber: early.id,
        created_at: now - Duration::hours(1),
    })
    .await
    .unwrap();

    let list = subscriptions::get_channel_subscribers(&db, channel.id)
        .await
        .unwrap();
    assert_eq!(list.data.len(), 2);
    assert_eq!(list.data[0].username, "early_bird");
    assert_eq!(list.data[1].username, "late_comer");
    assert!(list.data[0].subscribed_at < list.data[1].subscribed_at);
}

#[tokio::test]
async fn test_subscribed_channels_join() {
    let db = Db::new();
    let viewer = db.insert_user(test_user("viewer")).await.unwrap();
    let music = db.insert_user(test_user("music_channel")).await.unwrap();
    let cooking = db.insert_user(test_user("cooking_channel")).await.unwrap();

    subscriptions::toggle_subscription(&db, music.id, viewer.id)
        .await
        .unwrap();
    subscriptions::toggle_subscription(&db, cooking.id, viewer.id)
        .await
        .unwrap();

    let list = subscriptions::get_subscribed_channels(&db, viewer.id)
        .await
        .unwrap();
    assert_eq!(list.data.len(), 2);
    let names: Vec<&str> = list.data.iter().map(|c| c.username.as_str()).collect();
    assert!(names.contains(&"music_channel"));
    assert!(names.contains(&"cooking_channel"));
}

#[tokio::test]
async fn test_subscribe_then_profile_scenario() {
    // Subscriber S subscribes to channel C, then C's profile queried as S
    // shows isSubscribed == true and subscriberCount == 1
    let db = Db::new();
    let channel = db.insert_user(test_user("channel_c")).await.unwrap();
    let subscriber = db.insert_user(test_user("subscriber_s")).await.unwrap();

    subscriptions::toggle_subscription(&db, channel.id, subscriber.id)
        .await
        .unwrap();

    let profile = users::get_channel_profile(&db, "channel_c", Some(subscriber.id))
        .await
        .unwrap();
    assert!(profile.data.is_subscribed);
    assert_eq!(profile.data.subscriber_count, 1);
    assert_eq!(profile.data.subscribed_to_count, 0);

    // Unsubscribe reverts both
    subscriptions::toggle_subscription(&db, channel.id, subscriber.id)
        .await
        .unwrap();
    let profile = users::get_channel_profile(&db, "channel_c", Some(subscriber.id))
        .await
        .unwrap();
    assert!(!profile.data.is_subscribed);
    assert_eq!(profile.data.subscriber_count, 0);
}
