use chrono::Utc;
use uuid::Uuid;

use videotube_backend::likes;
use videotube_backend::models::{LikeTarget, User, Video};
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

fn test_video(owner: Uuid, title: &str) -> Video {
    let now = Utc::now();
    Video {
        id: Uuid::new_v4(),
        owner,
        title: title.to_string(),
        description: format!("description of {}", title),
        thumbnail: format!("https://cdn.example.com/thumbs/{}.jpg", title),
        video_file: format!("https://cdn.example.com/videos/{}.webm", title),
        duration: 120,
        views: 0,
        is_published: true,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_toggle_video_like_creates_then_removes() {
    let db = Db::new();
    let owner = db.insert_user(test_user("creator")).await.unwrap();
    let actor = db.insert_user(test_user("viewer")).await.unwrap();
    let video = db.insert_video(test_video(owner.id, "first-upload")).await;

    // First toggle creates the edge
    let toggled = likes::toggle_video_like(&db, video.id, actor.id)
        .await
        .unwrap();
    assert!(toggled.data.liked);
    assert_eq!(toggled.data.like.liked_by, actor.id);
    assert_eq!(toggled.status_code, 200);
    assert!(db
        .find_like(&LikeTarget::video(video.id), actor.id)
        .await
        .is_some());

    // Second toggle removes it again
    let toggled = likes::toggle_video_like(&db, video.id, actor.id)
        .await
        .unwrap();
    assert!(!toggled.data.liked);
    assert!(db
        .find_like(&LikeTarget::video(video.id), actor.id)
        .await
        .is_none());
}

#[tokio::test]
async fn test_toggle_parity_over_many_calls() {
    let db = Db::new();
    let owner = db.insert_user(test_user("creator")).await.unwrap();
    let actor = db.insert_user(test_user("viewer")).await.unwrap();
    let video = db.insert_video(test_video(owner.id, "parity")).await;

    // An odd number of toggles leaves the edge present, even leaves it absent
    for round in 1..=5 {
        likes::toggle_video_like(&db, video.id, actor.id)
            .await
            .unwrap();
        let present = db
            .find_like(&LikeTarget::video(video.id), actor.id)
            .await
            .is_some();
        assert_eq!(present, round % 2 == 1, "wrong edge state after {} toggles", round);
    }
}

#[tokio::test]
async fn test_like_uniqueness_enforced_by_store() {
    let db = Db::new();
    let owner = db.insert_user(test_user("creator")).await.unwrap();
    let actor = db.insert_user(test_user("viewer")).await.unwrap();
    let video = db.insert_video(test_video(owner.id, "unique")).await;

    let like = videotube_backend::models::Like {
        id: Uuid::new_v4(),
        target: LikeTarget::video(video.id),
        liked_by: actor.id,
        created_at: Utc::now(),
    };
    db.insert_like(like.clone()).await.unwrap();

    // A second edge for the same (target, actor) pair must be rejected
    let duplicate = videotube_backend::models::Like {
        id: Uuid::new_v4(),
        ..like
    };
    let err = db.insert_like(duplicate).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn test_toggle_rejects_nil_ids() {
    let db = Db::new();
    let actor = db.insert_user(test_user("viewer")).await.unwrap();

    let err = likes::toggle_video_like(&db, Uuid::nil(), actor.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.status_code(), 400);

    let err = likes::toggle_video_like(&db, Uuid::new_v4(), Uuid::nil())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[tokio::test]
async fn test_comment_and_tweet_likes_are_distinct_edges() {
    let db = Db::new();
    let actor = db.insert_user(test_user("viewer")).await.unwrap();

    // Same uuid used as a comment target and a tweet target must produce
    // two independent edges, keyed by kind as well as id
    let target_id = Uuid::new_v4();

    let comment_like = likes::toggle_comment_like(&db, target_id, actor.id)
        .await
        .unwrap();
    assert!(comment_like.data.liked);

    let tweet_like = likes::toggle_tweet_like(&db, target_id, actor.id)
        .await
        .unwrap();
    assert!(tweet_like.data.liked);

    assert!(db
        .find_like(&LikeTarget::comment(target_id), actor.id)
        .await
        .is_some());
    assert!(db
        .find_like(&LikeTarget::tweet(target_id), actor.id)
        .await
        .is_some());

    // Toggling the comment like off leaves the tweet like untouched
    likes::toggle_comment_like(&db, target_id, actor.id)
        .await
        .unwrap();
    assert!(db
        .find_like(&LikeTarget::comment(target_id), actor.id)
        .await
        .is_none());
    assert!(db
        .find_like(&LikeTarget::tweet(target_id), actor.id)
        .await
        .is_some());
}

#[tokio::test]
async fn test_get_liked_videos_newest_first_with_owner() {
    let db = Db::new();
    let owner = db.insert_user(test_user("creator")).await.unwrap();
    let actor = db.insert_user(test_user("viewer")).await.unwrap();
    let first = db.insert_video(test_video(owner.id, "first")).await;
    let second = db.insert_video(test_video(owner.id, "second")).await;

    // Seed likes directly so the ordering is unambiguous
    let now = Utc::now();
    db.insert_like(videotube_backend::models::Like {
        id: Uuid::new_v4(),
        target: LikeTarget::video(first.id),
        liked_by: actor.id,
        created_at: now - chrono::Duration::minutes(5),
    })
    .await
    .unwrap();
    db.insert_like(videotube_backend::models::Like {
        id: Uuid::new_v4(),
        target: LikeTarget::video(second.id),
        liked_by: actor.id,
        created_at: now,
    })
    .await
    .unwrap();

    let liked = likes::get_liked_videos(&db, actor.id).await.unwrap();
    assert_eq!(liked.data.len(), 2);
    assert_eq!(liked.data[0].video.id, second.id);
    assert_eq!(liked.data[1].video.id, first.id);
    assert_eq!(liked.data[0].video.owner.username, "creator");
}
