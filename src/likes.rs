//! Like half of the Edge Store: a single toggle per target kind, never a
//! separate like/unlike pair, so the idempotence invariant lives in one
//! place.

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::error::ensure_id;
use crate::models::{Like, LikeTarget, LikeTargetKind};
use crate::response::{ApiResponse, ApiResult};
use crate::store::Db;
use crate::views::{LikeToggle, LikedVideo, VideoView};

pub async fn toggle_video_like(db: &Db, video_id: Uuid, actor: Uuid) -> ApiResult<LikeToggle> {
    ensure_id(video_id, "videoId")?;
    toggle_like(db, LikeTarget::video(video_id), actor).await
}

pub async fn toggle_comment_like(
    db: &Db,
    comment_id: Uuid,
    actor: Uuid,
) -> ApiResult<LikeToggle> {
    ensure_id(comment_id, "commentId")?;
    toggle_like(db, LikeTarget::comment(comment_id), actor).await
}

pub async fn toggle_tweet_like(db: &Db, tweet_id: Uuid, actor: Uuid) -> ApiResult<LikeToggle> {
    ensure_id(tweet_id, "tweetId")?;
    toggle_like(db, LikeTarget::tweet(tweet_id), actor).await
}

/// Read-then-write toggle: the lookup and the mutation are separate store
/// calls, so concurrent toggles on the same pair can race. A duplicate
/// create loses against the store's unique constraint; a double delete is
/// absorbed as a successful no-op.
async fn toggle_like(db: &Db, target: LikeTarget, actor: Uuid) -> ApiResult<LikeToggle> {
    ensure_id(actor, "userId")?;

    match db.find_like(&target, actor).await {
        None => {
            let like = Like {
                id: Uuid::new_v4(),
                target,
                liked_by: actor,
                created_at: Utc::now(),
            };
            let like = db.insert_like(like).await?;
            info!("like created by {} on {:?} {}", actor, target.kind, target.id);
            Ok(ApiResponse::ok(
                LikeToggle { liked: true, like },
                "like created successfully",
            ))
        }
        Some(existing) => {
            let removed = match db.remove_like(&target, actor).await {
                Some(like) => like,
                None => {
                    // Edge vanished between lookup and delete; keep the
                    // toggle idempotent from the caller's perspective.
                    warn!(
                        "like by {} on {:?} {} already gone, absorbing delete",
                        actor, target.kind, target.id
                    );
                    existing
                }
            };
            info!("like deleted by {} on {:?} {}", actor, target.kind, target.id);
            Ok(ApiResponse::ok(
                LikeToggle {
                    liked: false,
                    like: removed,
                },
                "like deleted successfully",
            ))
        }
    }
}

/// Videos the user has liked, newest like first, joined to their owners.
pub async fn get_liked_videos(db: &Db, user_id: Uuid) -> ApiResult<Vec<LikedVideo>> {
    ensure_id(user_id, "userId")?;

    let mut likes = db.likes_by_user(LikeTargetKind::Video, user_id).await;
    likes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let video_ids: Vec<Uuid> = likes.iter().map(|l| l.target.id).collect();
    let videos = db.videos_by_ids(&video_ids).await;
    let owner_ids: Vec<Uuid> = videos.values().map(|v| v.owner).collect();
    let owners = db.users_by_ids(&owner_ids).await;

    let mut liked = Vec::with_capacity(likes.len());
    for like in &likes {
        let Some(video) = videos.get(&like.target.id) else {
            // Liked video was deleted; inner-join semantics drop it.
            continue;
        };
        let Some(owner) = owners.get(&video.owner) else {
            warn!("video {} has no owner record, skipping", video.id);
            continue;
        };
        liked.push(LikedVideo {
            video: VideoView::from_parts(video, owner),
            liked_at: like.created_at,
        });
    }

    Ok(ApiResponse::ok(liked, "liked videos fetched successfully"))
}
