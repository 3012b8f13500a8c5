//! Channel profile and watch-history aggregates.

use log::warn;
use uuid::Uuid;

use crate::error::{ensure_id, ApiError};
use crate::response::{ApiResponse, ApiResult};
use crate::store::Db;
use crate::views::{ChannelProfile, VideoView};

/// Public profile of a channel looked up by username (case-insensitive),
/// with the subscription counts computed on read. `viewer` is the
/// authenticated actor asking, if any; `is_subscribed` reports whether that
/// actor currently subscribes to this channel.
pub async fn get_channel_profile(
    db: &Db,
    username: &str,
    viewer: Option<Uuid>,
) -> ApiResult<ChannelProfile> {
    if username.trim().is_empty() {
        return Err(ApiError::Validation("username is required".to_string()));
    }

    let user = db
        .find_user_by_username(username.trim())
        .await
        .ok_or_else(|| ApiError::NotFound("channel does not exist".to_string()))?;

    let subscriber_count = db.count_subscribers(user.id).await;
    let subscribed_to_count = db.count_subscribed_to(user.id).await;
    let is_subscribed = match viewer {
        Some(viewer) => db.find_subscription(user.id, viewer).await.is_some(),
        None => false,
    };

    let profile = ChannelProfile {
        id: user.id,
        username: user.username,
        fullname: user.fullname,
        email: user.email,
        avatar: user.avatar,
        cover_image: user.cover_image,
        subscriber_count,
        subscribed_to_count,
        is_subscribed,
    };

    Ok(ApiResponse::ok(
        profile,
        "user channel fetched successfully",
    ))
}

/// The user's watch history resolved to videos, most recent first, with
/// order and duplicates preserved and each entry attributed to its owner.
pub async fn get_watch_history(db: &Db, user_id: Uuid) -> ApiResult<Vec<VideoView>> {
    ensure_id(user_id, "userId")?;

    let user = db
        .get_user(user_id)
        .await
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    let videos = db.videos_by_ids(&user.watch_history).await;
    let owner_ids: Vec<Uuid> = videos.values().map(|v| v.owner).collect();
    let owners = db.users_by_ids(&owner_ids).await;

    let mut history = Vec::with_capacity(user.watch_history.len());
    for video_id in &user.watch_history {
        let Some(video) = videos.get(video_id) else {
            // Watched video has since been deleted; drop the entry.
            continue;
        };
        let Some(owner) = owners.get(&video.owner) else {
            warn!("video {} has no owner record, skipping", video.id);
            continue;
        };
        history.push(VideoView::from_parts(video, owner));
    }

    Ok(ApiResponse::ok(
        history,
        "watch history fetched successfully",
    ))
}
