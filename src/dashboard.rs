//! Channel dashboard aggregates. Counts are always computed on read; there
//! are no persisted counters to keep consistent with edge toggles.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::ensure_id;
use crate::models::{LikeTargetKind, Video};
use crate::response::{ApiResponse, ApiResult};
use crate::store::Db;
use crate::views::ChannelStats;

/// Video count, view sum, subscriber count and the per-kind like buckets for
/// everything the channel owns. A channel with no content yields all zeros.
pub async fn get_channel_stats(db: &Db, channel_id: Uuid) -> ApiResult<ChannelStats> {
    ensure_id(channel_id, "channelId")?;

    // One pass over the owned videos for both the count and the view sum.
    let videos = db.videos_by_owner(channel_id).await;
    let (total_videos, total_views) = videos
        .iter()
        .fold((0i64, 0i64), |(count, views), v| (count + 1, views + v.views));

    let total_subscribers = db.count_subscribers(channel_id).await;

    // Like counting is scoped to the channel's own content: collect the id
    // sets first, then count edges whose target falls inside them. Empty
    // sets are skipped, never scanned.
    let video_ids: HashSet<Uuid> = videos.iter().map(|v| v.id).collect();
    let tweet_ids: HashSet<Uuid> = db.tweet_ids_by_owner(channel_id).await.into_iter().collect();
    let comment_ids: HashSet<Uuid> = db
        .comment_ids_by_owner(channel_id)
        .await
        .into_iter()
        .collect();

    let video_likes = if video_ids.is_empty() {
        0
    } else {
        db.count_likes_in(LikeTargetKind::Video, &video_ids).await
    };
    let tweet_likes = if tweet_ids.is_empty() {
        0
    } else {
        db.count_likes_in(LikeTargetKind::Tweet, &tweet_ids).await
    };
    let comment_likes = if comment_ids.is_empty() {
        0
    } else {
        db.count_likes_in(LikeTargetKind::Comment, &comment_ids).await
    };

    let stats = ChannelStats {
        total_videos,
        total_views,
        total_subscribers,
        video_likes,
        tweet_likes,
        comment_likes,
        total_likes: video_likes + tweet_likes + comment_likes,
    };

    Ok(ApiResponse::ok(stats, "channel stats fetched successfully"))
}

/// All videos uploaded by the channel, most recent first.
pub async fn get_channel_videos(db: &Db, channel_id: Uuid) -> ApiResult<Vec<Video>> {
    ensure_id(channel_id, "channelId")?;

    let mut videos = db.videos_by_owner(channel_id).await;
    videos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    Ok(ApiResponse::ok(videos, "videos fetched successfully"))
}
