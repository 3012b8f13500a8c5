//! Output shapes for the aggregate operations. Every user that appears in a
//! joined result flows through [`OwnerView`], so credential fields
//! (`password_hash`, `refresh_token`) can never serialize into a response.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Like, Subscription, User, Video};

/// Allow-listed user projection used wherever a join attributes content to
/// its author.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerView {
    pub id: Uuid,
    pub username: String,
    pub fullname: String,
    pub avatar: String,
}

impl OwnerView {
    pub fn from_user(user: &User) -> Self {
        OwnerView {
            id: user.id,
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Outcome of a like toggle: the edge plus its end state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub liked: bool,
    pub like: Like,
}

/// Outcome of a subscription toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionToggle {
    pub subscribed: bool,
    pub subscription: Subscription,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberView {
    pub subscriber_id: Uuid,
    pub username: String,
    pub avatar: String,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedChannelView {
    pub channel_id: Uuid,
    pub username: String,
    pub avatar: String,
    pub subscribed_at: DateTime<Utc>,
}

/// Derived channel statistics, always computed on read.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_videos: i64,
    pub total_views: i64,
    pub total_subscribers: i64,
    pub video_likes: i64,
    pub tweet_likes: i64,
    pub comment_likes: i64,
    pub total_likes: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: Uuid,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub avatar: String,
    pub cover_image: Option<String>,
    pub subscriber_count: i64,
    pub subscribed_to_count: i64,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub content: String,
    pub owner: OwnerView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetView {
    pub id: Uuid,
    pub content: String,
    pub owner: OwnerView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub duration: i64,
    pub views: i64,
    pub is_published: bool,
    pub owner: OwnerView,
    pub created_at: DateTime<Utc>,
}

impl VideoView {
    pub fn from_parts(video: &Video, owner: &User) -> Self {
        VideoView {
            id: video.id,
            title: video.title.clone(),
            description: video.description.clone(),
            thumbnail: video.thumbnail.clone(),
            duration: video.duration,
            views: video.views,
            is_published: video.is_published,
            owner: OwnerView::from_user(owner),
            created_at: video.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideo {
    pub video: VideoView,
    pub liked_at: DateTime<Utc>,
}

/// Playlist with its member videos resolved, insertion order preserved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistView {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub description: String,
    pub videos: Vec<Video>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
