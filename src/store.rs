use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    Comment, Like, LikeTarget, LikeTargetKind, Playlist, Subscription, Tweet, User, Video,
};

/// Composite key enforcing the unique constraint on Like edges.
pub type LikeKey = (LikeTargetKind, Uuid, Uuid);

/// Composite key enforcing the unique constraint on Subscription edges:
/// (channel, subscriber).
pub type SubscriptionKey = (Uuid, Uuid);

/// In-memory document store. Each collection sits behind its own lock, and
/// every accessor holds a lock for the duration of a single call only, so
/// read-then-write sequences in the operation layer are *not* atomic (the
/// same contract a remote document store would give us). Edge uniqueness is
/// the only cross-call safeguard: it lives in the map keys.
#[derive(Debug, Default)]
pub struct Db {
    users: RwLock<HashMap<Uuid, User>>,
    videos: RwLock<HashMap<Uuid, Video>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
    tweets: RwLock<HashMap<Uuid, Tweet>>,
    likes: RwLock<HashMap<LikeKey, Like>>,
    subscriptions: RwLock<HashMap<SubscriptionKey, Subscription>>,
    playlists: RwLock<HashMap<Uuid, Playlist>>,
}

impl Db {
    pub fn new() -> Self {
        Db::default()
    }

    // ---- users ----

    /// Username and email are unique, case-insensitive.
    pub async fn insert_user(&self, user: User) -> Result<User, ApiError> {
        let mut users = self.users.write().await;
        let clash = users.values().any(|u| {
            u.username.eq_ignore_ascii_case(&user.username)
                || u.email.eq_ignore_ascii_case(&user.email)
        });
        if clash {
            return Err(ApiError::Conflict(
                "user with this email or username already exists".to_string(),
            ));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    pub async fn find_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned()
    }

    /// Batch fetch for joins.
    pub async fn users_by_ids(&self, ids: &[Uuid]) -> HashMap<Uuid, User> {
        let users = self.users.read().await;
        ids.iter()
            .filter_map(|id| users.get(id).map(|u| (*id, u.clone())))
            .collect()
    }

    /// Prepends to the watch history (most recent first, duplicates allowed).
    pub async fn push_watch_history(
        &self,
        user_id: Uuid,
        video_id: Uuid,
    ) -> Result<(), ApiError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;
        user.watch_history.insert(0, video_id);
        Ok(())
    }

    // ---- videos ----

    pub async fn insert_video(&self, video: Video) -> Video {
        self.videos.write().await.insert(video.id, video.clone());
        video
    }

    pub async fn get_video(&self, id: Uuid) -> Option<Video> {
        self.videos.read().await.get(&id).cloned()
    }

    pub async fn videos_by_owner(&self, owner: Uuid) -> Vec<Video> {
        self.videos
            .read()
            .await
            .values()
            .filter(|v| v.owner == owner)
            .cloned()
            .collect()
    }

    pub async fn videos_by_ids(&self, ids: &[Uuid]) -> HashMap<Uuid, Video> {
        let videos = self.videos.read().await;
        ids.iter()
            .filter_map(|id| videos.get(id).map(|v| (*id, v.clone())))
            .collect()
    }

    pub async fn all_videos(&self) -> Vec<Video> {
        self.videos.read().await.values().cloned().collect()
    }

    /// Bumps the monotonic view counter, returning the updated document.
    pub async fn increment_views(&self, id: Uuid) -> Result<Video, ApiError> {
        let mut videos = self.videos.write().await;
        let video = videos
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound("video not found".to_string()))?;
        video.views += 1;
        Ok(video.clone())
    }

    // ---- comments ----

    pub async fn insert_comment(&self, comment: Comment) -> Comment {
        self.comments
            .write()
            .await
            .insert(comment.id, comment.clone());
        comment
    }

    pub async fn comments_by_video(&self, video: Uuid) -> Vec<Comment> {
        self.comments
            .read()
            .await
            .values()
            .filter(|c| c.video == video)
            .cloned()
            .collect()
    }

    pub async fn comment_ids_by_owner(&self, owner: Uuid) -> Vec<Uuid> {
        self.comments
            .read()
            .await
            .values()
            .filter(|c| c.owner == owner)
            .map(|c| c.id)
            .collect()
    }

    // ---- tweets ----

    pub async fn insert_tweet(&self, tweet: Tweet) -> Tweet {
        self.tweets.write().await.insert(tweet.id, tweet.clone());
        tweet
    }

    pub async fn get_tweet(&self, id: Uuid) -> Option<Tweet> {
        self.tweets.read().await.get(&id).cloned()
    }

    pub async fn tweets_by_owner(&self, owner: Uuid) -> Vec<Tweet> {
        self.tweets
            .read()
            .await
            .values()
            .filter(|t| t.owner == owner)
            .cloned()
            .collect()
    }

    pub async fn tweet_ids_by_owner(&self, owner: Uuid) -> Vec<Uuid> {
        self.tweets
            .read()
            .await
            .values()
            .filter(|t| t.owner == owner)
            .map(|t| t.id)
            .collect()
    }

    pub async fn set_tweet_content(
        &self,
        id: Uuid,
        content: String,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Tweet, ApiError> {
        let mut tweets = self.tweets.write().await;
        let tweet = tweets
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound("tweet not found".to_string()))?;
        tweet.content = content;
        tweet.updated_at = now;
        Ok(tweet.clone())
    }

    // ---- likes ----

    pub async fn find_like(&self, target: &LikeTarget, liked_by: Uuid) -> Option<Like> {
        self.likes
            .read()
            .await
            .get(&(target.kind, target.id, liked_by))
            .cloned()
    }

    /// Insertion fails if an edge for (target, liked_by) already exists —
    /// the store-level unique constraint of spec.
    pub async fn insert_like(&self, like: Like) -> Result<Like, ApiError> {
        let key = (like.target.kind, like.target.id, like.liked_by);
        let mut likes = self.likes.write().await;
        if likes.contains_key(&key) {
            return Err(ApiError::Conflict("like already exists".to_string()));
        }
        likes.insert(key, like.clone());
        Ok(like)
    }

    pub async fn remove_like(&self, target: &LikeTarget, liked_by: Uuid) -> Option<Like> {
        self.likes
            .write()
            .await
            .remove(&(target.kind, target.id, liked_by))
    }

    /// Counts Like edges of the given kind whose target id falls in `ids`.
    pub async fn count_likes_in(&self, kind: LikeTargetKind, ids: &HashSet<Uuid>) -> i64 {
        self.likes
            .read()
            .await
            .values()
            .filter(|l| l.target.kind == kind && ids.contains(&l.target.id))
            .count() as i64
    }

    pub async fn likes_by_user(&self, kind: LikeTargetKind, liked_by: Uuid) -> Vec<Like> {
        self.likes
            .read()
            .await
            .values()
            .filter(|l| l.target.kind == kind && l.liked_by == liked_by)
            .cloned()
            .collect()
    }

    // ---- subscriptions ----

    pub async fn find_subscription(
        &self,
        channel: Uuid,
        subscriber: Uuid,
    ) -> Option<Subscription> {
        self.subscriptions
            .read()
            .await
            .get(&(channel, subscriber))
            .cloned()
    }

    pub async fn insert_subscription(
        &self,
        subscription: Subscription,
    ) -> Result<Subscription, ApiError> {
        let key = (subscription.channel, subscription.subscriber);
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions.contains_key(&key) {
            return Err(ApiError::Conflict(
                "subscription already exists".to_string(),
            ));
        }
        subscriptions.insert(key, subscription.clone());
        Ok(subscription)
    }

    pub async fn remove_subscription(
        &self,
        channel: Uuid,
        subscriber: Uuid,
    ) -> Option<Subscription> {
        self.subscriptions
            .write()
            .await
            .remove(&(channel, subscriber))
    }

    pub async fn subscriptions_by_channel(&self, channel: Uuid) -> Vec<Subscription> {
        self.subscriptions
            .read()
            .await
            .values()
            .filter(|s| s.channel == channel)
            .cloned()
            .collect()
    }

    pub async fn subscriptions_by_subscriber(&self, subscriber: Uuid) -> Vec<Subscription> {
        self.subscriptions
            .read()
            .await
            .values()
            .filter(|s| s.subscriber == subscriber)
            .cloned()
            .collect()
    }

    pub async fn count_subscribers(&self, channel: Uuid) -> i64 {
        self.subscriptions
            .read()
            .await
            .values()
            .filter(|s| s.channel == channel)
            .count() as i64
    }

    pub async fn count_subscribed_to(&self, subscriber: Uuid) -> i64 {
        self.subscriptions
            .read()
            .await
            .values()
            .filter(|s| s.subscriber == subscriber)
            .count() as i64
    }

    // ---- playlists ----

    pub async fn insert_playlist(&self, playlist: Playlist) -> Playlist {
        self.playlists
            .write()
            .await
            .insert(playlist.id, playlist.clone());
        playlist
    }

    pub async fn get_playlist(&self, id: Uuid) -> Option<Playlist> {
        self.playlists.read().await.get(&id).cloned()
    }

    /// Full-document save, as after a membership mutation.
    pub async fn put_playlist(&self, playlist: Playlist) -> Playlist {
        self.playlists
            .write()
            .await
            .insert(playlist.id, playlist.clone());
        playlist
    }

    pub async fn playlists_by_owner(&self, owner: Uuid) -> Vec<Playlist> {
        self.playlists
            .read()
            .await
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect()
    }

    /// Pre-check for the owner-scoped playlist name uniqueness rule. Not an
    /// index: a racing create can still slip a duplicate through.
    pub async fn find_playlist_by_owner_and_name(
        &self,
        owner: Uuid,
        name: &str,
    ) -> Option<Playlist> {
        self.playlists
            .read()
            .await
            .values()
            .find(|p| p.owner == owner && p.name == name)
            .cloned()
    }
}
