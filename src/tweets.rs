//! Tweets and their 10-minute mutability window.

use chrono::{Duration, Utc};
use log::info;
use uuid::Uuid;

use crate::error::{ensure_id, ApiError};
use crate::models::Tweet;
use crate::response::{ApiResponse, ApiResult};
use crate::store::Db;
use crate::views::{OwnerView, TweetView};

/// Tweets are editable for this long after creation, immutable afterwards.
const EDIT_WINDOW_MINUTES: i64 = 10;

pub async fn create_tweet(db: &Db, actor: Uuid, content: &str) -> ApiResult<Tweet> {
    ensure_id(actor, "userId")?;
    if content.trim().is_empty() {
        return Err(ApiError::Validation("tweet is empty".to_string()));
    }

    let now = Utc::now();
    let tweet = Tweet {
        id: Uuid::new_v4(),
        owner: actor,
        content: content.trim().to_string(),
        created_at: now,
        updated_at: now,
    };
    let tweet = db.insert_tweet(tweet).await;
    info!("tweet {} created by {}", tweet.id, actor);

    Ok(ApiResponse::ok(tweet, "tweet created successfully"))
}

/// All tweets by a user joined to the owner projection. `recent_first`
/// keeps the default createdAt-descending order.
pub async fn get_user_tweets(
    db: &Db,
    user_id: Uuid,
    recent_first: bool,
) -> ApiResult<Vec<TweetView>> {
    ensure_id(user_id, "userId")?;

    let mut tweets = db.tweets_by_owner(user_id).await;
    tweets.sort_by(|a, b| {
        let ord = a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id));
        if recent_first {
            ord.reverse()
        } else {
            ord
        }
    });

    let owners = db.users_by_ids(&[user_id]).await;

    let tweets = tweets
        .iter()
        .filter_map(|t| {
            let owner = owners.get(&t.owner)?;
            Some(TweetView {
                id: t.id,
                content: t.content.clone(),
                owner: OwnerView::from_user(owner),
                created_at: t.created_at,
                updated_at: t.updated_at,
            })
        })
        .collect();

    Ok(ApiResponse::ok(tweets, "tweets fetched successfully"))
}

/// Updates a tweet's content. The edit-window check runs before content
/// validation: an expired tweet fails Forbidden even when the new content is
/// also invalid.
pub async fn update_tweet(
    db: &Db,
    tweet_id: Uuid,
    actor: Uuid,
    content: &str,
) -> ApiResult<Tweet> {
    ensure_id(tweet_id, "tweetId")?;
    ensure_id(actor, "userId")?;

    let tweet = db
        .get_tweet(tweet_id)
        .await
        .ok_or_else(|| ApiError::NotFound("tweet not found".to_string()))?;

    let now = Utc::now();
    if now - tweet.created_at > Duration::minutes(EDIT_WINDOW_MINUTES) {
        return Err(ApiError::Forbidden(
            "tweet can only be updated within 10 minutes of creation".to_string(),
        ));
    }

    if content.trim().is_empty() {
        return Err(ApiError::Validation("tweet is empty".to_string()));
    }

    let updated = db
        .set_tweet_content(tweet_id, content.trim().to_string(), now)
        .await?;
    info!("tweet {} updated by {}", tweet_id, actor);

    Ok(ApiResponse::ok(updated, "tweet is updated successfully"))
}
