//! Subscription half of the Edge Store, plus the two subscription joins.

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::error::{ensure_id, ApiError};
use crate::models::Subscription;
use crate::response::{ApiResponse, ApiResult};
use crate::store::Db;
use crate::views::{SubscribedChannelView, SubscriberView, SubscriptionToggle};

/// Same read-then-write toggle pattern as likes, keyed by
/// (channel, subscriber). Self-subscription is rejected outright.
pub async fn toggle_subscription(
    db: &Db,
    channel_id: Uuid,
    subscriber_id: Uuid,
) -> ApiResult<SubscriptionToggle> {
    ensure_id(channel_id, "channelId")?;
    ensure_id(subscriber_id, "userId")?;
    if channel_id == subscriber_id {
        return Err(ApiError::Validation(
            "cannot subscribe to own channel".to_string(),
        ));
    }

    match db.find_subscription(channel_id, subscriber_id).await {
        None => {
            let subscription = Subscription {
                id: Uuid::new_v4(),
                channel: channel_id,
                subscriber: subscriber_id,
                created_at: Utc::now(),
            };
            let subscription = db.insert_subscription(subscription).await?;
            info!("{} subscribed to channel {}", subscriber_id, channel_id);
            Ok(ApiResponse::ok(
                SubscriptionToggle {
                    subscribed: true,
                    subscription,
                },
                "successfully subscribed the channel",
            ))
        }
        Some(existing) => {
            let removed = match db.remove_subscription(channel_id, subscriber_id).await {
                Some(subscription) => subscription,
                None => {
                    // Vanished between lookup and delete; benign no-op.
                    warn!(
                        "subscription {} -> {} already gone, absorbing delete",
                        subscriber_id, channel_id
                    );
                    existing
                }
            };
            info!("{} unsubscribed from channel {}", subscriber_id, channel_id);
            Ok(ApiResponse::ok(
                SubscriptionToggle {
                    subscribed: false,
                    subscription: removed,
                },
                "subscription deleted successfully",
            ))
        }
    }
}

/// Subscribers of a channel joined to their user records, ordered by when
/// they subscribed.
pub async fn get_channel_subscribers(
    db: &Db,
    channel_id: Uuid,
) -> ApiResult<Vec<SubscriberView>> {
    ensure_id(channel_id, "channelId")?;

    let mut subscriptions = db.subscriptions_by_channel(channel_id).await;
    subscriptions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let subscriber_ids: Vec<Uuid> = subscriptions.iter().map(|s| s.subscriber).collect();
    let users = db.users_by_ids(&subscriber_ids).await;

    let subscribers = subscriptions
        .iter()
        .filter_map(|s| {
            let user = users.get(&s.subscriber)?;
            Some(SubscriberView {
                subscriber_id: user.id,
                username: user.username.clone(),
                avatar: user.avatar.clone(),
                subscribed_at: s.created_at,
            })
        })
        .collect();

    Ok(ApiResponse::ok(
        subscribers,
        "subscribers list fetched successfully",
    ))
}

/// Channels a user has subscribed to: the symmetric join, on `channel`.
pub async fn get_subscribed_channels(
    db: &Db,
    subscriber_id: Uuid,
) -> ApiResult<Vec<SubscribedChannelView>> {
    ensure_id(subscriber_id, "subscriberId")?;

    let mut subscriptions = db.subscriptions_by_subscriber(subscriber_id).await;
    subscriptions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let channel_ids: Vec<Uuid> = subscriptions.iter().map(|s| s.channel).collect();
    let users = db.users_by_ids(&channel_ids).await;

    let channels = subscriptions
        .iter()
        .filter_map(|s| {
            let user = users.get(&s.channel)?;
            Some(SubscribedChannelView {
                channel_id: user.id,
                username: user.username.clone(),
                avatar: user.avatar.clone(),
                subscribed_at: s.created_at,
            })
        })
        .collect();

    Ok(ApiResponse::ok(
        channels,
        "successfully fetched the subscribed channels",
    ))
}
