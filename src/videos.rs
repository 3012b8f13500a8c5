//! Video listing (filter / sort / paginate) and the watch flow.

use log::info;
use uuid::Uuid;

use crate::error::{ensure_id, ApiError};
use crate::models::{SortField, SortOrder, Video, VideoQuery};
use crate::response::{ApiResponse, ApiResult};
use crate::store::Db;
use crate::views::VideoView;

/// Lists videos with an optional case-insensitive substring filter over
/// title, description and thumbnail, optional owner scoping, field sort with
/// explicit direction and page/limit pagination. An out-of-range page is an
/// empty result, not an error.
pub async fn get_all_videos(db: &Db, query: &VideoQuery) -> ApiResult<Vec<Video>> {
    if query.page == 0 || query.limit == 0 {
        return Err(ApiError::Validation(
            "page and limit must be positive integers".to_string(),
        ));
    }

    let mut videos = match query.owner {
        Some(owner) => {
            ensure_id(owner, "userId")?;
            db.videos_by_owner(owner).await
        }
        None => db.all_videos().await,
    };

    if let Some(term) = &query.query {
        let needle = term.to_lowercase();
        videos.retain(|v| {
            v.title.to_lowercase().contains(&needle)
                || v.description.to_lowercase().contains(&needle)
                || v.thumbnail.to_lowercase().contains(&needle)
        });
    }

    videos.sort_by(|a, b| {
        let ord = match query.sort_by {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Views => a.views.cmp(&b.views),
            SortField::Duration => a.duration.cmp(&b.duration),
            SortField::Title => a.title.cmp(&b.title),
        }
        .then(a.id.cmp(&b.id));
        match query.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    let skip = (query.page as usize - 1) * query.limit as usize;
    let page: Vec<Video> = videos
        .into_iter()
        .skip(skip)
        .take(query.limit as usize)
        .collect();

    Ok(ApiResponse::ok(page, "videos fetched successfully"))
}

/// Single video joined to its owner projection.
pub async fn get_video_by_id(db: &Db, video_id: Uuid) -> ApiResult<VideoView> {
    ensure_id(video_id, "videoId")?;

    let video = db
        .get_video(video_id)
        .await
        .ok_or_else(|| ApiError::NotFound("video not found".to_string()))?;
    let owner = db
        .get_user(video.owner)
        .await
        .ok_or_else(|| ApiError::NotFound("video owner not found".to_string()))?;

    Ok(ApiResponse::ok(
        VideoView::from_parts(&video, &owner),
        "video fetched successfully",
    ))
}

/// Records a view: bumps the monotonic counter and prepends the video to the
/// viewer's watch history (duplicates allowed).
pub async fn watch_video(db: &Db, video_id: Uuid, viewer: Uuid) -> ApiResult<VideoView> {
    ensure_id(video_id, "videoId")?;
    ensure_id(viewer, "userId")?;

    let video = db.increment_views(video_id).await?;
    db.push_watch_history(viewer, video_id).await?;
    info!("user {} watched video {} ({} views)", viewer, video_id, video.views);

    let owner = db
        .get_user(video.owner)
        .await
        .ok_or_else(|| ApiError::NotFound("video owner not found".to_string()))?;

    Ok(ApiResponse::ok(
        VideoView::from_parts(&video, &owner),
        "video fetched successfully",
    ))
}
