//! Comment join for a video.

use uuid::Uuid;

use crate::error::ensure_id;
use crate::response::{ApiResponse, ApiResult};
use crate::store::Db;
use crate::views::{CommentView, OwnerView};

/// All comments on a video joined to their authors, oldest first.
pub async fn get_video_comments(db: &Db, video_id: Uuid) -> ApiResult<Vec<CommentView>> {
    ensure_id(video_id, "videoId")?;

    let mut comments = db.comments_by_video(video_id).await;
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let owner_ids: Vec<Uuid> = comments.iter().map(|c| c.owner).collect();
    let owners = db.users_by_ids(&owner_ids).await;

    let comments = comments
        .iter()
        .filter_map(|c| {
            let owner = owners.get(&c.owner)?;
            Some(CommentView {
                id: c.id,
                content: c.content.clone(),
                owner: OwnerView::from_user(owner),
                created_at: c.created_at,
                updated_at: c.updated_at,
            })
        })
        .collect();

    Ok(ApiResponse::ok(comments, "comments fetched successfully"))
}
