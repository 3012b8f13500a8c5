//! Playlist membership rules: owner-scoped name uniqueness on create and
//! set-like add/remove over the insertion-ordered video list.

use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::error::{ensure_id, ApiError};
use crate::models::Playlist;
use crate::response::{ApiResponse, ApiResult};
use crate::store::Db;
use crate::views::PlaylistView;

/// Creates a playlist. The duplicate-name rule is a best-effort pre-check,
/// not a store index; callers must tolerate a racing duplicate.
pub async fn create_playlist(
    db: &Db,
    owner: Uuid,
    name: &str,
    description: &str,
) -> ApiResult<Playlist> {
    ensure_id(owner, "userId")?;
    let name = name.trim();
    let description = description.trim();
    if name.is_empty() || description.is_empty() {
        return Err(ApiError::Validation(
            "name and description of playlist are required".to_string(),
        ));
    }

    if db.find_playlist_by_owner_and_name(owner, name).await.is_some() {
        return Err(ApiError::Conflict(
            "user has already created a playlist with the same name".to_string(),
        ));
    }

    let now = Utc::now();
    let playlist = Playlist {
        id: Uuid::new_v4(),
        owner,
        name: name.to_string(),
        description: description.to_string(),
        videos: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    let playlist = db.insert_playlist(playlist).await;
    info!("playlist {} created by {}", playlist.id, owner);

    Ok(ApiResponse::ok(
        playlist,
        "playlist has been successfully created",
    ))
}

/// Appends a video, rejecting duplicates; relative order of existing
/// entries is preserved.
pub async fn add_video_to_playlist(
    db: &Db,
    playlist_id: Uuid,
    video_id: Uuid,
) -> ApiResult<Playlist> {
    ensure_id(playlist_id, "playlistId")?;
    ensure_id(video_id, "videoId")?;

    let mut playlist = db
        .get_playlist(playlist_id)
        .await
        .ok_or_else(|| ApiError::NotFound("playlist not found".to_string()))?;

    if playlist.videos.contains(&video_id) {
        return Err(ApiError::Conflict(
            "video already exists in the playlist".to_string(),
        ));
    }

    playlist.videos.push(video_id);
    playlist.updated_at = Utc::now();
    let playlist = db.put_playlist(playlist).await;

    Ok(ApiResponse::ok(
        playlist,
        "video added to playlist successfully",
    ))
}

/// Removes a video; absence is NotFound ("not a member"). Relative order of
/// the remaining entries is preserved.
pub async fn remove_video_from_playlist(
    db: &Db,
    playlist_id: Uuid,
    video_id: Uuid,
) -> ApiResult<Playlist> {
    ensure_id(playlist_id, "playlistId")?;
    ensure_id(video_id, "videoId")?;

    let mut playlist = db
        .get_playlist(playlist_id)
        .await
        .ok_or_else(|| ApiError::NotFound("playlist not found".to_string()))?;

    if !playlist.videos.contains(&video_id) {
        return Err(ApiError::NotFound(
            "video is not part of the playlist".to_string(),
        ));
    }

    playlist.videos.retain(|id| *id != video_id);
    playlist.updated_at = Utc::now();
    let playlist = db.put_playlist(playlist).await;

    Ok(ApiResponse::ok(
        playlist,
        "video deleted from playlist successfully",
    ))
}

/// All playlists of a user, latest created first, member videos resolved.
pub async fn get_user_playlists(db: &Db, user_id: Uuid) -> ApiResult<Vec<PlaylistView>> {
    ensure_id(user_id, "userId")?;

    let mut playlists = db.playlists_by_owner(user_id).await;
    playlists.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let mut views = Vec::with_capacity(playlists.len());
    for playlist in playlists {
        views.push(resolve_playlist(db, playlist).await);
    }

    Ok(ApiResponse::ok(views, "playlists fetched successfully"))
}

pub async fn get_playlist_by_id(db: &Db, playlist_id: Uuid) -> ApiResult<PlaylistView> {
    ensure_id(playlist_id, "playlistId")?;

    let playlist = db
        .get_playlist(playlist_id)
        .await
        .ok_or_else(|| ApiError::NotFound("playlist not found".to_string()))?;

    Ok(ApiResponse::ok(
        resolve_playlist(db, playlist).await,
        "playlist with id fetched successfully",
    ))
}

/// Batch-fetches the member videos, preserving playlist order and dropping
/// ids whose video has since been deleted.
async fn resolve_playlist(db: &Db, playlist: Playlist) -> PlaylistView {
    let videos = db.videos_by_ids(&playlist.videos).await;
    let resolved = playlist
        .videos
        .iter()
        .filter_map(|id| videos.get(id).cloned())
        .collect();

    PlaylistView {
        id: playlist.id,
        owner: playlist.owner,
        name: playlist.name,
        description: playlist.description,
        videos: resolved,
        created_at: playlist.created_at,
        updated_at: playlist.updated_at,
    }
}
