//! Conversion of API nodes into domain types.

use crate::api::types::{MediaNode, UserNode};
use crate::media::item::{MediaRef, Post};
use crate::media::profile::Profile;

/// Like count used when the platform returns none.
const HIDDEN_LIKES: i64 = -1;

/// Build a [`Profile`] from a `web_profile_info` user record.
pub fn parse_profile(user: &UserNode) -> Profile {
    let avatar_url = user
        .profile_pic_url_hd
        .clone()
        .or_else(|| user.profile_pic_url.clone())
        .unwrap_or_default();

    Profile {
        id: user.id.clone(),
        handle: user.username.clone(),
        display_name: user.full_name.clone().unwrap_or_default(),
        is_private: user.is_private,
        is_verified: user.is_verified,
        post_count: user
            .edge_owner_to_timeline_media
            .as_ref()
            .map(|m| m.count)
            .unwrap_or(0),
        followers: user.edge_followed_by.count,
        following: user.edge_follow.count,
        biography: user.biography.clone().unwrap_or_default(),
        avatar_url,
    }
}

/// Build a [`Post`] from a media node, preserving carousel order.
pub fn parse_post(node: &MediaNode) -> Post {
    let sub_items = node
        .edge_sidecar_to_children
        .as_ref()
        .map(|children| {
            children
                .edges
                .iter()
                .map(|edge| MediaRef {
                    url: edge.node.display_url.clone(),
                    is_video: edge.node.is_video,
                })
                .collect()
        })
        .unwrap_or_default();

    // Older responses use edge_liked_by, newer ones edge_media_preview_like
    let likes = node
        .edge_liked_by
        .or(node.edge_media_preview_like)
        .map(|c| c.count)
        .unwrap_or(HIDDEN_LIKES);

    Post {
        shortcode: node.shortcode.clone(),
        url: node.display_url.clone(),
        is_video: node.is_video,
        sub_items,
        likes,
    }
}
