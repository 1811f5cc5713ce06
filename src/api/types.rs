//! API response type definitions.

use serde::Deserialize;

/// Envelope returned by both the profile endpoint and the GraphQL endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `data` object of a profile or media query.
#[derive(Debug, Deserialize)]
pub struct UserData<T> {
    pub user: Option<T>,
}

/// Full user record from `web_profile_info`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserNode {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub profile_pic_url_hd: Option<String>,
    #[serde(default)]
    pub edge_followed_by: Count,
    #[serde(default)]
    pub edge_follow: Count,
    #[serde(default)]
    pub edge_owner_to_timeline_media: Option<MediaConnection>,
}

/// Timeline media page of a user.
#[derive(Debug, Deserialize)]
pub struct TimelineUser {
    pub edge_owner_to_timeline_media: MediaConnection,
}

/// Tagged media page of a user.
#[derive(Debug, Deserialize)]
pub struct TaggedUser {
    pub edge_user_to_photos_of_you: MediaConnection,
}

/// Bare `{"count": n}` object.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Count {
    #[serde(default)]
    pub count: i64,
}

/// One page of a paginated media edge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaConnection {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub edges: Vec<Edge<MediaNode>>,
}

/// Cursor information for the next page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// GraphQL edge wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// A post node.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaNode {
    #[serde(default)]
    pub shortcode: String,
    pub display_url: String,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub edge_liked_by: Option<Count>,
    #[serde(default)]
    pub edge_media_preview_like: Option<Count>,
    #[serde(default)]
    pub edge_sidecar_to_children: Option<SidecarChildren>,
}

/// Carousel children of a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidecarChildren {
    #[serde(default)]
    pub edges: Vec<Edge<SidecarNode>>,
}

/// A single carousel child.
#[derive(Debug, Clone, Deserialize)]
pub struct SidecarNode {
    pub display_url: String,
    #[serde(default)]
    pub is_video: bool,
}
