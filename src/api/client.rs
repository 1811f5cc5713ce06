//! Instagram web API client.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::source::{PostStream, ProfileSource};
use crate::api::types::*;
use crate::error::{Error, Result};
use crate::media::{parse_post, parse_profile, Post, Profile};

/// Profile metadata host.
pub const API_BASE: &str = "https://i.instagram.com";

/// GraphQL host used for media pagination.
pub const GRAPHQL_BASE: &str = "https://www.instagram.com";

/// Web app id expected by the public endpoints.
pub const DEFAULT_APP_ID: &str = "936619743392459";

/// Posts requested per GraphQL page.
pub const PAGE_SIZE: u32 = 12;

const TIMELINE_QUERY_HASH: &str = "003056d32c2554def87228bc3fd9668a";
const TAGGED_QUERY_HASH: &str = "e31a871f7301132ceaab56507a66bbb7";

/// Which media edge of a user to paginate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MediaEdge {
    Timeline,
    Tagged,
}

/// Connection settings for [`InstagramApi`].
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub api_base: String,
    pub graphql_base: String,
    pub app_id: String,
    pub user_agent: String,
    pub session_id: Option<String>,
    pub timeout: Duration,
}

/// Instagram web client implementing [`ProfileSource`].
pub struct InstagramApi {
    client: Client,
    api_base: String,
    graphql_base: String,
    app_id: String,
    session_id: Option<String>,
}

/// Pagination state threaded through the post stream.
struct PageCursor {
    buffer: VecDeque<Post>,
    after: Option<String>,
    exhausted: bool,
}

impl InstagramApi {
    /// Create a new API client.
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            graphql_base: settings.graphql_base.trim_end_matches('/').to_string(),
            app_id: settings.app_id,
            session_id: settings.session_id,
        })
    }

    /// Build common headers for API requests.
    fn build_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            "x-ig-app-id",
            self.app_id
                .parse()
                .map_err(|_| Error::Config(format!("Invalid app id: {}", self.app_id)))?,
        );

        if let Some(session_id) = &self.session_id {
            let cookie = format!("sessionid={}", session_id);
            headers.insert(
                header::COOKIE,
                cookie
                    .parse()
                    .map_err(|_| Error::Config("Invalid session id".into()))?,
            );
        }

        Ok(headers)
    }

    /// Make a GET request and map the common failure statuses.
    async fn get(&self, url: Url) -> Result<Response> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .headers(self.build_headers()?)
            .send()
            .await
            .map_err(|e| Error::TransientFetch(format!("{}: {}", url, e)))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited(60));
        }

        Ok(response)
    }

    /// Read a successful response body as JSON.
    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::TransientFetch(format!("Failed to read {}: {}", what, e)))?;

        if !status.is_success() {
            return Err(Error::Api(format!(
                "Failed to get {}: HTTP {} - {}",
                what,
                status,
                snippet(&text, 200)
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse {}: {} - Response: {}",
                what,
                e,
                snippet(&text, 500)
            ))
        })
    }

    /// Get raw profile information by handle.
    pub async fn get_profile_info(&self, handle: &str) -> Result<UserNode> {
        let url = Url::parse_with_params(
            &format!("{}/api/v1/users/web_profile_info/", self.api_base),
            &[("username", handle)],
        )?;

        let response = self.get(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(handle.to_string()));
        }

        let api_response: ApiResponse<UserData<UserNode>> =
            Self::read_json(response, "profile").await?;

        api_response
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| Error::NotFound(handle.to_string()))
    }

    /// Get one page of a user's media edge.
    async fn get_media_page(
        &self,
        edge: MediaEdge,
        user_id: &str,
        after: Option<&str>,
    ) -> Result<MediaConnection> {
        let query_hash = match edge {
            MediaEdge::Timeline => TIMELINE_QUERY_HASH,
            MediaEdge::Tagged => TAGGED_QUERY_HASH,
        };

        let mut variables = serde_json::json!({ "id": user_id, "first": PAGE_SIZE });
        if let Some(after) = after {
            variables["after"] = serde_json::Value::String(after.to_string());
        }

        let url = Url::parse_with_params(
            &format!("{}/graphql/query/", self.graphql_base),
            &[
                ("query_hash", query_hash),
                ("variables", &variables.to_string()),
            ],
        )?;

        let response = self.get(url).await?;

        let connection = match edge {
            MediaEdge::Timeline => {
                let page: ApiResponse<UserData<TimelineUser>> =
                    Self::read_json(response, "timeline page").await?;
                page.data
                    .and_then(|d| d.user)
                    .map(|u| u.edge_owner_to_timeline_media)
            }
            MediaEdge::Tagged => {
                let page: ApiResponse<UserData<TaggedUser>> =
                    Self::read_json(response, "tagged page").await?;
                page.data
                    .and_then(|d| d.user)
                    .map(|u| u.edge_user_to_photos_of_you)
            }
        };

        connection.ok_or_else(|| Error::Api("Media page did not contain a user".into()))
    }

    /// Lazily paginate a media edge, fetching the next page only once the
    /// current one has been fully consumed.
    fn media_stream<'a>(&'a self, edge: MediaEdge, user_id: &'a str) -> PostStream<'a> {
        let init = PageCursor {
            buffer: VecDeque::new(),
            after: None,
            exhausted: false,
        };

        stream::try_unfold(init, move |cursor| self.next_post(edge, user_id, cursor)).boxed()
    }

    /// Pop the next buffered post, fetching a new page when the buffer runs dry.
    async fn next_post(
        &self,
        edge: MediaEdge,
        user_id: &str,
        mut cursor: PageCursor,
    ) -> Result<Option<(Post, PageCursor)>> {
        loop {
            if let Some(post) = cursor.buffer.pop_front() {
                return Ok(Some((post, cursor)));
            }
            if cursor.exhausted {
                return Ok(None);
            }

            let page = self
                .get_media_page(edge, user_id, cursor.after.as_deref())
                .await?;
            tracing::debug!(
                "Fetched {} posts (has_next_page={})",
                page.edges.len(),
                page.page_info.has_next_page
            );

            cursor.exhausted = page.edges.is_empty()
                || !page.page_info.has_next_page
                || page.page_info.end_cursor.is_none();
            cursor.after = page.page_info.end_cursor;
            cursor
                .buffer
                .extend(page.edges.iter().map(|edge| parse_post(&edge.node)));
        }
    }
}

/// First `max` characters of a response body, for error messages.
fn snippet(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[async_trait]
impl ProfileSource for InstagramApi {
    async fn fetch_profile(&self, handle: &str) -> Result<Profile> {
        let user = self.get_profile_info(handle).await?;
        Ok(parse_profile(&user))
    }

    fn posts<'a>(&'a self, profile: &'a Profile) -> PostStream<'a> {
        self.media_stream(MediaEdge::Timeline, &profile.id)
    }

    fn tagged_posts<'a>(&'a self, profile: &'a Profile) -> PostStream<'a> {
        self.media_stream(MediaEdge::Tagged, &profile.id)
    }
}
