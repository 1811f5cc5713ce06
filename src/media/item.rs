//! Post and media reference representation.

/// A reference to one piece of remote media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    /// Direct display URL.
    pub url: String,

    /// Whether the referenced media is a video.
    pub is_video: bool,
}

impl MediaRef {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_video: false,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_video: true,
        }
    }
}

/// One remote post as yielded by a post stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Post {
    /// Short identifier of the post.
    pub shortcode: String,

    /// Primary media URL.
    pub url: String,

    /// Whether the primary media is a video.
    pub is_video: bool,

    /// Carousel entries in display order (empty for single-media posts).
    pub sub_items: Vec<MediaRef>,

    /// Like count. Negative when the platform hides it.
    pub likes: i64,
}

impl Post {
    /// A single-image post.
    pub fn image(shortcode: impl Into<String>, url: impl Into<String>, likes: i64) -> Self {
        Self {
            shortcode: shortcode.into(),
            url: url.into(),
            is_video: false,
            sub_items: Vec::new(),
            likes,
        }
    }

    /// A single-video post.
    pub fn video(shortcode: impl Into<String>, url: impl Into<String>, likes: i64) -> Self {
        Self {
            is_video: true,
            ..Self::image(shortcode, url, likes)
        }
    }

    /// A carousel post. The primary URL is the first sub-item's URL.
    pub fn carousel(shortcode: impl Into<String>, sub_items: Vec<MediaRef>, likes: i64) -> Self {
        let url = sub_items.first().map(|m| m.url.clone()).unwrap_or_default();
        Self {
            shortcode: shortcode.into(),
            url,
            is_video: false,
            sub_items,
            likes,
        }
    }

    /// Whether the post carries more than one media entry.
    pub fn is_carousel(&self) -> bool {
        self.sub_items.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carousel_requires_two_items() {
        let single = Post::carousel("a", vec![MediaRef::image("u1")], 0);
        assert!(!single.is_carousel());

        let double = Post::carousel("b", vec![MediaRef::image("u1"), MediaRef::video("u2")], 0);
        assert!(double.is_carousel());
        assert_eq!(double.url, "u1");
    }
}
