//! Integration tests for the menu-level export operations.
//!
//! An in-memory profile source and media fetcher stand in for the network,
//! so every run is deterministic and writes only into a temp directory.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use insta_scraper::api::{FetchResponse, MediaFetcher, PostStream, ProfileSource};
use insta_scraper::error::{Error, Result};
use insta_scraper::export::{
    download_most_liked, download_posts, export_links, export_tagged_links, ExportOptions,
    SelectionError,
};
use insta_scraper::media::{MediaRef, Post, Profile};
use insta_scraper::output::BarOptions;

/// Serves a fixed list of posts and counts how many were pulled.
#[derive(Default)]
struct MemorySource {
    posts: Vec<Post>,
    tagged: Vec<Post>,
    /// Yield a transport error once the posts are exhausted.
    fail_at_end: bool,
    pulled: AtomicUsize,
}

impl MemorySource {
    fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            ..Default::default()
        }
    }

    fn pulled(&self) -> usize {
        self.pulled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileSource for MemorySource {
    async fn fetch_profile(&self, handle: &str) -> Result<Profile> {
        Err(Error::NotFound(handle.to_string()))
    }

    fn posts<'a>(&'a self, _profile: &'a Profile) -> PostStream<'a> {
        let tail = if self.fail_at_end {
            vec![Err(Error::TransientFetch("connection reset".into()))]
        } else {
            Vec::new()
        };
        stream::iter(self.posts.iter().cloned())
            .inspect(move |_| {
                self.pulled.fetch_add(1, Ordering::SeqCst);
            })
            .map(Ok)
            .chain(stream::iter(tail))
            .boxed()
    }

    fn tagged_posts<'a>(&'a self, _profile: &'a Profile) -> PostStream<'a> {
        stream::iter(self.tagged.iter().cloned().map(Ok)).boxed()
    }
}

/// Answers every URL with its own bytes, or with a configured status.
#[derive(Default)]
struct MemoryFetcher {
    statuses: HashMap<String, u16>,
}

impl MemoryFetcher {
    fn with_status(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }
}

#[async_trait]
impl MediaFetcher for MemoryFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse> {
        Ok(FetchResponse {
            status: self.statuses.get(url).copied().unwrap_or(200),
            bytes: url.as_bytes().to_vec(),
        })
    }
}

fn profile(post_count: u64) -> Profile {
    Profile {
        id: "42".into(),
        handle: "tester".into(),
        post_count,
        ..Default::default()
    }
}

fn options(dir: &std::path::Path) -> ExportOptions {
    ExportOptions {
        output_dir: dir.to_path_buf(),
        bar: BarOptions::default().hidden(),
        download_delay_ms: (0, 0),
        show_downloads: false,
    }
}

fn image_posts(n: usize) -> Vec<Post> {
    (1..=n)
        .map(|i| Post::image(format!("p{}", i), format!("https://cdn/p{}.jpg", i), i as i64))
        .collect()
}

#[tokio::test]
async fn download_posts_pulls_only_the_requested_posts() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(image_posts(10));
    let fetcher = MemoryFetcher::default();

    let summary = download_posts(&source, &fetcher, &profile(10), 3, &options(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.units, 3);
    assert_eq!(source.pulled(), 3);

    let folder = dir.path().join("tester");
    for n in 1..=3 {
        assert!(folder.join(format!("post_number_{}.png", n)).exists());
    }
    assert!(!folder.join("post_number_4.png").exists());
}

#[tokio::test]
async fn download_posts_skips_videos_without_counting_them() {
    let dir = tempfile::tempdir().unwrap();
    let mut posts = vec![Post::video("v1", "https://cdn/v1.mp4", 9)];
    posts.extend(image_posts(3));
    let source = MemorySource::new(posts);
    let fetcher = MemoryFetcher::default();

    let summary = download_posts(&source, &fetcher, &profile(4), 2, &options(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.units, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(source.pulled(), 3);

    let first = std::fs::read(dir.path().join("tester/post_number_1.png")).unwrap();
    assert_eq!(first, b"https://cdn/p1.jpg");
}

#[tokio::test]
async fn download_posts_names_carousel_entries_and_drops_videos() {
    let dir = tempfile::tempdir().unwrap();
    let carousel = Post::carousel(
        "c1",
        vec![
            MediaRef::image("https://cdn/a.jpg"),
            MediaRef::image("https://cdn/b.jpg"),
            MediaRef::video("https://cdn/c.mp4"),
        ],
        5,
    );
    let source = MemorySource::new(vec![carousel]);
    let fetcher = MemoryFetcher::default();

    let summary = download_posts(&source, &fetcher, &profile(1), 1, &options(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.units, 2);
    let folder = dir.path().join("tester");
    assert_eq!(
        std::fs::read(folder.join("post_number_11.png")).unwrap(),
        b"https://cdn/a.jpg"
    );
    assert_eq!(
        std::fs::read(folder.join("post_number_12.png")).unwrap(),
        b"https://cdn/b.jpg"
    );
    assert!(!folder.join("post_number_13.png").exists());
}

#[tokio::test]
async fn download_posts_continues_after_a_failed_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(image_posts(2));
    let fetcher = MemoryFetcher::default().with_status("https://cdn/p1.jpg", 404);

    let summary = download_posts(&source, &fetcher, &profile(2), 2, &options(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.failures, 1);
    assert_eq!(summary.units, 1);

    let folder = dir.path().join("tester");
    assert!(!folder.join("post_number_1.png").exists());
    assert!(folder.join("post_number_2.png").exists());
}

#[tokio::test]
async fn download_posts_rejects_counts_above_post_count() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(image_posts(2));
    let fetcher = MemoryFetcher::default();

    let err = download_posts(&source, &fetcher, &profile(2), 5, &options(dir.path()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Selection(SelectionError::OutOfRange { requested: 5, total: 2 })
    ));
    assert_eq!(source.pulled(), 0);
}

#[tokio::test]
async fn private_profile_leaves_no_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(image_posts(3));
    let fetcher = MemoryFetcher::default();
    let locked = Profile {
        is_private: true,
        ..profile(3)
    };
    let opts = options(dir.path());

    let err = export_links(&source, &locked, &opts).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = download_posts(&source, &fetcher, &locked, 1, &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = export_tagged_links(&source, &locked, &opts).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = download_most_liked(&source, &fetcher, &locked, &opts)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(ref handle) if handle == "tester"));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert_eq!(source.pulled(), 0);
}

#[tokio::test]
async fn export_links_writes_one_line_per_media_entry() {
    let dir = tempfile::tempdir().unwrap();
    let posts = vec![
        Post::image("p1", "https://cdn/p1.jpg", 1),
        Post::carousel(
            "c1",
            vec![
                MediaRef::image("https://cdn/a.jpg"),
                MediaRef::video("https://cdn/b.mp4"),
            ],
            2,
        ),
    ];
    let source = MemorySource::new(posts);

    let summary = export_links(&source, &profile(2), &options(dir.path()))
        .await
        .unwrap();

    let path = dir.path().join("testerLinksToPosts.txt");
    assert_eq!(summary.units, 3);
    assert_eq!(summary.artifacts, vec![path.clone()]);
    assert_eq!(
        std::fs::read_to_string(path).unwrap(),
        "https://cdn/p1.jpg\nhttps://cdn/a.jpg\nhttps://cdn/b.mp4\n"
    );
}

#[tokio::test]
async fn export_links_keeps_lines_written_before_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource {
        fail_at_end: true,
        ..MemorySource::new(image_posts(2))
    };

    let err = export_links(&source, &profile(3), &options(dir.path()))
        .await
        .unwrap_err();

    match err {
        Error::PartialExport { units, source } => {
            assert_eq!(units, 2);
            assert!(matches!(*source, Error::TransientFetch(_)));
        }
        other => panic!("expected PartialExport, got {:?}", other),
    }
    assert_eq!(
        std::fs::read_to_string(dir.path().join("testerLinksToPosts.txt")).unwrap(),
        "https://cdn/p1.jpg\nhttps://cdn/p2.jpg\n"
    );
}

#[tokio::test]
async fn empty_tagged_collection_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(image_posts(1));

    let summary = export_tagged_links(&source, &profile(1), &options(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.units, 0);
    assert!(summary.artifacts.is_empty());
    assert!(!dir.path().join("testerTaggedPostLinks.txt").exists());
}

#[tokio::test]
async fn tagged_links_use_the_primary_url() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource {
        tagged: vec![Post::carousel(
            "t1",
            vec![
                MediaRef::image("https://cdn/t1a.jpg"),
                MediaRef::image("https://cdn/t1b.jpg"),
            ],
            0,
        )],
        ..Default::default()
    };

    let summary = export_tagged_links(&source, &profile(0), &options(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.units, 1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("testerTaggedPostLinks.txt")).unwrap(),
        "https://cdn/t1a.jpg\n"
    );
}

#[tokio::test]
async fn most_liked_picks_the_first_maximum() {
    let dir = tempfile::tempdir().unwrap();
    let posts = [3, 7, 2, 7]
        .iter()
        .enumerate()
        .map(|(i, likes)| Post::image(format!("p{}", i), format!("https://cdn/m{}.jpg", i), *likes))
        .collect();
    let source = MemorySource::new(posts);
    let fetcher = MemoryFetcher::default();

    let summary = download_most_liked(&source, &fetcher, &profile(4), &options(dir.path()))
        .await
        .unwrap();

    assert_eq!(summary.posts_seen, 4);
    assert_eq!(summary.units, 1);
    assert_eq!(
        std::fs::read(dir.path().join("tester/mostLikedPost.png")).unwrap(),
        b"https://cdn/m1.jpg"
    );
}

#[tokio::test]
async fn most_liked_with_no_posts_downloads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let source = MemorySource::new(Vec::new());
    let fetcher = MemoryFetcher::default();

    let summary = download_most_liked(&source, &fetcher, &profile(0), &options(dir.path()))
        .await
        .unwrap();

    assert!(summary.is_empty());
    assert!(!dir.path().join("tester/mostLikedPost.png").exists());
}
