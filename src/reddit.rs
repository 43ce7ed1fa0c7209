use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::ContentItem;
use crate::error::{PersonaError, Result};

static PROFILE_URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"reddit.com/(?:u|user)/([^/]+)/?").unwrap());

const PERMALINK_HOST: &str = "https://www.reddit.com";

/// Pull the username out of a profile URL such as
/// `https://www.reddit.com/user/spez/`.
pub fn parse_username(url: &str) -> Result<String> {
    PROFILE_URL_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| PersonaError::InvalidProfileUrl(url.to_string()))
}

/// Listing envelope returned by `/user/{name}/{kind}.json`.
#[derive(Debug, Default, Deserialize)]
pub struct Listing {
    #[serde(default)]
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
pub struct ListingChild {
    pub data: Thing,
}

/// Fields shared by submissions and comments. Missing strings read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct Thing {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub permalink: String,
}

impl Thing {
    fn reference(&self) -> String {
        format!("{}{}", PERMALINK_HOST, self.permalink)
    }

    pub fn into_post(self) -> ContentItem {
        let reference = self.reference();
        ContentItem::new(format!("{} {}", self.title, self.selftext), self.subreddit, reference)
    }

    pub fn into_comment(self) -> ContentItem {
        let reference = self.reference();
        ContentItem::new(self.body, self.subreddit, reference)
    }
}

impl Listing {
    pub fn into_posts(self) -> Vec<ContentItem> {
        self.data.children.into_iter().map(|c| c.data.into_post()).collect()
    }

    pub fn into_comments(self) -> Vec<ContentItem> {
        self.data.children.into_iter().map(|c| c.data.into_comment()).collect()
    }
}

/// Single-page reader for a user's public submissions and comments.
pub struct RedditClient {
    client: Client,
    base_url: String,
    limit: u32,
}

impl RedditClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
        })
    }

    pub fn listing_url(&self, username: &str, kind: &str) -> String {
        format!("{}/user/{}/{}.json", self.base_url, username, kind)
    }

    /// Make a GET request for one listing page
    pub async fn get_listing(&self, url: &str) -> Result<Listing> {
        debug!(url, limit = self.limit, "fetching listing");
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(&[("limit", self.limit)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PersonaError::Status {
                url: url.to_string(),
                status,
            });
        }

        let listing: Listing = response.json().await?;
        Ok(listing)
    }

    pub async fn fetch_posts(&self, username: &str) -> Result<Vec<ContentItem>> {
        let url = self.listing_url(username, "submitted");
        Ok(self.get_listing(&url).await?.into_posts())
    }

    pub async fn fetch_comments(&self, username: &str) -> Result<Vec<ContentItem>> {
        let url = self.listing_url(username, "comments");
        Ok(self.get_listing(&url).await?.into_comments())
    }

    /// Fetch posts and comments concurrently. Either failure aborts both.
    pub async fn fetch_history(&self, username: &str) -> Result<(Vec<ContentItem>, Vec<ContentItem>)> {
        let (posts, comments) =
            tokio::try_join!(self.fetch_posts(username), self.fetch_comments(username))?;

        info!(username, posts = posts.len(), comments = comments.len(), "fetched history");
        Ok((posts, comments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_username() {
        assert_eq!(parse_username("https://www.reddit.com/user/spez/").unwrap(), "spez");
        assert_eq!(parse_username("https://reddit.com/u/kojied").unwrap(), "kojied");
        assert_eq!(
            parse_username("https://old.reddit.com/user/Hungry-Move-6603/comments/").unwrap(),
            "Hungry-Move-6603"
        );
    }

    #[test]
    fn test_parse_username_rejects_other_urls() {
        let err = parse_username("https://www.reddit.com/r/rust/").unwrap_err();
        assert!(matches!(err, PersonaError::InvalidProfileUrl(_)));
        assert!(parse_username("spez").is_err());
    }

    #[test]
    fn test_posts_from_listing() {
        let value = json!({
            "kind": "Listing",
            "data": {
                "children": [
                    {"kind": "t3", "data": {
                        "title": "I'm 29",
                        "selftext": "and I live in Denver",
                        "subreddit": "denver",
                        "permalink": "/r/denver/comments/abc/x/"
                    }},
                    {"kind": "t3", "data": {"title": "link post", "subreddit": "pics"}}
                ]
            }
        });

        let listing: Listing = serde_json::from_value(value).unwrap();
        let posts = listing.into_posts();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "I'm 29 and I live in Denver");
        assert_eq!(posts[0].community, "denver");
        assert_eq!(posts[0].reference, "https://www.reddit.com/r/denver/comments/abc/x/");
        assert_eq!(posts[1].text, "link post ");
        assert_eq!(posts[1].reference, "https://www.reddit.com");
    }

    #[test]
    fn test_comments_from_listing() {
        let value = json!({
            "data": {"children": [
                {"data": {"body": "I work as a nurse", "subreddit": "nursing", "permalink": "/r/nursing/c/1/"}},
                {"data": {}}
            ]}
        });

        let listing: Listing = serde_json::from_value(value).unwrap();
        let comments = listing.into_comments();

        assert_eq!(comments[0], ContentItem::new(
            "I work as a nurse",
            "nursing",
            "https://www.reddit.com/r/nursing/c/1/",
        ));
        assert_eq!(comments[1].text, "");
        assert_eq!(comments[1].community, "");
    }

    #[test]
    fn test_listing_without_children() {
        let listing: Listing = serde_json::from_value(json!({"kind": "Listing"})).unwrap();
        assert!(listing.into_posts().is_empty());
    }

    #[test]
    fn test_listing_url() {
        let config = Config {
            base_url: "https://example.test/".to_string(),
            ..Config::default()
        };
        let client = RedditClient::new(&config).unwrap();

        assert_eq!(
            client.listing_url("alice", "submitted"),
            "https://example.test/user/alice/submitted.json"
        );
    }

    fn mock_config(server: &MockServer) -> Config {
        Config {
            base_url: server.uri(),
            user_agent: "persona-test/1.0".to_string(),
            limit: 25,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_posts_keeps_api_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/alice/submitted.json"))
            .and(query_param("limit", "25"))
            .and(header("user-agent", "persona-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"children": [
                    {"data": {"title": "newest", "selftext": "I'm 29", "subreddit": "a", "permalink": "/p/2/"}},
                    {"data": {"title": "older", "selftext": "", "subreddit": "b", "permalink": "/p/1/"}}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = RedditClient::new(&mock_config(&server)).unwrap();
        let posts = client.fetch_posts("alice").await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].text, "newest I'm 29");
        assert_eq!(posts[0].reference, "https://www.reddit.com/p/2/");
        assert_eq!(posts[1].community, "b");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/ghost/submitted.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = RedditClient::new(&mock_config(&server)).unwrap();
        let err = client.fetch_posts("ghost").await.unwrap_err();

        match err {
            PersonaError::Status { url, status } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert!(url.ends_with("/user/ghost/submitted.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_history_fails_when_comments_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/alice/submitted.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"children": []}})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user/alice/comments.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = RedditClient::new(&mock_config(&server)).unwrap();
        let result = client.fetch_history("alice").await;

        assert!(matches!(
            result,
            Err(PersonaError::Status { status, .. }) if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
        ));
    }
}
