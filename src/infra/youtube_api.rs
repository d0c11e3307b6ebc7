use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::app::ports::{ChannelPhotoPort, HttpClientPort};
use crate::config::YoutubeConfig;
use crate::error::Result;

/// Body of the `channels` endpoint, restricted to what we read
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    /// Absent when no channel matches the id
    pub items: Option<Vec<ChannelItem>>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelItem {
    pub snippet: ChannelSnippet,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnails {
    pub default: Thumbnail,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Outcome of a channel lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelLookup {
    Found { photo_url: String },
    NotFound,
}

impl From<ChannelListResponse> for ChannelLookup {
    fn from(response: ChannelListResponse) -> Self {
        match response.items.and_then(|items| items.into_iter().next()) {
            Some(item) => ChannelLookup::Found {
                photo_url: item.snippet.thumbnails.default.url,
            },
            None => ChannelLookup::NotFound,
        }
    }
}

impl ChannelLookup {
    pub fn into_photo_url(self) -> Option<String> {
        match self {
            ChannelLookup::Found { photo_url } => Some(photo_url),
            ChannelLookup::NotFound => None,
        }
    }
}

/// YouTube Data API client for channel thumbnails
pub struct YoutubeChannelApi {
    http: Box<dyn HttpClientPort>,
    config: YoutubeConfig,
}

impl YoutubeChannelApi {
    pub fn new(http: Box<dyn HttpClientPort>, config: YoutubeConfig) -> Self {
        Self { http, config }
    }

    #[instrument(skip(self))]
    pub fn lookup(&self, channel_id: &str) -> Result<ChannelLookup> {
        let url = self.config.api_base_url.as_str();
        let mut query = vec![("part", "snippet"), ("id", channel_id)];
        if let Some(key) = self.config.api_key.as_deref() {
            query.push(("key", key));
        }

        let response = self
            .http
            .get(url, &query, Duration::from_secs(self.config.timeout_seconds))?;
        if !response.is_success() {
            warn!("Channel lookup returned HTTP {}", response.status);
        }
        // error replies (quota, bad key) carry no `items` and read as NotFound
        let body: ChannelListResponse = serde_json::from_slice(&response.bytes)?;
        let lookup = ChannelLookup::from(body);
        debug!("Channel lookup result: {:?}", lookup);
        Ok(lookup)
    }
}

impl ChannelPhotoPort for YoutubeChannelApi {
    fn fetch_channel_photo_url(&self, channel_id: &str) -> Result<Option<String>> {
        Ok(self.lookup(channel_id)?.into_photo_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::HttpGetResult;
    use crate::error::MembershipError;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    type Requests = Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>;

    struct FakeHttp {
        status: u16,
        body: String,
        requests: Requests,
    }

    impl HttpClientPort for FakeHttp {
        fn get(&self, url: &str, query: &[(&str, &str)], _timeout: Duration) -> Result<HttpGetResult> {
            let query = query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.requests.lock().unwrap().push((url.to_string(), query));
            Ok(HttpGetResult {
                status: self.status,
                bytes: self.body.clone().into_bytes(),
                content_type: "application/json".to_string(),
            })
        }
    }

    fn api(status: u16, body: String, api_key: Option<&str>) -> (YoutubeChannelApi, Requests) {
        let requests: Requests = Arc::new(Mutex::new(Vec::new()));
        let config = YoutubeConfig {
            api_key: api_key.map(str::to_string),
            ..Default::default()
        };
        let api = YoutubeChannelApi::new(
            Box::new(FakeHttp {
                status,
                body,
                requests: requests.clone(),
            }),
            config,
        );
        (api, requests)
    }

    #[test]
    fn test_fetch_channel_photo_url() {
        let body = json!({
            "kind": "youtube#channelListResponse",
            "items": [
                { "snippet": { "title": "Canal", "thumbnails": { "default": { "url": "https://yt3.example/first.jpg" } } } },
                { "snippet": { "thumbnails": { "default": { "url": "https://yt3.example/second.jpg" } } } }
            ]
        })
        .to_string();
        let (api, requests) = api(200, body, Some("secret"));

        let result = api.fetch_channel_photo_url("UCFuIUoyHB12qpYa8Jpxoxow").unwrap();

        assert_eq!(result.as_deref(), Some("https://yt3.example/first.jpg"));
        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (url, query) = &requests[0];
        assert_eq!(url, "https://www.googleapis.com/youtube/v3/channels");
        assert!(query.contains(&("id".to_string(), "UCFuIUoyHB12qpYa8Jpxoxow".to_string())));
        assert!(query.contains(&("part".to_string(), "snippet".to_string())));
        assert!(query.contains(&("key".to_string(), "secret".to_string())));
    }

    #[test]
    fn test_fetch_channel_photo_url_with_none_result() {
        let body = json!({ "kind": "youtube#channelListResponse", "pageInfo": { "totalResults": 0 } })
            .to_string();
        let (api, requests) = api(200, body, None);

        assert!(api.fetch_channel_photo_url("UCunknown").unwrap().is_none());
        let (_, query) = &requests.lock().unwrap()[0];
        assert!(!query.iter().any(|(k, _)| k == "key"));
    }

    #[test]
    fn test_empty_items_is_not_found() {
        let (api, _) = api(200, json!({ "items": [] }).to_string(), None);
        assert_eq!(api.lookup("UCunknown").unwrap(), ChannelLookup::NotFound);
    }

    #[test]
    fn test_malformed_item_is_an_error() {
        let (api, _) = api(200, json!({ "items": [{ "snippet": {} }] }).to_string(), None);
        assert!(matches!(
            api.fetch_channel_photo_url("UCx"),
            Err(MembershipError::Json(_))
        ));
    }

    #[test]
    fn test_error_reply_without_items_is_no_photo() {
        let body = json!({ "error": { "code": 403, "message": "quotaExceeded" } }).to_string();
        let (api, _) = api(403, body, None);
        assert!(api.fetch_channel_photo_url("UCx").unwrap().is_none());
    }

    #[test]
    fn test_non_json_error_reply_propagates() {
        let (api, _) = api(502, "<html>Bad Gateway</html>".to_string(), None);
        assert!(matches!(
            api.fetch_channel_photo_url("UCx"),
            Err(MembershipError::Json(_))
        ));
    }
}
