use crate::error::{MembershipError, Result};
use crate::types::RawTable;
use std::path::Path;
use std::time::Duration;

// Outbound HTTP
pub trait HttpClientPort: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`MembershipError::HttpStatus`]
    pub fn error_for_status(self, url: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(MembershipError::HttpStatus {
                url: url.to_string(),
                status: self.status,
            })
        }
    }
}

/// Channel metadata lookup keyed by channel id
pub trait ChannelPhotoPort: Send + Sync {
    /// `Ok(None)` when the service knows no such channel
    fn fetch_channel_photo_url(&self, channel_id: &str) -> Result<Option<String>>;
}

/// Reads a membership export into an untyped table
pub trait MemberSourcePort: Send + Sync {
    fn read_table(&self, path: &Path) -> Result<RawTable>;
}
