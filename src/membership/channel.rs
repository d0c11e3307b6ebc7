use crate::constants::CHANNEL_SEGMENT;

/// Extracts the channel identifier from a profile URL such as
/// `https://www.youtube.com/channel/<id>/join`.
///
/// Returns `None` when the URL has no `channel/` segment or the identifier is empty.
pub fn extract_channel_id(url: &str) -> Option<&str> {
    let start = url.find(CHANNEL_SEGMENT)? + CHANNEL_SEGMENT.len();
    let rest = &url[start..];
    let id = rest.split('/').next().unwrap_or_default();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
