use std::time::Duration;
use tracing::{debug, instrument};

use crate::app::ports::{ChannelPhotoPort, HttpClientPort};
use crate::constants::PHOTO_FETCH_TIMEOUT_SECS;
use crate::error::Result;
use crate::membership::{extract_channel_id, get_membership_badge_image, render_ascii_art, ArtOptions};
use crate::types::{ExtraInfo, MemberRecord};

/// Use case for deriving photo, photo art and badge for a member
pub struct EnrichUseCase {
    photos: Box<dyn ChannelPhotoPort>,
    http: Box<dyn HttpClientPort>,
    art: ArtOptions,
}

impl EnrichUseCase {
    pub fn new(photos: Box<dyn ChannelPhotoPort>, http: Box<dyn HttpClientPort>) -> Self {
        Self {
            photos,
            http,
            art: ArtOptions::default(),
        }
    }

    pub fn with_art_options(mut self, art: ArtOptions) -> Self {
        self.art = art;
        self
    }

    /// Photo URL for the channel behind `profile_url`.
    ///
    /// No lookup is made when the URL carries no channel id.
    #[instrument(skip(self))]
    pub fn get_user_photo_url(&self, profile_url: &str) -> Result<Option<String>> {
        match extract_channel_id(profile_url) {
            Some(channel_id) => self.fetch_channel_photo_url(channel_id),
            None => {
                debug!("No channel id in profile url");
                Ok(None)
            }
        }
    }

    pub fn fetch_channel_photo_url(&self, channel_id: &str) -> Result<Option<String>> {
        self.photos.fetch_channel_photo_url(channel_id)
    }

    /// Downloads the photo and renders it as text art. `None` in, `None` out.
    #[instrument(skip(self))]
    pub fn photo_url_to_ascii_art(&self, photo_url: Option<&str>) -> Result<Option<String>> {
        let Some(url) = photo_url else {
            return Ok(None);
        };

        let response = self
            .http
            .get(url, &[], Duration::from_secs(PHOTO_FETCH_TIMEOUT_SECS))?
            .error_for_status(url)?;
        debug!(
            "Fetched {} bytes of {}",
            response.bytes.len(),
            response.content_type
        );

        let image = image::load_from_memory(&response.bytes)?;
        Ok(Some(render_ascii_art(&image, &self.art)))
    }

    /// Photo URL, then art for that URL, then badge for the member's tenure.
    /// Errors from any step propagate.
    #[instrument(skip(self, member), fields(member = %member.name))]
    pub fn get_extra_info(&self, member: &MemberRecord) -> Result<ExtraInfo> {
        let photo_url = self.get_user_photo_url(&member.profile_url)?;
        let photo_art = self.photo_url_to_ascii_art(photo_url.as_deref())?;
        let badge_image_path = get_membership_badge_image(member.total_time_as_member)?;

        Ok(ExtraInfo {
            photo_url,
            badge_image_path,
            photo_art,
        })
    }

    /// Badge only, without touching the network
    pub fn badge_only(member: &MemberRecord) -> Result<ExtraInfo> {
        Ok(ExtraInfo {
            photo_url: None,
            badge_image_path: get_membership_badge_image(member.total_time_as_member)?,
            photo_art: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::HttpGetResult;
    use crate::error::MembershipError;
    use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const PHOTO_URL: &str = "https://yt3.googleusercontent.com/ytc/AGIKgqNYnWV_wrW9eSH1bz2akU2yUHBPXV9NE383_YAsvA=s176-c-k-c0x00ffffff-no-rj";

    struct FakePhotos {
        answer: Option<String>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ChannelPhotoPort for FakePhotos {
        fn fetch_channel_photo_url(&self, channel_id: &str) -> Result<Option<String>> {
            self.calls.lock().unwrap().push(channel_id.to_string());
            Ok(self.answer.clone())
        }
    }

    struct FakeHttp {
        status: u16,
        bytes: Vec<u8>,
        calls: Arc<AtomicUsize>,
        urls: Arc<Mutex<Vec<String>>>,
        timeouts: Arc<Mutex<Vec<Duration>>>,
    }

    impl HttpClientPort for FakeHttp {
        fn get(&self, url: &str, _query: &[(&str, &str)], timeout: Duration) -> Result<HttpGetResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            self.timeouts.lock().unwrap().push(timeout);
            Ok(HttpGetResult {
                status: self.status,
                bytes: self.bytes.clone(),
                content_type: "image/png".to_string(),
            })
        }
    }

    struct Harness {
        use_case: EnrichUseCase,
        lookups: Arc<Mutex<Vec<String>>>,
        fetches: Arc<AtomicUsize>,
        fetched_urls: Arc<Mutex<Vec<String>>>,
        timeouts: Arc<Mutex<Vec<Duration>>>,
    }

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(22, 10, Rgba([255, 255, 255, 255]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageOutputFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn harness(answer: Option<&str>, status: u16, bytes: Vec<u8>) -> Harness {
        let lookups = Arc::new(Mutex::new(Vec::new()));
        let fetches = Arc::new(AtomicUsize::new(0));
        let fetched_urls = Arc::new(Mutex::new(Vec::new()));
        let timeouts = Arc::new(Mutex::new(Vec::new()));
        let use_case = EnrichUseCase::new(
            Box::new(FakePhotos {
                answer: answer.map(str::to_string),
                calls: lookups.clone(),
            }),
            Box::new(FakeHttp {
                status,
                bytes,
                calls: fetches.clone(),
                urls: fetched_urls.clone(),
                timeouts: timeouts.clone(),
            }),
        )
        .with_art_options(ArtOptions {
            columns: 10,
            ..ArtOptions::monochrome()
        });
        Harness {
            use_case,
            lookups,
            fetches,
            fetched_urls,
            timeouts,
        }
    }

    fn member(profile_url: &str, months: f64) -> MemberRecord {
        MemberRecord {
            name: "Ana Maria Silva".to_string(),
            profile_url: profile_url.to_string(),
            membership_level: "Compilador".to_string(),
            total_time_in_level: 1.0,
            total_time_as_member: months,
            last_update: "Virou assinante".to_string(),
            last_update_timestamp: "2023-04-29T07:56:41.806-07:00".to_string(),
        }
    }

    #[test]
    fn test_get_user_photo_url() {
        let h = harness(Some(PHOTO_URL), 200, Vec::new());
        let photo_url = h
            .use_case
            .get_user_photo_url("https://youtube.com/channel/UCFuIUoyHB12qpYa8Jpxoxow")
            .unwrap();

        assert_eq!(photo_url.as_deref(), Some(PHOTO_URL));
        assert_eq!(*h.lookups.lock().unwrap(), vec!["UCFuIUoyHB12qpYa8Jpxoxow"]);
    }

    #[test]
    fn test_get_user_photo_url_with_none() {
        let h = harness(Some(PHOTO_URL), 200, Vec::new());
        let photo_url = h
            .use_case
            .get_user_photo_url("https://youtube.com/invalid_path/for/testing")
            .unwrap();

        assert!(photo_url.is_none());
        assert!(h.lookups.lock().unwrap().is_empty());
    }

    #[test]
    fn test_photo_url_to_ascii_art() {
        let h = harness(None, 200, png_bytes());
        let art = h.use_case.photo_url_to_ascii_art(Some(PHOTO_URL)).unwrap().unwrap();

        assert_eq!(h.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(*h.timeouts.lock().unwrap(), vec![Duration::from_secs(5)]);
        assert_eq!(art, "##########\n##########");
    }

    #[test]
    fn test_default_art_is_hundred_coloured_fill_chars_wide() {
        let use_case = EnrichUseCase::new(
            Box::new(FakePhotos {
                answer: None,
                calls: Arc::new(Mutex::new(Vec::new())),
            }),
            Box::new(FakeHttp {
                status: 200,
                bytes: png_bytes(),
                calls: Arc::new(AtomicUsize::new(0)),
                urls: Arc::new(Mutex::new(Vec::new())),
                timeouts: Arc::new(Mutex::new(Vec::new())),
            }),
        );

        let art = use_case.photo_url_to_ascii_art(Some(PHOTO_URL)).unwrap().unwrap();
        let lines: Vec<&str> = art.lines().collect();

        // 22x10 photo at 100 columns
        assert_eq!(lines.len(), 21);
        for line in lines {
            assert_eq!(line.matches('#').count(), 100);
            assert_eq!(line.matches("\x1b[38;2;").count(), 100);
            assert!(line.ends_with("\x1b[0m"));
        }
    }

    #[test]
    fn test_photo_url_to_ascii_art_without_url() {
        let h = harness(None, 200, png_bytes());
        assert!(h.use_case.photo_url_to_ascii_art(None).unwrap().is_none());
        assert_eq!(h.fetches.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_photo_url_to_ascii_art_undecodable_bytes() {
        let h = harness(None, 200, b"<html>not an image</html>".to_vec());
        let err = h.use_case.photo_url_to_ascii_art(Some(PHOTO_URL)).unwrap_err();
        assert!(matches!(err, MembershipError::Image(_)));
    }

    #[test]
    fn test_photo_url_to_ascii_art_http_error() {
        let h = harness(None, 404, Vec::new());
        let err = h.use_case.photo_url_to_ascii_art(Some(PHOTO_URL)).unwrap_err();
        assert!(matches!(err, MembershipError::HttpStatus { status: 404, .. }));
    }

    #[test]
    fn test_get_extra_info() {
        let h = harness(Some(PHOTO_URL), 200, png_bytes());
        let info = h
            .use_case
            .get_extra_info(&member("https://www.youtube.com/channel/UCw5sX8pDXdaBk8hOlRLyI0A/about", 13.0))
            .unwrap();

        assert_eq!(info.photo_url.as_deref(), Some(PHOTO_URL));
        assert!(info.photo_art.is_some());
        assert_eq!(
            *h.lookups.lock().unwrap(),
            vec!["UCw5sX8pDXdaBk8hOlRLyI0A"]
        );
        // the art comes from the resolved photo, not the profile page
        assert_eq!(*h.fetched_urls.lock().unwrap(), vec![PHOTO_URL]);
        assert_eq!(
            info.badge_image_path,
            Path::new("assets").join("badges").join("12_months.png")
        );
    }

    #[test]
    fn test_get_extra_info_without_photo_still_has_badge() {
        let h = harness(None, 200, png_bytes());
        let info = h
            .use_case
            .get_extra_info(&member("https://www.youtube.com/channel/UCw5sX8pDXdaBk8hOlRLyI0A", 0.5))
            .unwrap();

        assert!(info.photo_url.is_none());
        assert!(info.photo_art.is_none());
        assert_eq!(h.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(info.badge_image_path, Path::new("assets").join("badges").join("new.png"));
    }

    #[test]
    fn test_badge_only_skips_network() {
        let info = EnrichUseCase::badge_only(&member("https://youtube.com/channel/UCx", 48.0)).unwrap();
        assert!(info.photo_url.is_none());
        assert!(info.photo_art.is_none());
        assert!(info.badge_image_path.ends_with("48_months.png"));
    }
}
