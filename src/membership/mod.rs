//! Pure membership logic: URL parsing, badge bucketing, column normalization and photo art.

pub mod art;
pub mod badge;
pub mod channel;
pub mod normalize;

pub use art::{render_ascii_art, ArtOptions};
pub use badge::{get_membership_badge_image, BadgeTier};
pub use channel::extract_channel_id;
pub use normalize::{members_from_table, rename_csv_columns};
