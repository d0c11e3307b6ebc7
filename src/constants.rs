/// Column labels of the membership export mapped to canonical field names.
/// Order matches the export's header order.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("Membros", NAME),
    ("Link do perfil", PROFILE_URL),
    ("Nível atual", MEMBERSHIP_LEVEL),
    ("Tempo total no nível (meses)", TOTAL_TIME_IN_LEVEL),
    ("Tempo total como assinante (meses)", TOTAL_TIME_AS_MEMBER),
    ("Última atualização", LAST_UPDATE),
    ("Carimbo de data/hora da última atualização", LAST_UPDATE_TIMESTAMP),
];

// Canonical field names
pub const NAME: &str = "name";
pub const PROFILE_URL: &str = "profile_url";
pub const MEMBERSHIP_LEVEL: &str = "membership_level";
pub const TOTAL_TIME_IN_LEVEL: &str = "total_time_in_level";
pub const TOTAL_TIME_AS_MEMBER: &str = "total_time_as_member";
pub const LAST_UPDATE: &str = "last_update";
pub const LAST_UPDATE_TIMESTAMP: &str = "last_update_timestamp";

/// Marker preceding the channel identifier in a profile URL
pub const CHANNEL_SEGMENT: &str = "channel/";

pub const BADGES_DIR: [&str; 2] = ["assets", "badges"];

pub const DEFAULT_CHANNELS_API_URL: &str = "https://www.googleapis.com/youtube/v3/channels";
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

// Photo art
pub const PHOTO_FETCH_TIMEOUT_SECS: u64 = 5;
pub const ART_COLUMNS: u32 = 100;
pub const ART_FILL_CHAR: char = '#';
/// Terminal cells are roughly this many times taller than they are wide
pub const CHAR_ASPECT_RATIO: f64 = 2.2;
