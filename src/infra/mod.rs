pub mod csv_source;
pub mod http_client;
pub mod youtube_api;
