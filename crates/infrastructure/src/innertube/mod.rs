mod client;
mod parser;

pub use client::{extract_context, InnertubeClient};
pub use parser::InnertubeParser;

pub const VIDEO_BASE_URL: &str = "https://www.youtube.com";
pub const MUSIC_BASE_URL: &str = "https://music.youtube.com";
pub const SEARCH_URL: &str = "https://music.youtube.com/youtubei/v1/search?prettyPrint=false";
pub const PLAYER_URL: &str = "https://www.youtube.com/youtubei/v1/player";

/// Search filter restricting results to videos.
pub const VIDEO_FILTER_PARAM: &str = "EgWKAQIQAWoQEAMQBRAEEAkQChAVEBAQEQ%3D%3D";
/// Search filter restricting results to songs.
pub const SONG_FILTER_PARAM: &str = "EgWKAQIIAWoQEAMQBRAEEAkQChAVEBAQEQ%3D%3D";
