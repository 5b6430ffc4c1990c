use serde_json::Value;
use tracing::debug;
use tubegate_application::ports::TrackParser;
use tubegate_domain::track::parse_duration_text;
use tubegate_domain::{Channel, DomainError, Thumbnail, Track, TrackKind};

const VIDEO_RESULTS: &str = "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents/0/itemSectionRenderer/contents";
const MUSIC_RESULTS: &str = "/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicShelfRenderer/contents";
const FLEX_RUNS: &str = "/musicResponsiveListItemFlexColumnRenderer/text/runs";

const VIDEO_WATCH_URL: &str = "https://www.youtube.com/watch?v=";
const MUSIC_WATCH_URL: &str = "https://music.youtube.com/watch?v=";
const VIDEO_THUMBNAIL_HOST: &str = "i.ytimg.com/vi/";
const ARTIST_MENU_LABEL: &str = "go to artist";
const RUN_SEPARATOR: &str = "•";

/// Maps raw upstream search and player documents to [`Track`]s.
#[derive(Debug, Default, Clone, Copy)]
pub struct InnertubeParser;

impl InnertubeParser {
    pub fn new() -> Self {
        Self
    }
}

impl TrackParser for InnertubeParser {
    fn parse_search(&self, channel: Channel, body: &[u8]) -> Result<Vec<Track>, DomainError> {
        let document = decode(body)?;
        let path = match channel {
            Channel::Primary => VIDEO_RESULTS,
            Channel::Secondary => MUSIC_RESULTS,
        };

        let items = document
            .pointer(path)
            .ok_or_else(|| {
                DomainError::EnvelopeMalformed(format!("{} search results not found", channel))
            })?
            .as_array()
            .ok_or_else(|| {
                DomainError::EnvelopeMalformed(format!(
                    "{} search results are not an array",
                    channel
                ))
            })?;

        let parse_item = match channel {
            Channel::Primary => parse_video_item,
            Channel::Secondary => parse_music_item,
        };

        let tracks: Vec<Track> = items
            .iter()
            .filter_map(|item| match parse_item(item) {
                Ok(track) => Some(track),
                Err(e) => {
                    debug!(error = %e, "Skipping search result");
                    None
                }
            })
            .collect();

        debug!(
            channel = %channel,
            items = items.len(),
            tracks = tracks.len(),
            "Parsed search results"
        );
        Ok(tracks)
    }

    fn parse_player(&self, body: &[u8]) -> Result<Track, DomainError> {
        let document = decode(body)?;

        let status = text(&document, "/playabilityStatus/status");
        if status != "OK" {
            return Err(DomainError::EnvelopeMalformed(format!(
                "video is not playable, status: {}",
                status
            )));
        }

        let details = document.pointer("/videoDetails").ok_or_else(|| {
            DomainError::EnvelopeMalformed("player response has no videoDetails".to_string())
        })?;
        let video_id = text(details, "/videoId");
        if video_id.is_empty() {
            return Err(DomainError::EnvelopeMalformed(
                "player response has no video id".to_string(),
            ));
        }

        let seconds = text(details, "/lengthSeconds").parse::<u64>().unwrap_or(0);

        Ok(Track {
            title: text(details, "/title"),
            author: text(details, "/author"),
            uri: format!("{}{}", VIDEO_WATCH_URL, video_id),
            identifier: video_id,
            images: thumbnails(details.pointer("/thumbnail/thumbnails")),
            length: seconds * 1000,
            kind: TrackKind::Video,
            views: text(details, "/viewCount"),
            channel_id: text(details, "/channelId"),
            is_live: details
                .pointer("/isLive")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }
}

fn decode(body: &[u8]) -> Result<Value, DomainError> {
    serde_json::from_slice(body)
        .map_err(|e| DomainError::EnvelopeMalformed(format!("response is not JSON: {}", e)))
}

fn text(value: &Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn thumbnails(value: Option<&Value>) -> Vec<Thumbnail> {
    value
        .and_then(Value::as_array)
        .map(|thumbs| {
            thumbs
                .iter()
                .map(|t| Thumbnail {
                    url: text(t, "/url"),
                    width: dimension(t, "/width"),
                    height: dimension(t, "/height"),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn dimension(value: &Value, pointer: &str) -> u32 {
    value
        .pointer(pointer)
        .and_then(Value::as_u64)
        .map(|d| d.min(u64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

fn parse_video_item(item: &Value) -> Result<Track, DomainError> {
    let renderer = item
        .get("videoRenderer")
        .ok_or_else(|| DomainError::RecordParse("videoRenderer not found".to_string()))?;

    let duration = text(renderer, "/lengthText/simpleText");
    let length = parse_duration_text(&duration);
    if length == 0 {
        return Err(DomainError::RecordParse(format!(
            "failed to parse duration: {:?}",
            duration
        )));
    }

    let video_id = text(renderer, "/videoId");
    Ok(Track {
        title: text(renderer, "/title/runs/0/text"),
        author: text(renderer, "/ownerText/runs/0/text"),
        uri: format!("{}{}", VIDEO_WATCH_URL, video_id),
        identifier: video_id,
        images: thumbnails(renderer.pointer("/thumbnail/thumbnails")),
        length,
        kind: TrackKind::Video,
        views: text(renderer, "/viewCountText/simpleText"),
        channel_id: text(
            renderer,
            "/ownerText/runs/0/navigationEndpoint/browseEndpoint/browseId",
        ),
        is_live: false,
    })
}

fn parse_music_item(item: &Value) -> Result<Track, DomainError> {
    let renderer = item.get("musicResponsiveListItemRenderer").ok_or_else(|| {
        DomainError::RecordParse("musicResponsiveListItemRenderer not found".to_string())
    })?;

    let columns = renderer
        .get("flexColumns")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if columns.len() < 3 {
        return Err(DomainError::RecordParse(format!(
            "expected 3 flex columns, got {}",
            columns.len()
        )));
    }

    let detail_runs = columns[1]
        .pointer(FLEX_RUNS)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let author: String = detail_runs
        .iter()
        .map(|run| text(run, "/text"))
        .take_while(|t| t.trim() != RUN_SEPARATOR)
        .collect();

    let duration = detail_runs
        .last()
        .map(|run| text(run, "/text"))
        .unwrap_or_default();
    let length = parse_duration_text(&duration);
    if length == 0 {
        return Err(DomainError::RecordParse(format!(
            "failed to parse duration: {:?}",
            duration
        )));
    }

    let images = thumbnails(renderer.pointer("/thumbnail/musicThumbnailRenderer/thumbnail/thumbnails"));
    let kind = match images.first() {
        Some(thumb) if thumb.url.contains(VIDEO_THUMBNAIL_HOST) => TrackKind::Video,
        _ => TrackKind::Song,
    };

    let video_id = text(renderer, "/playlistItemData/videoId");
    Ok(Track {
        title: text(&columns[0], &format!("{}/0/text", FLEX_RUNS)),
        author,
        uri: format!("{}{}", MUSIC_WATCH_URL, video_id),
        identifier: video_id,
        images,
        length,
        kind,
        views: text(&columns[2], &format!("{}/0/text", FLEX_RUNS)),
        channel_id: artist_channel(renderer),
        is_live: false,
    })
}

/// Channel id behind the "Go to artist" menu entry, if any.
fn artist_channel(renderer: &Value) -> String {
    let Some(items) = renderer
        .pointer("/menu/menuRenderer/items")
        .and_then(Value::as_array)
    else {
        return String::new();
    };

    items
        .iter()
        .filter_map(|item| item.get("menuNavigationItemRenderer"))
        .find_map(|nav| {
            let labelled = nav
                .pointer("/text/runs")
                .and_then(Value::as_array)?
                .iter()
                .any(|run| text(run, "/text").trim().to_lowercase() == ARTIST_MENU_LABEL);
            let id = text(nav, "/navigationEndpoint/browseEndpoint/browseId");
            (labelled && !id.is_empty()).then_some(id)
        })
        .unwrap_or_default()
}
