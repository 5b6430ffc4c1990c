mod search_tracks;

pub use search_tracks::SearchTracksUseCase;
