mod ids;
mod track;

pub use ids::TrackId;
pub use track::{public_path, stored_name_of, NewTrack, Track, PUBLIC_PREFIX};
