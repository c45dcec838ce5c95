pub mod artist;
pub mod blob;
pub mod entity;
pub mod event;
pub mod gallery;
pub mod ids;
pub mod plan;
pub mod release;
pub mod time;
pub mod user;
pub mod video;

pub use artist::ArtistProfile;
pub use blob::BlobRef;
pub use entity::Entity;
pub use event::Event;
pub use gallery::GalleryItem;
pub use ids::{EventId, GalleryItemId, PlanId, ReleaseId, TrackId, VideoId};
pub use plan::UserPlan;
pub use release::{Release, ReleaseWithTracks, Track, group_tracks_by_release};
pub use time::Timestamp;
pub use user::{Identity, UserProfile, UserRole};
pub use video::Video;
