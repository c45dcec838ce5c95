pub mod gallery;
pub mod home;
pub mod plans;
pub mod releases;
pub mod shows;
pub mod videos;

pub use gallery::{GalleryPage, GalleryTile, gallery_page};
pub use home::{HomeView, home_page};
pub use plans::{PlanCard, PlanSelectButton, PlansPage, PlansView};
pub use releases::{ReleaseCard, releases_page};
pub use shows::{ShowCard, shows_page};
pub use videos::{VideoCard, videos_page};
