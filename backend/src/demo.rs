//! Contenido de ejemplo para arrancar la app sin servicio remoto.

use escena_core::CoreError;
use escena_core::domain::{
  ArtistProfile, BlobRef, Event, EventId, GalleryItem, GalleryItemId, PlanId, Release, ReleaseId, Timestamp, Track,
  TrackId, UserPlan, Video, VideoId,
};
use escena_core::ports::SiteBackend;
use escena_memory::MemoryBackend;
use tracing::info;

fn date(input: &str) -> Result<Timestamp, CoreError> {
  Timestamp::parse_date_input(input).ok_or_else(|| CoreError::Backend(format!("bad demo date {input}")))
}

fn release(title: &str, on: &str, links: &[&str]) -> Result<Release, CoreError> {
  let id = ReleaseId::generate();
  Ok(Release {
    cover_image: BlobRef::from_url(format!("memory://blobs/demo-{id}")),
    id,
    title: title.into(),
    date: date(on)?,
    streaming_links: links.iter().map(|l| l.to_string()).collect(),
  })
}

fn show(on: &str, venue: &str, city: &str, tickets: &str) -> Result<Event, CoreError> {
  Ok(Event { id: EventId::generate(), venue: venue.into(), city: city.into(), date: date(on)?, ticket_link: tickets.into() })
}

/// Rellena `backend` como admin. Falla si el backend no acepta escrituras.
pub async fn seed(backend: &MemoryBackend) -> Result<(), CoreError> {
  backend
    .update_profile(ArtistProfile {
      name: "Nadia Vela".into(),
      bio: "Songwriter and producer from Austin.".into(),
      socials: vec!["https://instagram.com/nadiavela".into(), "https://open.spotify.com/artist/nadiavela".into()],
    })
    .await?;

  let night = release("Night Drive", "2025-12-01", &["https://open.spotify.com/album/nightdrive", "https://tidal.com/album/1"])?;
  let first = release("First Light", "2024-04-19", &["https://music.apple.com/album/firstlight"])?;
  for (release, titles) in [(&night, ["Intro", "Night Drive"]), (&first, ["Dawn", "First Light"])] {
    backend.add_release(release.clone()).await?;
    for title in titles {
      backend.add_track(Track { id: TrackId::generate(), title: title.into(), release_id: release.id.clone() }).await?;
    }
  }

  backend
    .add_video(Video {
      id: VideoId::generate(),
      title: "Night Drive (Official Video)".into(),
      platform_link: "https://youtube.com/watch?v=nightdrive".into(),
    })
    .await?;

  for event in [
    show("2026-02-14", "Mohawk", "Austin", "https://tickets.example.com/mohawk")?,
    show("2025-12-01", "The Loft", "Austin", "")?,
  ] {
    backend.add_event(event).await?;
  }

  backend
    .add_gallery_item(GalleryItem {
      id: GalleryItemId::generate(),
      caption: "Backstage at Mohawk".into(),
      image: BlobRef::from_url("memory://blobs/demo-backstage"),
    })
    .await?;

  for (name, description, price) in [("Fan", "Early access to new releases", 5), ("Insider", "Demos and livestreams", 12)] {
    backend
      .create_user_plan(UserPlan { id: PlanId::generate(), name: name.into(), description: description.into(), price })
      .await?;
  }

  info!("demo content loaded");
  Ok(())
}
