//! Pestañas de contenido del panel: listado, diálogo de alta/edición y
//! confirmación de borrado para cada colección.

use escena_core::CoreError;
use escena_core::domain::{ReleaseId, ReleaseWithTracks, Track, event, group_tracks_by_release};
use escena_query::{Mutations, SiteQueries};
use escena_site::view::list_view;
use escena_site::{Icon, PageView};

use crate::forms::{
  DeleteConfirmation, Draft, EntityForm, FormError, GalleryDraft, PlanDraft, ReleaseDraft, ShowDraft, TrackDraft,
  VideoDraft,
};
use crate::upload::BlobUploader;

const SKELETONS: usize = 3;

/// Colección con pestaña propia en el panel.
pub trait Section: Draft {
  const EMPTY: (Icon, &'static str);

  /// Orden de presentación. Por defecto el de inserción.
  fn arrange(_items: &mut [Self::Record]) {}
}

impl Section for ReleaseDraft {
  const EMPTY: (Icon, &'static str) = (Icon::Music, "No releases yet");
}

impl Section for VideoDraft {
  const EMPTY: (Icon, &'static str) = (Icon::Video, "No videos yet");
}

impl Section for ShowDraft {
  const EMPTY: (Icon, &'static str) = (Icon::Calendar, "No shows yet");

  fn arrange(items: &mut [Self::Record]) {
    event::sort_by_date(items);
  }
}

impl Section for GalleryDraft {
  const EMPTY: (Icon, &'static str) = (Icon::Image, "No gallery items yet");
}

impl Section for PlanDraft {
  const EMPTY: (Icon, &'static str) = (Icon::Check, "No plans created yet. Click \"Add Plan\" to create your first plan.");
}

pub struct Manager<D: Section> {
  queries: SiteQueries,
  mutations: Mutations,
  uploader: BlobUploader,
  form: EntityForm<D>,
  deletion: DeleteConfirmation<D::Record>,
}

impl<D: Section> Manager<D> {
  pub fn new(queries: SiteQueries, mutations: Mutations, uploader: BlobUploader) -> Self {
    Self { queries, mutations, uploader, form: EntityForm::new(), deletion: DeleteConfirmation::new() }
  }

  pub async fn view(&self) -> PageView<Vec<D::Record>> {
    let result = self.queries.collection::<D::Record>().await;
    list_view(result, SKELETONS, D::EMPTY, |mut items| {
      D::arrange(&mut items);
      items
    })
  }

  pub fn form(&self) -> &EntityForm<D> {
    &self.form
  }

  pub fn deletion(&self) -> &DeleteConfirmation<D::Record> {
    &self.deletion
  }

  pub async fn submit(&self) -> Result<(), FormError> {
    self.form.submit(&self.uploader, &self.mutations).await
  }

  pub async fn confirm_delete(&self) -> Result<bool, CoreError> {
    self.deletion.confirm(&self.mutations).await
  }
}

/// Releases con sus pistas agrupadas y el diálogo de pistas.
pub struct ReleasesManager {
  releases: Manager<ReleaseDraft>,
  track_form: EntityForm<TrackDraft>,
  track_deletion: DeleteConfirmation<Track>,
}

impl ReleasesManager {
  pub fn new(queries: SiteQueries, mutations: Mutations, uploader: BlobUploader) -> Self {
    Self {
      releases: Manager::new(queries, mutations, uploader),
      track_form: EntityForm::new(),
      track_deletion: DeleteConfirmation::new(),
    }
  }

  pub async fn view(&self) -> PageView<Vec<ReleaseWithTracks>> {
    let queries = &self.releases.queries;
    let (releases, tracks) = tokio::join!(queries.releases(), queries.tracks());
    if tracks.is_loading {
      return PageView::Loading { skeletons: SKELETONS };
    }
    let tracks = tracks.data.unwrap_or_default();
    list_view(releases, SKELETONS, ReleaseDraft::EMPTY, |releases| group_tracks_by_release(&releases, &tracks))
  }

  pub fn releases(&self) -> &Manager<ReleaseDraft> {
    &self.releases
  }

  pub fn track_form(&self) -> &EntityForm<TrackDraft> {
    &self.track_form
  }

  pub fn track_deletion(&self) -> &DeleteConfirmation<Track> {
    &self.track_deletion
  }

  pub fn open_add_track(&self, release_id: ReleaseId) {
    self.track_form.open_with(TrackDraft::for_release(release_id));
  }

  pub async fn submit_track(&self) -> Result<(), FormError> {
    self.track_form.submit(&self.releases.uploader, &self.releases.mutations).await
  }

  pub async fn confirm_track_delete(&self) -> Result<bool, CoreError> {
    self.track_deletion.confirm(&self.releases.mutations).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{Panel, panel, write_image};
  use escena_core::domain::{BlobRef, Event, EventId, Release, Timestamp, Video, VideoId};
  use escena_core::ports::SiteBackend;
  use tempfile::tempdir;

  fn videos(p: &Panel) -> Manager<VideoDraft> {
    Manager::new(p.queries.clone(), p.mutations.clone(), p.uploader.clone())
  }

  fn shows(p: &Panel) -> Manager<ShowDraft> {
    Manager::new(p.queries.clone(), p.mutations.clone(), p.uploader.clone())
  }

  async fn seed_show(p: &Panel, date: &str, venue: &str) {
    let event = Event {
      id: EventId::generate(),
      venue: venue.into(),
      city: "Austin".into(),
      date: Timestamp::parse_date_input(date).unwrap(),
      ticket_link: String::new(),
    };
    p.backend.add_event(event).await.unwrap();
  }

  #[tokio::test]
  async fn creating_through_the_form_adds_exactly_one_record() {
    let p = panel();
    let videos = videos(&p);
    assert_eq!(videos.view().await, PageView::Empty { icon: Icon::Video, message: "No videos yet" });

    videos.form().open_create();
    videos.form().edit(|d| {
      d.title = "  Live at KEXP ".into();
      d.platform_link = "https://youtube.com/watch?v=1".into();
    });
    videos.submit().await.unwrap();

    let PageView::Ready(list) = videos.view().await else { panic!("expected videos") };
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Live at KEXP");
    assert_eq!(p.notifier.successes(), vec!["Video added successfully".to_string()]);
    assert_eq!(videos.form().phase(), crate::forms::FormPhase::Closed);
  }

  #[tokio::test]
  async fn failed_mutation_keeps_list_and_draft() {
    let p = panel();
    let videos = videos(&p);
    let existing = Video { id: VideoId::generate(), title: "Old".into(), platform_link: "https://vimeo.com/1".into() };
    p.backend.add_video(existing.clone()).await.unwrap();
    let before = videos.view().await;

    p.backend.fail_next("add_video", "quota exceeded");
    videos.form().open_create();
    videos.form().edit(|d| {
      d.title = "New".into();
      d.platform_link = "https://vimeo.com/2".into();
    });
    let err = videos.submit().await.unwrap_err();

    assert!(matches!(err, FormError::Mutation(_)));
    assert_eq!(videos.form().phase(), crate::forms::FormPhase::Editing);
    assert_eq!(videos.form().draft().title, "New");
    assert_eq!(videos.form().error(), Some("quota exceeded".to_string()));
    assert_eq!(videos.view().await, before);
    assert_eq!(p.notifier.errors(), vec!["quota exceeded".to_string()]);
  }

  #[tokio::test]
  async fn shows_are_listed_by_date() {
    let p = panel();
    seed_show(&p, "2026-03-10", "Later").await;
    seed_show(&p, "2025-11-02", "Earlier").await;

    let shows = shows(&p);
    shows.form().open_create();
    shows.form().edit(|d| {
      d.date = "2025-12-01".into();
      d.venue = "The Loft".into();
      d.city = "Austin".into();
    });
    shows.submit().await.unwrap();

    let PageView::Ready(list) = shows.view().await else { panic!("expected shows") };
    let venues: Vec<_> = list.iter().map(|e| e.venue.as_str()).collect();
    assert_eq!(venues, ["Earlier", "The Loft", "Later"]);
    assert!(!list[1].has_tickets());
  }

  #[tokio::test]
  async fn delete_removes_only_that_record() {
    let p = panel();
    seed_show(&p, "2025-11-02", "Keep").await;
    seed_show(&p, "2025-11-03", "Drop").await;
    let shows = shows(&p);
    let PageView::Ready(list) = shows.view().await else { panic!("expected shows") };

    shows.deletion().request(list[1].id.clone());
    assert_eq!(shows.deletion().prompt(), Some("Are you sure you want to delete this event?".to_string()));
    assert!(shows.confirm_delete().await.unwrap());

    let PageView::Ready(list) = shows.view().await else { panic!("expected shows") };
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].venue, "Keep");
    assert_eq!(shows.deletion().pending(), None);
  }

  #[tokio::test]
  async fn failed_delete_keeps_dialog_open() {
    let p = panel();
    seed_show(&p, "2025-11-02", "Stay").await;
    let shows = shows(&p);
    let PageView::Ready(list) = shows.view().await else { panic!("expected shows") };
    let id = list[0].id.clone();

    p.backend.fail_next("delete_event", "");
    shows.deletion().request(id.clone());
    assert!(shows.confirm_delete().await.is_err());

    assert_eq!(shows.deletion().pending(), Some(id));
    assert_eq!(p.notifier.errors(), vec!["Failed to delete event".to_string()]);
  }

  #[tokio::test]
  async fn release_cover_is_uploaded_then_reused_on_edit() {
    let tmp = tempdir().unwrap();
    let cover = write_image(tmp.path(), "cover.png", 5000);
    let p = panel();
    let manager = ReleasesManager::new(p.queries.clone(), p.mutations.clone(), p.uploader.clone());
    let form = manager.releases().form();

    form.open_create();
    form.edit(|d| {
      d.title = "Night Drive".into();
      d.date = "2025-12-01".into();
      d.links.set(0, "https://open.spotify.com/album/1");
      d.links.append();
      d.cover = Some(cover);
    });
    manager.releases().submit().await.unwrap();

    let release = p.backend.get_all_releases().await.unwrap().remove(0);
    assert_eq!(release.streaming_links, vec!["https://open.spotify.com/album/1".to_string()]);
    assert_eq!(p.blobs.stored_count(), 1);

    form.open_edit(&release);
    assert_eq!(form.title(), "Edit Release");
    form.edit(|d| d.title = "Night Drive (Deluxe)".into());
    manager.releases().submit().await.unwrap();

    let edited = p.backend.get_all_releases().await.unwrap().remove(0);
    assert_eq!(edited.id, release.id);
    assert_eq!(edited.title, "Night Drive (Deluxe)");
    assert_eq!(edited.cover_image, release.cover_image);
    assert_eq!(p.blobs.stored_count(), 1);
  }

  #[tokio::test]
  async fn tracks_are_grouped_under_their_release() {
    let p = panel();
    let release = Release {
      id: ReleaseId::generate(),
      title: "EP".into(),
      date: Timestamp::from_nanos(0),
      streaming_links: vec![],
      cover_image: BlobRef::from_url("memory://blobs/ep"),
    };
    p.backend.add_release(release.clone()).await.unwrap();
    let manager = ReleasesManager::new(p.queries.clone(), p.mutations.clone(), p.uploader.clone());

    manager.open_add_track(release.id.clone());
    manager.track_form().edit(|d| d.title = "Intro".into());
    manager.submit_track().await.unwrap();

    let PageView::Ready(grouped) = manager.view().await else { panic!("expected releases") };
    assert_eq!(grouped.len(), 1);
    assert_eq!(grouped[0].tracks.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), ["Intro"]);
  }

  #[tokio::test]
  async fn plans_tab_has_its_own_empty_message() {
    let p = panel();
    let plans: Manager<PlanDraft> = Manager::new(p.queries.clone(), p.mutations.clone(), p.uploader.clone());

    let PageView::Empty { message, .. } = plans.view().await else { panic!("expected empty") };
    assert!(message.starts_with("No plans created yet"));
  }
}
