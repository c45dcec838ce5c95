use serde::Serialize;

use crate::view::Icon;

/// Plataformas reconocidas en enlaces de streaming y redes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Platform {
  Spotify,
  AppleMusic,
  YouTube,
  SoundCloud,
  Tidal,
  Deezer,
  AmazonMusic,
  Instagram,
  X,
  Facebook,
  LinkedIn,
  TikTok,
}

impl Platform {
  /// Detección por subcadena, sin distinguir mayúsculas. El orden importa:
  /// gana la primera coincidencia.
  pub fn detect(url: &str) -> Option<Self> {
    let lower = url.to_lowercase();
    let has = |s: &str| lower.contains(s);

    let platform = if has("spotify") {
      Platform::Spotify
    } else if has("apple") && has("music") {
      Platform::AppleMusic
    } else if has("youtube") {
      Platform::YouTube
    } else if has("soundcloud") {
      Platform::SoundCloud
    } else if has("tidal") {
      Platform::Tidal
    } else if has("deezer") {
      Platform::Deezer
    } else if has("amazon") && has("music") {
      Platform::AmazonMusic
    } else if has("instagram") {
      Platform::Instagram
    } else if has("twitter") || has("x.com") {
      Platform::X
    } else if has("facebook") {
      Platform::Facebook
    } else if has("linkedin") {
      Platform::LinkedIn
    } else if has("tiktok") {
      Platform::TikTok
    } else {
      return None;
    };
    Some(platform)
  }

  pub fn label(self) -> &'static str {
    match self {
      Platform::Spotify => "Spotify",
      Platform::AppleMusic => "Apple Music",
      Platform::YouTube => "YouTube",
      Platform::SoundCloud => "SoundCloud",
      Platform::Tidal => "Tidal",
      Platform::Deezer => "Deezer",
      Platform::AmazonMusic => "Amazon Music",
      Platform::Instagram => "Instagram",
      Platform::X => "X",
      Platform::Facebook => "Facebook",
      Platform::LinkedIn => "LinkedIn",
      Platform::TikTok => "TikTok",
    }
  }

  pub fn icon(self) -> Icon {
    match self {
      Platform::Spotify => Icon::Spotify,
      Platform::AppleMusic => Icon::AppleMusic,
      Platform::YouTube => Icon::YouTube,
      Platform::SoundCloud => Icon::SoundCloud,
      Platform::Tidal => Icon::Tidal,
      Platform::Deezer => Icon::ExternalLink,
      Platform::AmazonMusic => Icon::AmazonMusic,
      Platform::Instagram => Icon::Instagram,
      Platform::X => Icon::X,
      Platform::Facebook => Icon::Facebook,
      Platform::LinkedIn => Icon::LinkedIn,
      Platform::TikTok => Icon::TikTok,
    }
  }
}

/// Enlace externo ya etiquetado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformLink {
  pub url: String,
  pub label: String,
  pub icon: Icon,
}

impl PlatformLink {
  /// `fallback` es la etiqueta si no se reconoce la plataforma
  /// (`"Link"` para redes, `"Listen"` para streaming).
  pub fn new(url: &str, fallback: &str) -> Self {
    match Platform::detect(url) {
      Some(p) => Self { url: url.to_string(), label: p.label().to_string(), icon: p.icon() },
      None => Self { url: url.to_string(), label: fallback.to_string(), icon: Icon::ExternalLink },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn detects_common_platforms() {
    let cases = [
      ("https://open.spotify.com/album/1", Platform::Spotify),
      ("https://music.apple.com/us/album/1", Platform::AppleMusic),
      ("https://www.YouTube.com/watch?v=1", Platform::YouTube),
      ("https://music.amazon.com/albums/1", Platform::AmazonMusic),
      ("https://twitter.com/artist", Platform::X),
      ("https://x.com/artist", Platform::X),
      ("https://www.tiktok.com/@artist", Platform::TikTok),
    ];
    for (url, expected) in cases {
      assert_eq!(Platform::detect(url), Some(expected), "{url}");
    }
  }

  #[test]
  fn youtube_music_is_youtube_not_apple() {
    assert_eq!(Platform::detect("https://music.youtube.com/x"), Some(Platform::YouTube));
  }

  #[test]
  fn unknown_url_uses_fallback() {
    let link = PlatformLink::new("https://bandcamp.com/x", "Listen");
    assert_eq!(link.label, "Listen");
    assert_eq!(link.icon, Icon::ExternalLink);
  }

  #[test]
  fn deezer_has_generic_icon() {
    let link = PlatformLink::new("https://www.deezer.com/album/1", "Link");
    assert_eq!(link.label, "Deezer");
    assert_eq!(link.icon, Icon::ExternalLink);
  }
}
