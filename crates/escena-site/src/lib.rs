//! Páginas públicas del sitio como view models.
//!
//! Cada página se construye a partir de las lecturas de
//! [`escena_query::SiteQueries`] y devuelve datos planos que cualquier capa
//! de presentación puede pintar.

pub mod format;
pub mod pages;
pub mod platforms;
pub mod routes;
pub mod session;
pub mod view;

pub use platforms::{Platform, PlatformLink};
pub use routes::{NavLink, Route};
pub use session::Session;
pub use view::{Icon, PageView};

#[cfg(test)]
mod testing;
