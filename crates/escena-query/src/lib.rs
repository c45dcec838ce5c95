//! Capa de lecturas cacheadas y mutaciones sobre el cliente remoto.
//!
//! - [`cache::QueryClient`]: caché por clave con peticiones compartidas.
//! - [`reads::SiteQueries`]: una lectura tipada por [`QueryKey`].
//! - [`mutations::Mutations`]: escrituras con invalidación y notificación.

pub mod cache;
pub mod config;
pub mod crud;
pub mod error;
pub mod keys;
pub mod mutations;
pub mod reads;

pub use cache::QueryClient;
pub use config::QueryConfig;
pub use crud::Crud;
pub use error::QueryError;
pub use keys::QueryKey;
pub use mutations::Mutations;
pub use reads::{QueryResult, SiteQueries};
