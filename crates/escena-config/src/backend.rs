use crate::paths::{ConfigError, EscenaPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;

  /// Sección ausente (o fichero ausente) → `T::default()`.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;
}

pub struct TomlConfigBackend {
  paths: EscenaPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: EscenaPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &EscenaPaths {
    &self.paths
  }

  fn read_table(&self, section: &str) -> Result<Option<toml::Value>, ConfigError> {
    let path = self.paths.config_file();
    let content = match fs::read_to_string(&path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };

    let toml_val: toml::Value = toml::from_str(&content)?;
    Ok(toml_val.get(section).cloned())
  }
}

fn decode<T: DeserializeOwned>(section: &str, table: toml::Value) -> Result<T, ConfigError> {
  table.try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let table = self.read_table(section)?.ok_or_else(|| {
      ConfigError::Other(format!("missing section [{section}] in {:?}", self.paths.config_file()))
    })?;
    decode(section, table)
  }

  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    match self.read_table(section)? {
      Some(table) => decode(section, table),
      None => Ok(T::default()),
    }
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    // Documento actual (o vacío) para no perder comentarios del usuario.
    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    escena_fs::atomic_write_str(&path, &doc.to_string())?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Serialize, Deserialize, PartialEq)]
  struct Demo {
    stale_time_secs: u64,
    #[serde(default)]
    exts: Vec<String>,
  }

  impl Default for Demo {
    fn default() -> Self {
      Self { stale_time_secs: 300, exts: vec!["png".into()] }
    }
  }

  fn backend(dir: &std::path::Path) -> TomlConfigBackend {
    TomlConfigBackend::new(EscenaPaths::under(dir.to_path_buf()))
  }

  #[test]
  fn missing_file_yields_default() {
    let tmp = tempdir().unwrap();
    let demo: Demo = backend(tmp.path()).load_section_with_default("query").unwrap();
    assert_eq!(demo, Demo::default());
  }

  #[test]
  fn missing_section_is_an_error_without_default() {
    let tmp = tempdir().unwrap();
    let b = backend(tmp.path());
    b.save_section("other", &Demo::default()).unwrap();

    let res: Result<Demo, _> = b.load_section("query");
    assert!(matches!(res, Err(ConfigError::Other(_))));
  }

  #[test]
  fn save_then_load_keeps_other_sections_and_comments() {
    let tmp = tempdir().unwrap();
    let b = backend(tmp.path());
    let file = b.paths().config_file();
    escena_fs::atomic_write_str(&file, "# mi config\n[logging]\nfilter = \"debug\"\n").unwrap();

    let demo = Demo { stale_time_secs: 60, exts: vec![] };
    b.save_section("query", &demo).unwrap();

    let loaded: Demo = b.load_section("query").unwrap();
    assert_eq!(loaded, demo);

    let raw = fs::read_to_string(&file).unwrap();
    assert!(raw.contains("# mi config"));
    assert!(raw.contains("filter = \"debug\""));
  }
}
