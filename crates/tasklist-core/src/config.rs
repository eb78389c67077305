use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tasklist_shared::Theme;
use tracing::{
  debug,
  info,
  trace,
  warn
};

use crate::api::DEFAULT_API_URL;

pub const API_URL_ENV: &str =
  "TASKLIST_API_URL";
pub const RC_ENV: &str = "TASKLIST_RC";

#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_file: Option<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    map.insert(
      "api.url".to_string(),
      DEFAULT_API_URL.to_string()
    );
    map.insert(
      "color".to_string(),
      "on".to_string()
    );
    map.insert(
      "theme".to_string(),
      Theme::Light.as_key().to_string()
    );
    Self {
      map,
      loaded_file: None
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    match resolve_rc_path(rc_override)? {
      | Some(path) => {
        info!(rc = %path.display(), "loading tasklistrc");
        cfg.load_file(&path)?;
      }
      | None => {
        debug!(
          "no tasklistrc found; using \
           defaults"
        );
      }
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> anyhow::Result<Option<bool>> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(key, v))
      .transpose()
  }

  /// Initial theme for a session. The
  /// toggle itself is never written back.
  pub fn theme(
    &self
  ) -> anyhow::Result<Theme> {
    match self.map.get("theme") {
      | Some(value) => value
        .parse::<Theme>()
        .map_err(|err| anyhow!(err)),
      | None => Ok(Theme::default())
    }
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let line = raw_line
        .split_once('#')
        .map_or(raw_line, |(before, _)| {
          before
        })
        .trim();
      if line.is_empty() {
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    self.loaded_file = Some(path);
    Ok(())
  }
}

/// Picks the single API base URL for
/// this process: flag, then environment,
/// then rc file, then the localhost
/// default.
pub fn resolve_api_url(
  cfg: &Config,
  flag: Option<&str>,
  env_value: Option<String>
) -> String {
  if let Some(url) = flag {
    debug!(
      source = "flag",
      "using api url"
    );
    return url.to_string();
  }

  if let Some(url) = env_value
    && !url.trim().is_empty()
  {
    debug!(
      source = API_URL_ENV,
      "using api url"
    );
    return url;
  }

  cfg.get("api.url").unwrap_or_else(
    || DEFAULT_API_URL.to_string()
  )
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var(RC_ENV)
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let candidates = [
    dirs::config_dir().map(|dir| {
      dir.join("tasklist").join(
        "tasklistrc"
      )
    }),
    dirs::home_dir().map(|home| {
      home.join(".tasklistrc")
    })
  ];

  for candidate in
    candidates.into_iter().flatten()
  {
    if candidate.exists() {
      return Ok(Some(candidate));
    }
  }

  if dirs::home_dir().is_none() {
    warn!(
      "cannot determine home \
       directory; skipping rc lookup"
    );
  }

  Ok(None)
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(
  key: &str,
  s: &str
) -> anyhow::Result<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Ok(true),
    | "0" | "n" | "no" | "off"
    | "false" => Ok(false),
    | other => Err(anyhow!(
      "invalid boolean for {key}: \
       {other}"
    ))
  }
}
