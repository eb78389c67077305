use std::fmt;
use std::str::FromStr;

use serde::{
  Deserialize,
  Serialize
};

/// Server-assigned task identity.
///
/// The todo service hands out integer ids today, but the client treats
/// them as opaque: anything the server sends back is echoed verbatim in
/// request paths.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(untagged)]
pub enum TaskId {
  Number(i64),
  Text(String)
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | TaskId::Number(value) => {
        write!(f, "{value}")
      }
      | TaskId::Text(value) => {
        f.write_str(value)
      }
    }
  }
}

impl TaskId {
  /// Whether `other` names the same task
  /// once both are written out, so a
  /// typed `42` still finds a server id
  /// of `"42"`.
  pub fn same_text(
    &self,
    other: &TaskId
  ) -> bool {
    self == other
      || self.to_string()
        == other.to_string()
  }
}

impl From<i64> for TaskId {
  fn from(value: i64) -> Self {
    TaskId::Number(value)
  }
}

impl FromStr for TaskId {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
      return Err(
        "task id cannot be empty"
          .to_string()
      );
    }
    Ok(match trimmed.parse::<i64>() {
      | Ok(value) => {
        TaskId::Number(value)
      }
      | Err(_) => {
        TaskId::Text(
          trimmed.to_string()
        )
      }
    })
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub id:        TaskId,
  #[serde(default)]
  pub title:     String,
  #[serde(default)]
  pub completed: bool
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskCreate {
  pub title:     String,
  pub completed: bool
}

impl TaskCreate {
  pub fn new(
    title: impl Into<String>
  ) -> Self {
    Self {
      title:     title.into(),
      completed: false
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskUpdate {
  pub title:     String,
  pub completed: bool
}

impl TaskUpdate {
  /// Same title, inverted completion.
  pub fn toggled(
    task: &TaskDto
  ) -> Self {
    Self {
      title:     task.title.clone(),
      completed: !task.completed
    }
  }

  /// New title, completion as last seen locally.
  pub fn renamed(
    task: &TaskDto,
    title: impl Into<String>
  ) -> Self {
    Self {
      title:     title.into(),
      completed: task.completed
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
  #[default]
  All,
  Completed,
  Pending
}

impl TaskFilter {
  pub const ALL: [TaskFilter; 3] = [
    TaskFilter::All,
    TaskFilter::Completed,
    TaskFilter::Pending
  ];

  pub fn matches(
    self,
    task: &TaskDto
  ) -> bool {
    match self {
      | TaskFilter::All => true,
      | TaskFilter::Completed => {
        task.completed
      }
      | TaskFilter::Pending => {
        !task.completed
      }
    }
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | TaskFilter::All => "all",
      | TaskFilter::Completed => {
        "completed"
      }
      | TaskFilter::Pending => "pending"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | TaskFilter::All => "All",
      | TaskFilter::Completed => {
        "Completed"
      }
      | TaskFilter::Pending => "Pending"
    }
  }
}

impl fmt::Display for TaskFilter {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_key())
  }
}

impl FromStr for TaskFilter {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "all" => Ok(TaskFilter::All),
      | "completed" | "done" => {
        Ok(TaskFilter::Completed)
      }
      | "pending" => {
        Ok(TaskFilter::Pending)
      }
      | other => Err(format!(
        "unknown filter '{other}', \
         expected all, completed or \
         pending"
      ))
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct ThemePalette {
  pub background: &'static str,
  pub text:       &'static str
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  pub fn from_dark_mode(
    dark_mode: bool
  ) -> Self {
    if dark_mode {
      Theme::Dark
    } else {
      Theme::Light
    }
  }

  pub fn palette(self) -> ThemePalette {
    match self {
      | Theme::Light => ThemePalette {
        background: "#fff",
        text:       "#000"
      },
      | Theme::Dark => ThemePalette {
        background: "#333",
        text:       "#fff"
      }
    }
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Theme::Light => "light",
      | Theme::Dark => "dark"
    }
  }

  /// Label for the button that switches away from this theme.
  pub fn toggle_label(
    self
  ) -> &'static str {
    match self {
      | Theme::Light => {
        "🌙 Dark Mode"
      }
      | Theme::Dark => {
        "☀️ Light Mode"
      }
    }
  }
}

impl FromStr for Theme {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "light" => Ok(Theme::Light),
      | "dark" => Ok(Theme::Dark),
      | other => Err(format!(
        "unknown theme '{other}', \
         expected light or dark"
      ))
    }
  }
}
