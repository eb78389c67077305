use std::io::{self, IsTerminal, Write};

use tasklist_shared::{TaskDto, Theme};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::controller::TaskListState;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = cfg.get_bool("color")?.unwrap_or(true) && io::stdout().is_terminal();
        Ok(Self { color })
    }

    /// Renderer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip_all, fields(total = state.tasks.len(), filter = %state.filter))]
    pub fn write_task_list<W: Write>(&self, mut out: W, state: &TaskListState) -> anyhow::Result<()> {
        let theme = state.theme();
        let visible = state.visible_tasks();

        writeln!(
            out,
            "{}  filter: {}  theme: {}",
            self.paint("List of Task", header_code(theme)),
            state.filter,
            theme.as_key()
        )?;
        if !state.draft_title.is_empty() {
            writeln!(out, "draft: {}", state.draft_title)?;
        }

        if visible.is_empty() {
            writeln!(out, "(no tasks)")?;
            return Ok(());
        }

        let headers = vec!["ID".to_string(), "Done".to_string(), "Title".to_string()];
        let rows = visible
            .iter()
            .map(|task| self.task_row(task, state, theme))
            .collect();

        write_table(&mut out, headers, rows)?;
        Ok(())
    }

    pub fn write_task<W: Write>(&self, mut out: W, task: &TaskDto) -> anyhow::Result<()> {
        writeln!(out, "id         {}", task.id)?;
        writeln!(out, "title      {}", task.title)?;
        writeln!(out, "completed  {}", task.completed)?;
        Ok(())
    }

    fn task_row(&self, task: &TaskDto, state: &TaskListState, theme: Theme) -> Vec<String> {
        let id = self.paint(&task.id.to_string(), id_code(theme));
        let done = if task.completed { "[x]" } else { "[ ]" }.to_string();

        let title = match state.editing.as_ref() {
            Some(edit) if edit.id == task.id => format!("{} (editing: {})", task.title, edit.title),
            _ if task.completed => self.paint(&task.title, "9"),
            _ => task.title.clone(),
        };

        vec![id, done, title]
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn header_code(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "1;30",
        Theme::Dark => "1;97",
    }
}

fn id_code(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "33",
        Theme::Dark => "93",
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_str().width()).collect();

    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(strip_ansi(cell).as_str().width());
        }
    }

    for (header, width) in headers.iter().zip(&widths) {
        write!(writer, "{header:width$} ", width = *width)?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = *width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (cell, width) in row.iter().zip(&widths) {
            let padding = width.saturating_sub(strip_ansi(cell).as_str().width());
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
