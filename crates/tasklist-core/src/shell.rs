//! Line-oriented interactive session over a [`TaskListController`].

use std::io::{BufRead, Write};

use anyhow::anyhow;
use tasklist_shared::{TaskFilter, TaskId};
use tracing::{debug, info, warn};

use crate::api::TodoApi;
use crate::controller::TaskListController;
use crate::render::Renderer;

const HELP: &str = "\
commands:
  add [title]    create a task (without a title, submits the draft)
  draft <text>   set the draft title
  toggle <id>    flip completed/pending
  edit <id>      rename a task (empty input cancels)
  rm <id>        delete a task
  filter <f>     all | completed | pending
  theme          switch between light and dark
  refresh        refetch the list
  help           show this text
  quit           leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(String),
    Draft(String),
    Toggle(TaskId),
    Edit(TaskId),
    Delete(TaskId),
    Filter(TaskFilter),
    Theme,
    Refresh,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line; `Ok(None)` for blank lines.
    pub fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim_start();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line.trim_end(), ""));

        let parse_id = |rest: &str| -> anyhow::Result<TaskId> {
            rest.parse::<TaskId>()
                .map_err(|err| anyhow!("{word}: {err}"))
        };

        let command = match word {
            "" => return Ok(None),
            "add" | "a" => ShellCommand::Add(rest.trim_end_matches(['\r', '\n']).to_string()),
            "draft" => ShellCommand::Draft(rest.trim_end_matches(['\r', '\n']).to_string()),
            "toggle" | "t" | "done" => ShellCommand::Toggle(parse_id(rest)?),
            "edit" | "e" => ShellCommand::Edit(parse_id(rest)?),
            "rm" | "delete" => ShellCommand::Delete(parse_id(rest)?),
            "filter" | "f" => {
                ShellCommand::Filter(rest.parse::<TaskFilter>().map_err(|err| anyhow!(err))?)
            }
            "theme" => ShellCommand::Theme,
            "refresh" | "list" | "ls" => ShellCommand::Refresh,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => return Err(anyhow!("unknown command '{other}', try 'help'")),
        };

        Ok(Some(command))
    }
}

/// Runs the session until `quit` or end of input.
///
/// Command errors are reported on `output` and the session continues.
#[tracing::instrument(skip_all)]
pub async fn run_shell<A, R, W>(
    controller: &TaskListController<A>,
    renderer: &Renderer,
    mut input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    A: TodoApi,
    R: BufRead,
    W: Write,
{
    controller.load_tasks().await;
    renderer.write_task_list(&mut output, &controller.snapshot())?;

    loop {
        write!(output, "tasklist> ")?;
        output.flush()?;

        let Some(line) = read_line(&mut input)? else {
            info!("input closed, leaving shell");
            break;
        };

        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "error: {err}")?;
                continue;
            }
        };
        debug!(?command, "shell command");

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            ShellCommand::Add(title) if title.trim().is_empty() => {
                controller.submit_draft().await;
            }
            ShellCommand::Add(title) => {
                controller.set_draft(title.as_str());
                controller.add_task(&title).await;
            }
            ShellCommand::Draft(text) => controller.set_draft(text),
            ShellCommand::Toggle(id) => {
                if let Err(err) = controller.toggle_completed(&id).await {
                    writeln!(output, "error: {err}")?;
                    continue;
                }
            }
            ShellCommand::Delete(id) => controller.delete_task(&id).await,
            ShellCommand::Edit(id) => {
                if let Err(err) = edit_task(controller, &id, &mut input, &mut output).await {
                    writeln!(output, "error: {err}")?;
                    continue;
                }
            }
            ShellCommand::Filter(filter) => controller.set_filter(filter),
            ShellCommand::Theme => controller.toggle_theme(),
            ShellCommand::Refresh => controller.load_tasks().await,
        }

        renderer.write_task_list(&mut output, &controller.snapshot())?;
    }

    Ok(())
}

async fn edit_task<A, R, W>(
    controller: &TaskListController<A>,
    id: &TaskId,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<()>
where
    A: TodoApi,
    R: BufRead,
    W: Write,
{
    controller.begin_edit(id)?;
    let current = controller
        .snapshot()
        .editing
        .map(|edit| edit.title)
        .unwrap_or_default();

    write!(output, "new title [{current}]: ")?;
    output.flush()?;

    match read_line(input)? {
        Some(title) if !title.trim().is_empty() => {
            controller.set_edit_draft(title);
            controller.save_edit(id).await?;
        }
        _ => {
            warn!(id = %id, "edit cancelled");
            controller.cancel_edit();
        }
    }

    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
