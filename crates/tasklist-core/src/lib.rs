pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod config;
pub mod controller;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "cli")]
pub mod render;
#[cfg(feature = "cli")]
pub mod shell;

pub use api::{
  ApiError,
  ApiResult,
  TodoApi
};
pub use controller::{
  ControllerError,
  EditDraft,
  TaskListController,
  TaskListState
};
#[cfg(feature = "cli")]
pub use run::run;

#[cfg(feature = "cli")]
mod run {
  use std::ffi::OsString;
  use std::io;

  use anyhow::Context;
  use clap::Parser;
  use tasklist_shared::Theme;
  use tracing::{
    debug,
    info
  };

  use crate::cli::{
    self,
    Command
  };
  use crate::config::{
    self,
    Config
  };
  use crate::controller::{
    TaskListController,
    TaskListState
  };
  use crate::http::HttpTodoApi;
  use crate::render::Renderer;
  use crate::shell;

  #[tracing::instrument(skip_all)]
  pub fn run(
    raw_args: Vec<OsString>
  ) -> anyhow::Result<()> {
    let cli =
      cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(
      cli.verbose,
      cli.quiet
    )?;

    info!(
      verbose = cli.verbose,
      quiet = cli.quiet,
      "starting tasklist"
    );

    let mut cfg = Config::load(
      cli.config.as_deref()
    )?;
    cfg.apply_overrides(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    );

    let api_url = config::resolve_api_url(
      &cfg,
      cli.api_url.as_deref(),
      std::env::var(config::API_URL_ENV)
        .ok()
    );
    let api = HttpTodoApi::new(&api_url)
      .with_context(|| {
        format!(
          "failed to set up client for \
           {api_url}"
        )
      })?;
    info!(api_url = %api.base_url(), "using todo service");

    let renderer = Renderer::new(&cfg)?;
    let initial = TaskListState {
      dark_mode: cfg.theme()?
        == Theme::Dark,
      ..TaskListState::default()
    };
    let controller =
      TaskListController::with_state(
        api, initial
      );

    let runtime =
      tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context(
          "failed to start async \
           runtime"
        )?;

    let command = cli
      .command
      .unwrap_or(Command::Shell);
    debug!(?command, "dispatching");

    runtime.block_on(dispatch(
      &controller,
      &renderer,
      command
    ))?;

    info!("done");
    Ok(())
  }

  async fn dispatch(
    controller: &TaskListController<
      HttpTodoApi
    >,
    renderer: &Renderer,
    command: Command
  ) -> anyhow::Result<()> {
    let stdout = io::stdout();

    match command {
      | Command::Shell => {
        return shell::run_shell(
          controller,
          renderer,
          io::stdin().lock(),
          stdout.lock()
        )
        .await;
      }
      | Command::Ping => {
        let greeting = controller
          .api()
          .ping()
          .await
          .context(
            "todo service is not \
             reachable"
          )?;
        println!(
          "{}: {}",
          controller.api().base_url(),
          greeting.message
        );
        return Ok(());
      }
      | Command::Show { id } => {
        let task = controller
          .api()
          .get_task(&id)
          .await
          .with_context(|| {
            format!(
              "failed to fetch task {id}"
            )
          })?;
        return renderer
          .write_task(stdout.lock(), &task);
      }
      | Command::List { filter } => {
        controller.set_filter(filter);
        controller.load_tasks().await;
      }
      | Command::Add { title } => {
        controller.load_tasks().await;
        controller
          .add_task(&title.join(" "))
          .await;
      }
      | Command::Toggle { id } => {
        controller.load_tasks().await;
        controller
          .toggle_completed(&id)
          .await?;
      }
      | Command::Rm { id } => {
        controller.delete_task(&id).await;
      }
      | Command::Rename { id, title } => {
        controller.load_tasks().await;
        controller.begin_edit(&id)?;
        controller
          .set_edit_draft(title.join(" "));
        controller.save_edit(&id).await?;
      }
    }

    renderer.write_task_list(
      stdout.lock(),
      &controller.snapshot()
    )
  }
}
