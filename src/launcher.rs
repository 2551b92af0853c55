//! Startup sequencing: workspace, settings, banner, browser, serve.

use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{info, warn};

use crate::browser::{BrowserTask, OPEN_DELAY, open_in_default_browser};
use crate::cli::{Cli, VERSION_LINE};
use crate::config::{RcFile, Settings, load_rc, rc_path};
use crate::error::{ConfigError, LaunchError};
use crate::handlers::APP_VERSION;
use crate::server::{bind, build_router, serve};
use crate::state::AppState;
use crate::workspace::resolve_workspace;

/// Outcome of looking for `.tetsuorc`.
#[derive(Debug)]
pub enum RcStatus {
    Absent,
    Loaded(PathBuf),
    Failed { path: PathBuf, error: ConfigError },
}

impl RcStatus {
    /// Line to show the user, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            RcStatus::Absent => None,
            RcStatus::Loaded(path) => Some(format!("Loaded config from {}", path.display())),
            RcStatus::Failed { path, error } => Some(format!(
                "Warning: Failed to load {}: {}",
                path.display(),
                error
            )),
        }
    }
}

/// Everything needed to start the server, resolved before it is built.
#[derive(Debug)]
pub struct LaunchPlan {
    pub settings: Settings,
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub rc_status: RcStatus,
}

impl LaunchPlan {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn banner(&self) -> String {
        format!(
            "\n  tetsuocode v{}\n  Workspace: {}\n  Running on {}\n  Press Ctrl+C to quit\n",
            APP_VERSION,
            self.settings.workspace.display(),
            self.url()
        )
    }
}

/// Resolves the workspace and merges all settings layers.
///
/// Fails only when the workspace is not a directory. A broken config file is
/// reported through [`RcStatus::Failed`] and otherwise ignored.
pub fn prepare<F>(cli: &Cli, env: F) -> Result<LaunchPlan, LaunchError>
where
    F: Fn(&str) -> Option<String>,
{
    let workspace = resolve_workspace(cli.workspace.as_deref())?;

    let (rc, rc_status): (Option<RcFile>, RcStatus) = match load_rc(&workspace) {
        Ok(Some(rc)) => (Some(rc), RcStatus::Loaded(rc_path(&workspace))),
        Ok(None) => (None, RcStatus::Absent),
        Err(error) => (
            None,
            RcStatus::Failed {
                path: rc_path(&workspace),
                error,
            },
        ),
    };

    let settings = Settings::merge(workspace, &cli.password, &cli.api_key, env, rc.as_ref());

    Ok(LaunchPlan {
        settings,
        host: cli.host.clone(),
        port: cli.port,
        open_browser: !cli.no_browser,
        rc_status,
    })
}

/// Schedules the browser launch unless the plan disables it.
pub fn schedule_browser<F>(plan: &LaunchPlan, delay: Duration, opener: F) -> Option<BrowserTask>
where
    F: FnOnce(&str) + Send + 'static,
{
    plan.open_browser
        .then(|| BrowserTask::schedule(plan.url(), delay, opener))
}

/// Runs the launcher to completion.
pub async fn run(cli: Cli) -> Result<(), LaunchError> {
    if cli.version {
        println!("{}", VERSION_LINE);
        return Ok(());
    }

    let plan = prepare(&cli, |key| std::env::var(key).ok())?;
    if let Some(message) = plan.rc_status.message() {
        println!("{}", message);
    }
    if let RcStatus::Failed { error, .. } = &plan.rc_status {
        warn!("Ignoring config file: {}", error);
    }
    log_credentials(&plan.settings);

    // The router only exists once settings are final.
    let state = Arc::new(AppState::new(plan.settings.clone()));
    let router = build_router(state);

    println!("{}", plan.banner());
    let listener = bind(&plan.host, plan.port).await?;
    let browser = schedule_browser(&plan, OPEN_DELAY, open_in_default_browser);

    serve(listener, router, shutdown_signal()).await?;

    if let Some(task) = browser {
        task.cancel();
    }
    println!("\nShutting down...");
    Ok(())
}

fn log_credentials(settings: &Settings) {
    match &settings.api_key {
        Some(key) => info!("API key from {}", key.source),
        None => warn!("No API key configured; set --api-key or XAI_API_KEY"),
    }
    if let Some(password) = &settings.password {
        info!("Access password from {}", password.source);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
