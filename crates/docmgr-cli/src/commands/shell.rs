//! Interactive shell: login screen while signed out, file list while signed in.

use std::path::PathBuf;
use std::sync::Arc;

use dialoguer::{Input, Password, Select};

use docmgr_core::config::ClientConfig;
use docmgr_core::error::AppError;
use docmgr_core::traits::download::DownloadSink;
use docmgr_state::AppContext;

use crate::output;
use crate::sink::DirectorySink;
use crate::views::{FileListView, LoginView};

/// What the user picked on the file-list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListAction {
    Refresh,
    Download,
    Upload,
    Logout,
    Quit,
}

const LIST_ACTIONS: [(ListAction, &str); 5] = [
    (ListAction::Refresh, "Refresh"),
    (ListAction::Download, "Download"),
    (ListAction::Upload, "Upload"),
    (ListAction::Logout, "Logout"),
    (ListAction::Quit, "Quit"),
];

fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {}", e))
}

/// Execute the interactive shell
pub async fn execute(ctx: Arc<AppContext>, config: &ClientConfig) -> Result<(), AppError> {
    let sink: Arc<dyn DownloadSink> = Arc::new(DirectorySink::new(&config.download.directory));

    loop {
        let keep_going = if ctx.session().is_authenticated() {
            file_list_screen(&ctx, &sink).await?
        } else {
            login_screen(&ctx).await?
        };
        if !keep_going {
            return Ok(());
        }
    }
}

/// Returns `false` when the user quits.
async fn login_screen(ctx: &Arc<AppContext>) -> Result<bool, AppError> {
    let mut view = LoginView::new(Arc::clone(ctx));

    loop {
        print!("\n{}", view.render());

        let choice = Select::new()
            .items(&["Log in", "Quit"])
            .default(0)
            .interact()
            .map_err(input_error)?;
        if choice == 1 {
            return Ok(false);
        }

        view.email = Input::new()
            .with_prompt("Email")
            .with_initial_text(view.email.clone())
            .interact_text()
            .map_err(input_error)?;
        view.password = Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(input_error)?;

        if view.submit().await {
            return Ok(true);
        }
    }
}

/// Returns `false` when the user quits.
async fn file_list_screen(
    ctx: &Arc<AppContext>,
    sink: &Arc<dyn DownloadSink>,
) -> Result<bool, AppError> {
    let mut view = FileListView::mount(Arc::clone(ctx), Arc::clone(sink)).await;

    loop {
        view.sync().await;
        if !ctx.session().is_authenticated() {
            output::print_warning("Session ended. Please log in again.");
            return Ok(true);
        }

        print!("\n{}", view.render());

        let labels: Vec<&str> = LIST_ACTIONS.iter().map(|(_, label)| *label).collect();
        let choice = Select::new()
            .items(&labels)
            .default(0)
            .interact()
            .map_err(input_error)?;

        match LIST_ACTIONS[choice].0 {
            ListAction::Refresh => {
                view.refresh().await;
            }
            ListAction::Download => download(&mut view).await?,
            ListAction::Upload => upload(&mut view).await?,
            ListAction::Logout => {
                view.logout().await?;
                return Ok(true);
            }
            ListAction::Quit => return Ok(false),
        }
    }
}

async fn download(view: &mut FileListView) -> Result<(), AppError> {
    let records = view.records();
    if records.is_empty() {
        output::print_warning("Nothing to download.");
        return Ok(());
    }

    let labels: Vec<String> = records
        .iter()
        .map(|r| format!("{} v{} ({})", r.file_name, r.version_number, r.parent_url))
        .collect();
    let choice = Select::new()
        .with_prompt("Version to download")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(input_error)?;

    view.download(&records[choice]).await;
    Ok(())
}

async fn upload(view: &mut FileListView) -> Result<(), AppError> {
    let form = view.upload_mut();

    form.parent_url = Input::new()
        .with_prompt("parent_url")
        .with_initial_text(form.parent_url.clone())
        .allow_empty(true)
        .interact_text()
        .map_err(input_error)?;

    let initial = form
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let path: String = Input::new()
        .with_prompt("File path")
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(input_error)?;
    form.file = if path.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(path.trim()))
    };

    form.submit().await;
    print!("{}", form.render());
    Ok(())
}
