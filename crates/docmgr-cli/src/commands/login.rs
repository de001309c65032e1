//! Login CLI command.

use std::sync::Arc;

use clap::Args;

use docmgr_core::error::AppError;
use docmgr_state::AppContext;

use crate::output;
use crate::views::LoginView;
use crate::views::login::LOGIN_FAILED_MESSAGE;

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(short, long)]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Execute the login command
pub async fn execute(args: &LoginArgs, ctx: Arc<AppContext>) -> Result<(), AppError> {
    let mut view = LoginView::new(Arc::clone(&ctx));

    view.email = match &args.email {
        Some(e) => e.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    view.password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    if !view.submit().await {
        let message = view.error().unwrap_or(LOGIN_FAILED_MESSAGE);
        output::print_error(message);
        return Err(AppError::authentication(message));
    }

    output::print_success("Logged in");
    match ctx.registry().status().error_message() {
        Some(message) => output::print_warning(message),
        None => println!("{} file versions available", ctx.registry().len()),
    }

    Ok(())
}
