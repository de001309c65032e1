//! Logout CLI command.

use std::sync::Arc;

use docmgr_core::error::AppError;
use docmgr_state::AppContext;

use crate::output;

/// Execute the logout command
pub async fn execute(ctx: Arc<AppContext>) -> Result<(), AppError> {
    let was_authenticated = ctx.session().is_authenticated();
    ctx.logout().await?;

    if was_authenticated {
        output::print_success("Logged out");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}
