//! Session status CLI command.

use std::sync::Arc;

use docmgr_core::config::ClientConfig;
use docmgr_core::error::AppError;
use docmgr_state::AppContext;

use crate::output;

/// Execute the status command
///
/// Reports the restored session without contacting the backend.
pub async fn execute(ctx: Arc<AppContext>, config: &ClientConfig) -> Result<(), AppError> {
    let authenticated = if ctx.session().is_authenticated() {
        "yes"
    } else {
        "no"
    };

    println!("Session");
    output::print_kv("Authenticated", authenticated);
    output::print_kv("Backend", &config.api.base_url);
    output::print_kv("Session store", &config.session.store_dir);
    output::print_kv("Download directory", &config.download.directory);
    Ok(())
}
