//! Network device command handler.

use crate::cli::GlobalOpts;
use crate::commands::settle;
use crate::config::Session;
use crate::error::CliError;
use crate::output;

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = settle(session.client.get_devices()).await?;
    output::print_output(&output::render(global.output, &devices)?, global.quiet);
    Ok(())
}
