//! # Stockbook Entry Point
//!
//! Opens the store and logs its stock position. Setup lives in
//! [`stockbook_desktop::run`] so it can be tested.

use stockbook_desktop::error::ApiError;
use stockbook_desktop::state::ConfigState;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let app = stockbook_desktop::run(ConfigState::from_env()).await?;
    app.db.inner().close().await;
    Ok(())
}
