pub mod args;

pub use args::AppArgs;

use anyhow::Result;

use crate::ui::run_tui;

pub async fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli()).await
}

pub async fn launch_with_args(args: AppArgs) -> Result<()> {
    run_tui(args).await
}
