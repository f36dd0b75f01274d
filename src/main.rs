mod app;
mod cipher;
mod config;
mod error;
mod file;
mod secret;
mod transform;
mod types;
mod ui;
mod walker;

use crate::app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    App::init()?.execute().await
}
