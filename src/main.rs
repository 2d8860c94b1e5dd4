mod args;
mod cli;
mod config;
mod editor;
mod error;
mod gfork;
mod i18n;
mod prompt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    gfork::Gfork::parse()?.run().await?;
    Ok(())
}
