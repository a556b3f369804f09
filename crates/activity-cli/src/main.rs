mod cli;
mod context;
mod handlers;
mod output;

use activity_client::{BoardSession, HttpActivityApi};
use activity_core::{logging, AppConfig, LogTarget};
use activity_tui::App;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The board owns the terminal, so it only ever logs to a file.
    logging::init(&LogTarget::from_env(cli.command.is_none()))?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let api_url = config.effective_api_url(cli.api_url.as_deref());

    match cli.command {
        None => {
            let api = HttpActivityApi::new(&api_url)?;
            let mut app = App::new(BoardSession::new(Arc::new(api)), api_url);
            app.run().await?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "activity-board",
                &mut std::io::stdout(),
            );
        }
        Some(cmd) => {
            if let Err(e) = run_command(&api_url, cmd).await {
                tracing::debug!("Command failed: {:?}", e);
                output::output_error(&e.to_string());
            }
        }
    }

    Ok(())
}

async fn run_command(api_url: &str, cmd: Commands) -> anyhow::Result<()> {
    let ctx = CliContext::connect(api_url)?;

    match cmd {
        Commands::List { status } => handlers::activity::list(&ctx, status).await,
        Commands::Board => handlers::board::show(&ctx).await,
        Commands::Get { id } => handlers::activity::get(&ctx, &id).await,
        Commands::Create(args) => handlers::activity::create(&ctx, args).await,
        Commands::Update(args) => handlers::activity::update(&ctx, args).await,
        Commands::Status { id, status } => handlers::activity::set_status(&ctx, &id, status).await,
        Commands::Delete { id } => handlers::activity::delete(&ctx, &id).await,
        Commands::UploadImage { id, file } => {
            handlers::activity::upload_image(&ctx, &id, &file).await
        }
        Commands::ImageUrl { id } => handlers::activity::show_image_url(&ctx, &id).await,
        Commands::Move(args) => handlers::board::move_activity(&ctx, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}
