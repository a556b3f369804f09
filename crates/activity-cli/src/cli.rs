use activity_domain::ActivityStatus;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "activity-board")]
#[command(about = "A terminal client for a three-column activity board", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Base URL of the activity API (or set ACTIVITY_API_URL)
    #[arg(long, value_name = "URL", env = "ACTIVITY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List activities in board order
    List {
        /// Only activities with this status
        #[arg(long)]
        status: Option<ActivityStatus>,
    },
    /// Show activities grouped into status columns
    Board,
    /// Get a specific activity
    Get {
        #[arg(long)]
        id: String,
    },
    /// Create a new activity
    Create(CreateArgs),
    /// Update an activity
    Update(UpdateArgs),
    /// Change only the status of an activity
    Status {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: ActivityStatus,
    },
    /// Delete an activity
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Attach an image to an activity
    UploadImage {
        #[arg(long)]
        id: String,
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the URL an activity's image is served from
    ImageUrl {
        #[arg(long)]
        id: String,
    },
    /// Drag an activity onto a column or another activity and persist the order
    Move(MoveArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    /// pendente, em andamento or concluído
    #[arg(long)]
    pub status: Option<ActivityStatus>,
    /// Image to upload after the activity is created
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<ActivityStatus>,
    /// Image to upload after the update
    #[arg(long, value_name = "FILE")]
    pub image: Option<PathBuf>,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Activity to drag
    #[arg(long)]
    pub id: String,
    /// Drop target: a status (drops at the end of that column) or the id of
    /// the activity to drop onto
    #[arg(long, value_name = "TARGET")]
    pub to: String,
}
