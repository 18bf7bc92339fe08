use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sprint", about = concat!("sprint-os v", env!("CARGO_PKG_VERSION"), " - your study sprint, one day at a time"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'C', long = "data-dir", global = true, env = "SPRINT_HOME")]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the sprint day, today's progress, streak and countdown
    Status,
    /// List the tasks for today (or another day)
    Today(TodayArgs),
    /// Mark a task complete
    Check(CheckArgs),
    /// Mark a task incomplete
    Uncheck(CheckArgs),
    /// Add a task to a day
    Add(AddArgs),
    /// Import tasks from a CSV file with header day,description,type
    Import(ImportArgs),
    /// Print the study plan
    Plan,
    /// List study resources
    Resources,
}

#[derive(Args)]
pub struct TodayArgs {
    /// Sprint day to show (default: today)
    #[arg(long)]
    pub day: Option<u32>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    /// Sprint day the task belongs to (1 or later)
    pub day: u32,
    /// Task description
    pub desc: String,
    /// Task category, e.g. DSA or Apti
    #[arg(long = "type", short = 't')]
    pub kind: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// CSV file to read
    pub file: String,
}
