use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "codemaster")]
#[command(about = "CodeMaster CLI - track progress through a learn-to-code course", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/codemaster/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Progress store file, overriding `[storage] progress_file`
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every course, stage, lesson and sub-lesson with its status
    Courses,
    /// Mark a sub-lesson as completed and apply the unlock rules
    Complete {
        sub_lesson_id: String,
        lesson_id: String,
    },
    /// Select a lesson and re-check whether all its sub-lessons are done
    Recheck {
        course_id: String,
        stage_id: String,
        lesson_id: String,
    },
    /// Show completed lessons per stage
    Progress,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut engine = bootstrap::build_engine(cli.config, cli.store)?;

    match cli.command {
        Commands::Courses => commands::courses::run(&engine),
        Commands::Complete {
            sub_lesson_id,
            lesson_id,
        } => commands::complete::run(&mut engine, &sub_lesson_id, &lesson_id),
        Commands::Recheck {
            course_id,
            stage_id,
            lesson_id,
        } => commands::recheck::run(&mut engine, &course_id, &stage_id, &lesson_id),
        Commands::Progress => commands::progress::run(&engine),
    }
}
