// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for herald

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "herald")]
#[command(about = "Render notification templates against structured log events")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template file against an event JSON file
    Render {
        #[arg(help = "Path to the Handlebars template")]
        template: PathBuf,

        #[arg(help = "Path to the event JSON document")]
        event: PathBuf,

        #[arg(short, long, help = "Write the rendered text to a file")]
        output: Option<PathBuf>,

        #[arg(long, help = "Instance name exposed as $Instance")]
        instance: Option<String>,

        #[arg(long, help = "Server URI exposed as $ServerUri")]
        server_uri: Option<String>,

        #[arg(long, help = "Escape mode: html or plain")]
        escape: Option<String>,
    },

    /// Validate template syntax without rendering
    Validate {
        #[arg(help = "Path to the Handlebars template")]
        template: PathBuf,
    },

    /// List the notification helpers available to templates
    Helpers,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
