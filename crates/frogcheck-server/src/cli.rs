use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "frogcheck-server")]
#[command(author, version, about = "FrogCheck image classification service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Listen address
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Remote classifier prediction endpoint
    #[arg(long)]
    pub classifier_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
