use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bikeshare-explorer",
    version,
    about = "Interactive explorer for US bikeshare trip data"
)]
pub struct Cli {
    /// Directory holding the city CSV files. Defaults to ./data
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}
