use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use fw_log::LineEnding;

#[derive(Debug, Parser)]
#[command(name = "fw-log-host", about = "Emit sample firmware log events to stdout")]
pub struct HostArgs {
    /// JSON console config, e.g. {"colors": false, "line_ending": "lf"}
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Line terminator
    #[arg(long, value_enum)]
    pub line_ending: Option<EndingArg>,

    /// Number of simulated main loop iterations
    #[arg(long, default_value_t = 3)]
    pub rounds: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EndingArg {
    Lf,
    Crlf,
}

impl From<EndingArg> for LineEnding {
    fn from(arg: EndingArg) -> Self {
        match arg {
            EndingArg::Lf => LineEnding::Lf,
            EndingArg::Crlf => LineEnding::CrLf,
        }
    }
}
