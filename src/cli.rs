use std::path::PathBuf;

use clap::Parser;

/// Show one latency chart per `latencies_*.csv` file, in file name order.
///
/// Each chart opens in its own window; the next file is loaded once the
/// window is closed.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "latency-charts", version, long_about = None)]
pub struct Cli {
    /// Folder scanned for latencies_*.csv files.
    #[arg(default_value = ".")]
    pub folder: PathBuf,

    /// Also write each chart as a PNG next to its CSV.
    #[arg(long)]
    pub save_png: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_current_folder_without_saving() {
        let cli = Cli::try_parse_from(["latency-charts"]).unwrap();
        assert_eq!(cli.folder, PathBuf::from("."));
        assert!(!cli.save_png);
    }

    #[test]
    fn accepts_folder_and_opt_in_save() {
        let cli = Cli::try_parse_from(["latency-charts", "runs/today", "--save-png"]).unwrap();
        assert_eq!(cli.folder, PathBuf::from("runs/today"));
        assert!(cli.save_png);
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["latency-charts", "--savefig"]).is_err());
    }
}
