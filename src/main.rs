// main.rs
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use clap::Parser;

mod autorun;
mod autostart;
mod config_store;
mod error;
mod icon;
mod launcher;
mod logging;
mod reconcile;
mod session;
mod settings;
mod tray;
mod ui;

use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "startup_launcher", version, about = "Launch selected programs at login")]
struct Cli {
    /// Run unattended: launch the saved apps and show the tray icon.
    /// The optional SLOT limits the run to one entry; a bare `--autorun`
    /// (e.g. from a hand-written entry) still launches the whole list.
    #[arg(long, value_name = "SLOT", num_args = 0..=1)]
    autorun: Option<Option<usize>>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    match cli.autorun {
        Some(slot) => {
            logging::init(Some(&settings.log_path));
            log::info!("Autorun started (slot {:?})", slot);
            autorun::run(&settings, slot);
        }
        None => {
            logging::init(None);
            ui::run(settings)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flag_means_interactive() {
        let cli = Cli::try_parse_from(["startup_launcher"]).unwrap();
        assert_eq!(cli.autorun, None);
    }

    #[test]
    fn bare_autorun_has_no_slot() {
        let cli = Cli::try_parse_from(["startup_launcher", "--autorun"]).unwrap();
        assert_eq!(cli.autorun, Some(None));
    }

    #[test]
    fn autorun_accepts_a_slot() {
        let cli = Cli::try_parse_from(["startup_launcher", "--autorun", "3"]).unwrap();
        assert_eq!(cli.autorun, Some(Some(3)));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Cli::try_parse_from(["startup_launcher", "--profile", "x"]).is_err());
    }
}
