//! Command-line inspector for ESP32 WiFi data.
//!
//! ```text
//! espwifi-inspect reason <code>
//! espwifi-inspect reasons
//! espwifi-inspect records <file>              packed AP records -> JSON scan report
//! espwifi-inspect config <file.json> [--country cn|jp|us|eu]
//! espwifi-inspect stations <file>             packed station list
//! espwifi-inspect layout
//! espwifi-inspect settings <dir> [show | apply <file.json> [--ram]]
//! ```

use std::fs;
use std::mem::size_of;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use espwifi_core::raw::{
    wifi_ap_config_t, wifi_ap_record_t, wifi_config_t, wifi_scan_config_t, wifi_sta_config_t,
    wifi_sta_info_t, wifi_sta_list_t,
};
use espwifi_core::{Country, DisconnectReason, StoragePolicy};
use espwifi_protocol::{codec, wire, ScanReport};
use espwifi_storage::{FileConfigStorage, WifiSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "espwifi-inspect", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Describe one disconnect reason code
    Reason { code: u8 },
    /// List every known disconnect reason
    Reasons,
    /// Decode packed AP records into a JSON scan report
    Records { file: PathBuf },
    /// Validate a JSON interface config and print its wire form
    Config {
        file: PathBuf,
        /// Also check the soft-AP channel against a regulatory domain
        #[arg(long, value_parser = parse_country)]
        country: Option<Country>,
    },
    /// Decode a packed station list
    Stations { file: PathBuf },
    /// Print native and packed sizes of the driver structs
    Layout,
    /// Show or change the settings saved in a directory
    Settings {
        dir: PathBuf,
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsAction {
    /// Print the saved config document
    Show,
    /// Apply a JSON interface config, enabling its interface if needed
    Apply {
        file: PathBuf,
        /// Keep the change in memory only
        #[arg(long)]
        ram: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,espwifi=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Reason { code } => reason(code),
        Command::Reasons => {
            for reason in DisconnectReason::ALL {
                println!("{:>3}  {}", reason.code(), reason.description());
            }
            Ok(())
        }
        Command::Records { file } => records(&file),
        Command::Config { file, country } => config(&file, country),
        Command::Stations { file } => stations(&file),
        Command::Layout => {
            layout();
            Ok(())
        }
        Command::Settings { dir, action } => settings(&dir, action.unwrap_or(SettingsAction::Show)),
    }
}

fn reason(code: u8) -> anyhow::Result<()> {
    match DisconnectReason::from_code(code) {
        Some(reason) => {
            let origin = if reason.is_vendor() { "vendor" } else { "802.11" };
            println!("{} [{}]", reason, origin);
            Ok(())
        }
        None => bail!("{} is not a known disconnect reason", code),
    }
}

fn records(path: &Path) -> anyhow::Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut report = ScanReport::new(wire::decode_ap_records(&bytes)?);
    report.sort_by_signal();
    tracing::info!("{} records in {}", report.count, path.display());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn config(path: &Path, country: Option<Country>) -> anyhow::Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = codec::decode_config(&text)?;
    if let (Some(country), Some(ap)) = (country, config.as_access_point()) {
        ap.validate_for_country(country)?;
    }

    println!("{} config for {:?} is valid", config.interface(), config.ssid().to_string());
    println!("wire: {}", hex(&wire::encode_config(&config)));
    Ok(())
}

fn stations(path: &Path) -> anyhow::Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let list = wire::decode_station_list(&bytes)?;
    println!("{} associated station(s)", list.num());
    for station in &list {
        println!("  {}", station.mac);
    }
    Ok(())
}

fn layout() {
    let rows = [
        ("wifi_ap_record_t", size_of::<wifi_ap_record_t>(), wire::AP_RECORD_LEN),
        ("wifi_ap_config_t", size_of::<wifi_ap_config_t>(), wire::AP_CONFIG_LEN),
        ("wifi_sta_config_t", size_of::<wifi_sta_config_t>(), wire::STA_CONFIG_LEN),
        ("wifi_sta_list_t", size_of::<wifi_sta_list_t>(), wire::STATION_LIST_LEN),
    ];
    println!("{:<20} {:>6} {:>7}", "struct", "native", "packed");
    for (name, native, packed) in rows {
        println!("{:<20} {:>6} {:>7}", name, native, packed);
    }
    println!("{:<20} {:>6}", "wifi_config_t", size_of::<wifi_config_t>());
    println!("{:<20} {:>6}", "wifi_sta_info_t", size_of::<wifi_sta_info_t>());
    println!(
        "{:<20} {:>6}",
        "wifi_scan_config_t",
        size_of::<wifi_scan_config_t<'static>>()
    );
}

fn settings(dir: &Path, action: SettingsAction) -> anyhow::Result<()> {
    let storage = FileConfigStorage::new(dir)?;
    let mut settings = WifiSettings::restore(storage)?;

    if let SettingsAction::Apply { file, ram } = action {
        if ram {
            settings.set_storage(StoragePolicy::Ram);
        }
        let text =
            fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
        let config = codec::decode_config(&text)?;
        let mode = settings.mode().with_interface(config.interface());
        if mode != settings.mode() {
            settings.set_mode(mode)?;
        }
        settings.set_config(config)?;
    }

    println!("{}", codec::encode_config_document(settings.document())?);
    Ok(())
}

fn parse_country(name: &str) -> Result<Country, String> {
    serde_json::from_value(serde_json::Value::String(name.to_lowercase()))
        .map_err(|_| format!("unknown country {:?} (expected cn, jp, us or eu)", name))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["espwifi-inspect", "reason", "201"]).unwrap();
        assert!(matches!(cli.command, Command::Reason { code: 201 }));

        assert!(Cli::try_parse_from(["espwifi-inspect", "reason", "256"]).is_err());
        assert!(Cli::try_parse_from(["espwifi-inspect", "reason"]).is_err());
        assert!(Cli::try_parse_from(["espwifi-inspect", "scan"]).is_err());

        let cli =
            Cli::try_parse_from(["espwifi-inspect", "config", "ap.json", "--country", "JP"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Config { country: Some(Country::Jp), .. }
        ));
        assert!(
            Cli::try_parse_from(["espwifi-inspect", "config", "ap.json", "--country", "xx"])
                .is_err()
        );
    }

    #[test]
    fn test_parse_settings_actions() {
        let cli = Cli::try_parse_from(["espwifi-inspect", "settings", "/tmp/wifi"]).unwrap();
        assert!(matches!(cli.command, Command::Settings { action: None, .. }));

        let cli = Cli::try_parse_from([
            "espwifi-inspect",
            "settings",
            "/tmp/wifi",
            "apply",
            "sta.json",
            "--ram",
        ])
        .unwrap();
        match cli.command {
            Command::Settings {
                action: Some(SettingsAction::Apply { file, ram }),
                ..
            } => {
                assert_eq!(file, PathBuf::from("sta.json"));
                assert!(ram);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
