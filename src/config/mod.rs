#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::cli::Command;
    use super::toml_config::TomlConfig;
    use crate::core::ConflictMatching;
    use crate::utils::error::Result;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "barber-booking")]
    #[command(about = "Find free times and book barbershop appointments")]
    pub struct CliConfig {
        /// TOML configuration file
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Base URL of the booking API
        #[arg(long)]
        pub api_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        pub timeout: Option<u64>,

        #[arg(long, value_enum)]
        pub conflict_matching: Option<ConflictMatching>,

        /// Time zone as an offset from UTC, e.g. +01:00
        #[arg(long, allow_hyphen_values = true)]
        pub utc_offset: Option<String>,

        #[arg(long, help = "Log as JSON lines")]
        pub log_json: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    impl CliConfig {
        /// Loads the config file, if any, and applies command line overrides.
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => {
                    tracing::info!("Loading configuration from: {}", path.display());
                    TomlConfig::from_file(path)?
                }
                None => TomlConfig::default(),
            };

            if let Some(api_url) = &self.api_url {
                config.api.base_url = api_url.clone();
            }
            if let Some(timeout) = self.timeout {
                config.api.timeout_seconds = Some(timeout);
            }
            if let Some(conflict_matching) = self.conflict_matching {
                config.availability.conflict_matching = conflict_matching;
            }
            if let Some(utc_offset) = &self.utc_offset {
                config.availability.utc_offset = Some(utc_offset.clone());
            }

            Ok(config)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::core::{ConfigProvider, Slot};
        use chrono::{FixedOffset, NaiveDate};
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_parse_slots_command() {
            let cli = CliConfig::try_parse_from([
                "barber-booking",
                "--utc-offset",
                "-05:00",
                "slots",
                "--barber",
                "b1",
                "--date",
                "2024-06-03",
                "--duration",
                "60",
            ])
            .unwrap();

            match &cli.command {
                Command::Slots(args) => {
                    assert_eq!(args.barber, "b1");
                    assert_eq!(args.date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
                    assert_eq!(args.duration, Some(60));
                    assert_eq!(args.service, None);
                }
                other => panic!("unexpected command: {other:?}"),
            }

            let config = cli.resolve().unwrap();
            assert_eq!(
                config.utc_offset().unwrap(),
                FixedOffset::west_opt(5 * 3600)
            );
        }

        #[test]
        fn test_service_and_duration_conflict() {
            let result = CliConfig::try_parse_from([
                "barber-booking",
                "slots",
                "--barber",
                "b1",
                "--date",
                "2024-06-03",
                "--service",
                "s1",
                "--duration",
                "30",
            ]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_book_command_into_form() {
            let cli = CliConfig::try_parse_from([
                "barber-booking",
                "book",
                "--first-name",
                "Ana",
                "--last-name",
                "Novak",
                "--email",
                "ana.novak@example.si",
                "--phone",
                "+38641234567",
                "--barber",
                "b1",
                "--service",
                "s1",
                "--date",
                "2024-06-03",
                "--time",
                "10:30",
            ])
            .unwrap();

            let Command::Book(args) = &cli.command else {
                panic!("expected book command");
            };
            let form = args.to_form();
            assert_eq!(form.first_name, "Ana");
            assert_eq!(form.time, Some(Slot::new(10, 30)));
            assert!(form
                .validate(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
                .is_ok());
        }

        #[test]
        fn test_bad_time_is_rejected_by_parser() {
            let result =
                CliConfig::try_parse_from(["barber-booking", "book", "--time", "half past ten"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_command_line_overrides_file() {
            let mut temp_file = NamedTempFile::new().unwrap();
            temp_file
                .write_all(
                    b"[api]\nbase_url = \"http://file.example.com\"\ntimeout_seconds = 20\n\n[availability]\nconflict_matching = \"same-date\"\n",
                )
                .unwrap();
            let path = temp_file.path().to_str().unwrap().to_string();

            let cli = CliConfig::try_parse_from([
                "barber-booking",
                "--config",
                path.as_str(),
                "--api-url",
                "http://cli.example.com",
                "--conflict-matching",
                "time-of-day",
                "barbers",
            ])
            .unwrap();

            let config = cli.resolve().unwrap();
            assert_eq!(config.api_endpoint(), "http://cli.example.com");
            assert_eq!(config.request_timeout_seconds(), 20);
            assert_eq!(config.conflict_matching(), ConflictMatching::TimeOfDay);
        }
    }
}
