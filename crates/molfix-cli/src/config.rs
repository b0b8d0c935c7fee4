mod defaults;

use crate::cli::{Cli, Commands, FinalNewline, OutputFormat};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use defaults::DefaultsConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialRepairConfig {
    #[serde(rename = "strip-final-newline")]
    strip_final_newline: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    format: Option<OutputFormat>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialRuntimeConfig {
    threads: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    repair: Option<PartialRepairConfig>,
    output: Option<PartialOutputConfig>,
    runtime: Option<PartialRuntimeConfig>,
}

/// Settings in effect for one invocation, after merging defaults, the config file,
/// `--set` overrides and command-line flags (in increasing priority).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub output_format: OutputFormat,
    pub strip_final_newline: bool,
    pub threads: Option<usize>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_cli(mut self, cli: &Cli) -> Result<AppConfig> {
        self.apply_set_values(&cli.set_values)?;
        let defaults = DefaultsConfig::default();

        let repair = self.repair.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();
        let runtime = self.runtime.take().unwrap_or_default();

        let output_format = match &cli.command {
            Commands::Bonds(args) => args.format,
            _ => None,
        }
        .or(output.format)
        .unwrap_or(defaults.output_format);

        let strip_final_newline = match &cli.command {
            Commands::Repair(args) => Self::merge_final_newline(args.final_newline),
            _ => None,
        }
        .or(repair.strip_final_newline)
        .unwrap_or(defaults.strip_final_newline);

        let threads = cli.threads.or(runtime.threads);
        if threads == Some(0) {
            return Err(CliError::Config(
                "The number of threads must be at least 1.".to_string(),
            ));
        }

        Ok(AppConfig {
            output_format,
            strip_final_newline,
            threads,
        })
    }

    fn merge_final_newline(flags: FinalNewline) -> Option<bool> {
        if flags.strip_final_newline {
            Some(true)
        } else if flags.keep_final_newline {
            Some(false)
        } else {
            None
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "repair.strip-final-newline" => {
                    self.repair
                        .get_or_insert_with(Default::default)
                        .strip_final_newline = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid boolean value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "output.format" => {
                    self.output.get_or_insert_with(Default::default).format =
                        Some(OutputFormat::from_str(value_str, true).map_err(|_| {
                            CliError::Config(format!(
                                "Invalid output format for {}: {} (expected 'table' or 'csv')",
                                key, value_str
                            ))
                        })?);
                }
                "runtime.threads" => {
                    self.runtime.get_or_insert_with(Default::default).threads =
                        Some(value_str.parse().map_err(|_| {
                            CliError::Config(format!(
                                "Invalid integer value for {}: {}",
                                key, value_str
                            ))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn parse_cli(args: &[&str]) -> Cli {
        let mut full = vec!["molfix"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn defaults_apply_without_file_or_flags() {
        let cli = parse_cli(&["bonds", "in.mol"]);
        let config = PartialAppConfig::default().merge_with_cli(&cli).unwrap();
        assert_eq!(
            config,
            AppConfig {
                output_format: OutputFormat::Table,
                strip_final_newline: false,
                threads: None,
            }
        );
    }

    #[test]
    fn file_values_are_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("molfix.toml");
        fs::write(
            &path,
            r#"
[repair]
strip-final-newline = true

[output]
format = "csv"

[runtime]
threads = 3
"#,
        )
        .unwrap();

        let partial = PartialAppConfig::load(Some(&path)).unwrap();
        let cli = parse_cli(&["repair", "a.mol", "--in-place"]);
        let config = partial.merge_with_cli(&cli).unwrap();
        assert!(config.strip_final_newline);
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert_eq!(config.threads, Some(3));
    }

    #[test]
    fn unknown_keys_in_file_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[repair]\nstrip-newline = true\n").unwrap();
        let result = PartialAppConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = PartialAppConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn cli_flags_beat_set_values_which_beat_file() {
        let mut partial: PartialAppConfig =
            toml::from_str("[output]\nformat = \"table\"\n[runtime]\nthreads = 2\n").unwrap();
        partial
            .apply_set_values(&["runtime.threads=8".to_string()])
            .unwrap();
        assert_eq!(partial.runtime.as_ref().unwrap().threads, Some(8));

        let cli = parse_cli(&[
            "-S",
            "output.format=csv",
            "-j",
            "4",
            "bonds",
            "in.mol",
            "--format",
            "table",
        ]);
        let config = partial.merge_with_cli(&cli).unwrap();
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.threads, Some(4));
    }

    #[test]
    fn set_value_selects_output_format() {
        let cli = parse_cli(&["-S", "output.format=CSV", "bonds", "in.mol"]);
        let config = PartialAppConfig::default().merge_with_cli(&cli).unwrap();
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn keep_flag_overrides_file_strip_setting() {
        let partial: PartialAppConfig =
            toml::from_str("[repair]\nstrip-final-newline = true\n").unwrap();
        let cli = parse_cli(&["repair", "a.mol", "--in-place", "--keep-final-newline"]);
        let config = partial.merge_with_cli(&cli).unwrap();
        assert!(!config.strip_final_newline);
    }

    #[test]
    fn malformed_set_values_are_rejected() {
        let mut partial = PartialAppConfig::default();
        for bad in ["no-equals-sign", "unknown.key=1", "runtime.threads=many"] {
            let result = partial.apply_set_values(&[bad.to_string()]);
            assert!(matches!(result, Err(CliError::Config(_))), "{}", bad);
        }
    }

    #[test]
    fn zero_threads_is_rejected() {
        let cli = parse_cli(&["-j", "0", "repair", "a.mol", "--in-place"]);
        let result = PartialAppConfig::default().merge_with_cli(&cli);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
