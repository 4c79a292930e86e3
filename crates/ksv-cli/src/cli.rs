use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use ksv_core::{OnDecodeError, OutputFormat};

#[derive(Parser)]
#[command(name = "ksv")]
#[command(about = "Decode and encode Kubernetes Secret manifests", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Read the manifest from a file instead of stdin ("-" means stdin)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Output format (default from config: yaml)
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<Format>,

    /// Handling of values that are not valid base64 (default from config: empty)
    #[arg(long, global = true, value_enum)]
    pub on_decode_error: Option<DecodeErrorPolicy>,

    /// Path to the config file
    #[arg(long, global = true, env = "KSV_CONFIG")]
    pub config: Option<PathBuf>,

    // Defaults to `decode` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode a secret manifest read from stdin
    #[command(visible_alias = "e")]
    Encode,

    /// Decode a secret manifest read from stdin (default command)
    #[command(visible_alias = "d")]
    Decode {
        /// Convert data to stringData
        #[arg(short = 's', long, alias = "stringData")]
        string_data: bool,
    },

    /// Add a key/value to the secret data section
    #[command(visible_alias = "a")]
    Add {
        /// Key to add or replace
        #[arg(short, long)]
        key: String,

        /// Plaintext value
        #[arg(short, long)]
        value: String,
    },

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective config
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => OutputFormat::Yaml,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DecodeErrorPolicy {
    /// Replace the value with an empty string
    Empty,
    /// Abort with an error
    Fail,
    /// Leave the encoded value as it is
    Keep,
}

impl From<DecodeErrorPolicy> for OnDecodeError {
    fn from(policy: DecodeErrorPolicy) -> Self {
        match policy {
            DecodeErrorPolicy::Empty => OnDecodeError::EmptyString,
            DecodeErrorPolicy::Fail => OnDecodeError::Fail,
            DecodeErrorPolicy::Keep => OnDecodeError::KeepOriginal,
        }
    }
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
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["ksv"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_decode_string_data_alias() {
        let cli = Cli::try_parse_from(["ksv", "d", "-s"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Decode { string_data: true })
        ));

        for flag in ["--string-data", "--stringData"] {
            let cli = Cli::try_parse_from(["ksv", "decode", flag]).unwrap();
            assert!(matches!(
                cli.command,
                Some(Commands::Decode { string_data: true })
            ));
        }
    }

    #[test]
    fn test_add_requires_key_and_value() {
        let cli = Cli::try_parse_from(["ksv", "add", "-k", "foo", "-v", "bar"]).unwrap();
        match cli.command {
            Some(Commands::Add { key, value }) => {
                assert_eq!(key, "foo");
                assert_eq!(value, "bar");
            }
            _ => panic!("expected add command"),
        }

        assert!(Cli::try_parse_from(["ksv", "add", "--key", "foo"]).is_err());
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ksv",
            "encode",
            "-o",
            "json",
            "--on-decode-error",
            "keep",
            "-f",
            "secret.yaml",
        ])
        .unwrap();

        assert_eq!(cli.output, Some(Format::Json));
        assert_eq!(
            cli.on_decode_error.map(OnDecodeError::from),
            Some(OnDecodeError::KeepOriginal)
        );
        assert_eq!(cli.file, Some(PathBuf::from("secret.yaml")));
    }
}
