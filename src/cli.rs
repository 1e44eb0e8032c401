//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// shortgate - URL shortener with permission-gated writes
#[derive(Parser, Debug)]
#[command(name = "shortgate")]
#[command(version)]
#[command(about = "URL shortener with permission-gated writes", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: ./config.toml if present)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print a sample configuration file
    GenerateConfig {
        /// Write to this path instead of stdout
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["shortgate"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_config_flag_is_global() {
        let cli = Cli::try_parse_from(["shortgate", "serve", "-c", "prod.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve));
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
    }

    #[test]
    fn test_generate_config_output() {
        let cli =
            Cli::try_parse_from(["shortgate", "generate-config", "--output", "out.toml"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::GenerateConfig {
                output: Some("out.toml".into())
            })
        );
    }
}
