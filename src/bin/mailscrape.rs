use clap::{CommandFactory, Parser};
use mailscrape::config::{CliConfig, Config};
use mailscrape::logging;
use mailscrape::pipeline;
use mailscrape::ui::{Cli, Commands, ConsoleSink, cli_to_config, print_completions, run_shell};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::CompletionGenerate { shell }) = cli.command {
        let mut app = Cli::command();
        print_completions(shell, &mut app);
        std::process::exit(0);
    }

    let cli_config = cli_to_config(&cli);
    let config = match load_and_merge_config(&cli_config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let verbose = config.verbose.unwrap_or(false);
    logging::init_logger(verbose && !cli_config.quiet, cli_config.quiet);

    if let Some(Commands::Shell) = cli.command {
        if let Err(e) = run_shell(config).await {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    if config.input.is_none() {
        eprintln!("Error: No input file provided");
        eprintln!("\nFor more information, try '--help'.");
        std::process::exit(1);
    }

    let sink = ConsoleSink::new(!cli_config.no_progress, cli_config.quiet);
    // The sink has already printed the error
    let exit_code = match pipeline::run(&config, &sink).await {
        Ok(_) => 0,
        Err(_) => 1,
    };
    std::process::exit(exit_code);
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(
    cli_config: &CliConfig,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_and_merge_config_no_config_flag() {
        let cli_config = CliConfig {
            no_config: true,
            ..Default::default()
        };
        let config = load_and_merge_config(&cli_config).unwrap();
        assert_eq!(config.timeout, Some(10));
        assert_eq!(config.workers, Some(5));
    }

    #[test]
    fn test_load_and_merge_config_with_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("scrape.toml");
        fs::write(&config_path, "timeout = 45\nworkers = 12\n").unwrap();

        let cli_config = CliConfig {
            config_file: Some(config_path.to_str().unwrap().to_string()),
            workers: Some(3),
            ..Default::default()
        };

        let config = load_and_merge_config(&cli_config).unwrap();
        assert_eq!(config.timeout, Some(45));
        assert_eq!(config.workers, Some(3));
    }

    #[test]
    fn test_load_and_merge_config_invalid_file() {
        let cli_config = CliConfig {
            config_file: Some("/nonexistent/config.toml".to_string()),
            ..Default::default()
        };
        assert!(load_and_merge_config(&cli_config).is_err());
    }

    #[test]
    fn test_load_and_merge_config_rejects_bad_cli_values() {
        let cli_config = CliConfig {
            no_config: true,
            timeout: Some(0),
            ..Default::default()
        };
        assert!(load_and_merge_config(&cli_config).is_err());
    }
}
