use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

mod commands;
mod config;
mod tracing_config;

use commands::CatalogOptions;

/// Enum value inspector.
///
/// Shows enumeration-typed values the way a debugger presents them: the
/// member name on an exact match, `a | b | c` for bit-flag combinations, and
/// the plain number otherwise. Enum types and frame variables come from
/// enumscope.toml.
///
/// EXAMPLES:
///     enumscope format --type FileAccess 7     Format one raw value
///     enumscope types                          List the enum catalog
///     enumscope print mode                     Print a frame variable
///     enumscope mi < requests.txt              Answer GDB/MI requests
///
/// ENVIRONMENT VARIABLES:
///     ENUMSCOPE_JSON             Set to '1' for JSON output by default
///     ENUMSCOPE_FLAGS_SEPARATOR  Separator between flag names
///     ENUMSCOPE_LOG              Log filter (e.g. 'debug'), falls back to RUST_LOG
///     ENUMSCOPE_LOG_FORMAT       'text' (default) or 'json'
///     NO_COLOR                   Set to disable colored output
#[derive(Parser)]
#[command(name = "enumscope")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a raw value of an enum type
    ///
    /// Values may be decimal or 0x/0o/0b prefixed, and negative for signed
    /// underlying types.
    ///
    /// EXAMPLES:
    ///     enumscope format --type FileAccess 7
    ///     enumscope format -t FileAccess 0x5 --separator ", "
    ///     enumscope format -t Level -1 --json
    #[command(visible_alias = "f")]
    Format {
        /// Enum type name
        #[arg(long = "type", short = 't')]
        type_name: String,
        /// Raw value
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Path to the project configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
        /// Separator placed between flag names
        #[arg(long)]
        separator: Option<String>,
        /// Output as JSON
        #[arg(long, env = "ENUMSCOPE_JSON")]
        json: bool,
    },

    /// List enum types with their members
    ///
    /// Each type is shown with its members in declaration order and in
    /// ascending value order.
    ///
    /// EXAMPLES:
    ///     enumscope types
    ///     enumscope types --json | jq '.[].name'
    #[command(visible_alias = "t")]
    Types {
        /// Path to the project configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
        /// Output as JSON
        #[arg(long, env = "ENUMSCOPE_JSON")]
        json: bool,
        /// Disable colored output
        #[arg(long, env = "NO_COLOR")]
        no_color: bool,
    },

    /// Print frame variables
    ///
    /// Without an expression every variable of the frame is printed, sorted
    /// by name.
    ///
    /// EXAMPLES:
    ///     enumscope print                 All variables
    ///     enumscope print mode            One variable
    ///     enumscope print "(Access)5"     Cast a literal
    #[command(visible_alias = "p")]
    Print {
        /// Variable name or `(Type)value` cast
        expression: Option<String>,
        /// Path to the project configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
        /// Separator placed between flag names
        #[arg(long)]
        separator: Option<String>,
        /// Output as JSON
        #[arg(long, env = "ENUMSCOPE_JSON")]
        json: bool,
    },

    /// Answer GDB/MI requests on stdin
    ///
    /// Supports `-var-create - * "<expr>"` and `-gdb-exit`.
    ///
    /// EXAMPLES:
    ///     echo '-var-create - * "mode"' | enumscope mi
    Mi {
        /// Path to the project configuration file
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
        /// Separator placed between flag names
        #[arg(long)]
        separator: Option<String>,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     enumscope completions bash > ~/.local/share/bash-completion/completions/enumscope
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    tracing_config::init_tracing();

    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    match cli.command {
        Commands::Format {
            type_name,
            value,
            config,
            separator,
            json,
        } => {
            let args = commands::format::FormatArgs {
                type_name,
                value,
                catalog: CatalogOptions { config, separator },
                json: json || cli_config.default_json,
            };
            commands::format::run(args)?;
        }
        Commands::Types {
            config,
            json,
            no_color,
        } => {
            let args = commands::types::TypesArgs {
                catalog: CatalogOptions {
                    config,
                    separator: None,
                },
                json: json || cli_config.default_json,
                no_color: no_color || cli_config.no_color,
            };
            commands::types::run(args)?;
        }
        Commands::Print {
            expression,
            config,
            separator,
            json,
        } => {
            let args = commands::print::PrintArgs {
                expression,
                catalog: CatalogOptions { config, separator },
                json: json || cli_config.default_json,
            };
            commands::print::run(args)?;
        }
        Commands::Mi { config, separator } => {
            let args = commands::mi::MiArgs {
                catalog: CatalogOptions { config, separator },
            };
            commands::mi::run(args)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
