//! Command-line flags for the gammacycle binary.
//!
//! Parsing never fails: anything unrecognised becomes
//! [`CliAction::ShowHelpDueToError`], and `main` decides what to print.

use std::path::PathBuf;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the cycle with these settings
    Run {
        debug_enabled: bool,
        config_path: Option<PathBuf>,
        preview: bool,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or incomplete arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped. Help and version
    /// take precedence over everything else; an unknown flag or a `--config`
    /// without a path turns into [`CliAction::ShowHelpDueToError`].
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut preview = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut config_path: Option<PathBuf> = None;

        let mut args = args.into_iter().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--debug" | "-d" => debug_enabled = true,
                "--preview" | "-p" => preview = true,
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--config" | "-c" => match args.next() {
                    Some(path) if !path.as_ref().starts_with('-') => {
                        config_path = Some(PathBuf::from(path.as_ref()));
                    }
                    _ => {
                        log_warning!("Missing path for --config");
                        unknown_arg_found = true;
                    }
                },
                other => {
                    log_warning!("Unknown argument: {}", other);
                    unknown_arg_found = true;
                }
            }
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else {
            CliAction::Run {
                debug_enabled,
                config_path,
                preview,
            }
        };

        ParsedArgs { action }
    }

    /// Parse the process arguments.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("gammacycle [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-c, --config <file>    Use a custom configuration file");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-p, --preview          Fast-forward through one day on startup");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Signals:");
    log_indented!("SIGUSR2                Reload the configuration file");
    log_indented!("SIGINT, SIGTERM        Shut down");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let parsed = ParsedArgs::parse(vec!["gammacycle"]);
        assert_eq!(
            parsed.action,
            CliAction::Run {
                debug_enabled: false,
                config_path: None,
                preview: false,
            }
        );
    }

    #[test]
    fn test_parse_debug_and_preview() {
        let parsed = ParsedArgs::parse(vec!["gammacycle", "-d", "--preview"]);
        assert_eq!(
            parsed.action,
            CliAction::Run {
                debug_enabled: true,
                config_path: None,
                preview: true,
            }
        );
    }

    #[test]
    fn test_parse_config_path() {
        let parsed = ParsedArgs::parse(vec!["gammacycle", "--config", "/tmp/cycle.toml"]);
        assert_eq!(
            parsed.action,
            CliAction::Run {
                debug_enabled: false,
                config_path: Some(PathBuf::from("/tmp/cycle.toml")),
                preview: false,
            }
        );
    }

    #[test]
    fn test_parse_config_without_path() {
        let parsed = ParsedArgs::parse(vec!["gammacycle", "--config"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);

        let parsed = ParsedArgs::parse(vec!["gammacycle", "-c", "--debug"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_help_and_version_precedence() {
        let parsed = ParsedArgs::parse(vec!["gammacycle", "--debug", "--help"]);
        assert_eq!(parsed.action, CliAction::ShowHelp);

        // Version wins over help and unknown flags
        let parsed = ParsedArgs::parse(vec!["gammacycle", "--bogus", "-h", "-V"]);
        assert_eq!(parsed.action, CliAction::ShowVersion);
    }

    #[test]
    fn test_parse_unknown_argument() {
        let parsed = ParsedArgs::parse(vec!["gammacycle", "--unknown"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }
}
