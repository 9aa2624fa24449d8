#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `logc` command-line front-end: it appends a single
//! record to the process log, which makes the logger usable from shell
//! scripts and lets its behaviour be exercised end to end.
//!
//! # Design
//!
//! [`run`] takes an iterator of arguments together with handles for standard
//! output and error, and returns the exit code. A
//! [`clap`](https://docs.rs/clap/) command definition parses the options; the
//! message itself is a printf-style template expanded with
//! [`logging::expand_template`], so `%d` with no argument left renders
//! verbatim instead of failing.
//!
//! The record goes through a [`logging::Logger`] built from the default
//! configuration, so the threshold still comes from `LOG_LEVEL` and, when the
//! file cannot be opened, the record and a diagnostic land on the process's
//! real standard error.
//!
//! # Errors
//!
//! Usage errors print a diagnostic to the supplied error handle and return
//! `1`. Once logging has been attempted the exit code is `0`, whether or not
//! the record passed the threshold or reached the file.
//!
//! # Examples
//!
//! ```
//! let dir = tempfile::tempdir()?;
//! let log = dir.path().join("app.log");
//!
//! let args = [
//!     "logc".into(),
//!     "--level".into(),
//!     "ERROR".into(),
//!     "--log-file".into(),
//!     log.clone().into_os_string(),
//!     "disk %s is full".into(),
//!     "sda1".into(),
//! ];
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run::<_, std::ffi::OsString, _, _>(args, &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! let contents = std::fs::read_to_string(&log)?;
//! assert!(contents.ends_with("logc[0] | ERROR | disk sda1 is full\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser, value_parser};
use logging::{CallSite, Logger, LoggerConfig, Severity};

/// Name the binary is installed under.
const PROGRAM_NAME: &str = "logc";

/// Call-site label used when `--site` is not given.
const DEFAULT_SITE: &str = "logc";

/// Deterministic help text describing the supported options.
const HELP_TEXT: &str = concat!(
    "logc ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "Append one record to the process log.\n",
    "\n",
    "Usage: logc [OPTIONS] <TEMPLATE> [ARG]...\n",
    "\n",
    "TEMPLATE is a printf-style message: %s, %d, %i and %u take the next ARG\n",
    "and %% is a literal percent sign. Records below the threshold named by\n",
    "LOG_LEVEL (DEBUG, INFO, WARN or ERROR; INFO when unset) are dropped.\n",
    "Options must precede TEMPLATE.\n",
    "\n",
    "Options:\n",
    "  -l, --level <LEVEL>    Severity of the record (default INFO).\n",
    "  -s, --site <NAME>      Function label recorded with the message (default logc).\n",
    "  -n, --line <N>         Line number recorded with the message (default 0).\n",
    "      --log-file <PATH>  Append to PATH instead of /var/log/log_c.log.\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Output version information and exit.\n",
);

/// Parsed command-line state.
#[derive(Debug)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    level: Severity,
    site: String,
    line: u32,
    log_file: Option<PathBuf>,
    operands: Vec<String>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .short('l')
                .value_name("LEVEL")
                .help("Severity of the record.")
                .action(ArgAction::Set)
                .default_value(Severity::Info.as_str())
                .value_parser(|value: &str| value.parse::<Severity>()),
        )
        .arg(
            Arg::new("site")
                .long("site")
                .short('s')
                .value_name("NAME")
                .help("Function label recorded with the message.")
                .action(ArgAction::Set)
                .default_value(DEFAULT_SITE),
        )
        .arg(
            Arg::new("line")
                .long("line")
                .short('n')
                .value_name("N")
                .help("Line number recorded with the message.")
                .action(ArgAction::Set)
                .default_value("0")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .help("Append to PATH instead of the fixed log location.")
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("operands")
                .action(ArgAction::Append)
                .num_args(0..)
                .allow_hyphen_values(true)
                .trailing_var_arg(true),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from(PROGRAM_NAME));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let show_help = matches.get_flag("help");
    let show_version = matches.get_flag("version");
    let level = matches
        .remove_one::<Severity>("level")
        .unwrap_or_default();
    let site = matches
        .remove_one::<String>("site")
        .unwrap_or_else(|| DEFAULT_SITE.to_owned());
    let line = matches.remove_one::<u32>("line").unwrap_or_default();
    let log_file = matches
        .remove_one::<OsString>("log-file")
        .map(PathBuf::from);
    let operands = matches
        .remove_many::<String>("operands")
        .map(|values| values.collect())
        .unwrap_or_default();

    Ok(ParsedArgs {
        show_help,
        show_version,
        level,
        site,
        line,
        log_file,
        operands,
    })
}

/// Renders the version banner.
fn render_version() -> String {
    format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"))
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code: `0` after a record was handed to the
/// logger (or help/version was printed), `1` on usage errors.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{error}");
            1
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        level,
        site,
        line,
        log_file,
        operands,
    } = parsed;

    if show_help {
        let _ = stdout.write_all(HELP_TEXT.as_bytes());
        return 0;
    }

    if show_version {
        let _ = stdout.write_all(render_version().as_bytes());
        return 0;
    }

    let Some((template, args)) = operands.split_first() else {
        let _ = writeln!(
            stderr,
            "{PROGRAM_NAME}: missing TEMPLATE operand\nTry '{PROGRAM_NAME} --help' for more information."
        );
        return 1;
    };

    let mut config = LoggerConfig::default();
    if let Some(path) = log_file {
        config = config.with_path(path);
    }

    let logger = Logger::new(config);
    logger.initialize();
    // The process writes a single record, so the label can live for its lifetime.
    let site = CallSite::new(site.leak(), line);
    logger.write_template(site, level, template, args);
    logger.teardown();
    0
}
