//! The `cfmt` command line tool.
use std::fs;
use std::io::IsTerminal;
use std::io::Read;
use std::io::stderr;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::Verbosity;
use clap_verbosity_flag::WarnLevel;
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::Config;
use codespan_reporting::term::emit;
use codespan_reporting::term::termcolor::ColorChoice;
use codespan_reporting::term::termcolor::StandardStream;
use colored::Colorize;
use tracing_log::AsTrace;

/// Exit code used when the source is clean (report mode) or a fix was
/// applied successfully (fix mode).
const EXIT_CLEAN: u8 = 0;
/// Exit code used when report mode finds one or more violations.
const EXIT_VIOLATIONS: u8 = 1;
/// Exit code used on I/O or parse failure.
const EXIT_ERROR: u8 = 2;

/// Reads source from the given path.
///
/// If the path is simply `-`, the source is read from STDIN.
fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read source from stdin")?;
        Ok(source)
    } else {
        Ok(fs::read_to_string(path).with_context(|| {
            format!("failed to read source file `{path}`", path = path.display())
        })?)
    }
}

/// Rewrites `path` with `contents` atomically: a temporary file is
/// written in the same directory and then renamed over the original,
/// so a reader never observes a partially-written file.
fn write_source_atomically(path: &Path, contents: &str) -> Result<()> {
    use std::io::Write;

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut temp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir),
        None => tempfile::NamedTempFile::new(),
    }
    .with_context(|| format!("failed to create a temporary file next to `{}`", path.display()))?;

    temp.write_all(contents.as_bytes())
        .with_context(|| format!("failed to write to a temporary file next to `{}`", path.display()))?;
    temp.persist(path)
        .with_context(|| format!("failed to replace `{}`", path.display()))?;

    Ok(())
}

/// Emits the given diagnostics to the output stream.
///
/// The use of color is determined by the presence of a terminal.
fn emit_diagnostics(path: &str, source: &str, diagnostics: &[cfmt::syntax::Diagnostic]) -> Result<()> {
    let file = SimpleFile::new(path, source);
    let mut stream = StandardStream::stdout(if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    });

    for diagnostic in diagnostics {
        emit(&mut stream, &Config::default(), &file, &diagnostic.to_codespan())
            .context("failed to emit diagnostic")?;
    }

    Ok(())
}

/// Checks (and, optionally, fixes) a source file against the style
/// rules.
#[derive(Args)]
#[clap(disable_version_flag = true)]
pub struct CheckCommand {
    /// The path to the source file, or `-` to read from stdin.
    #[clap(value_name = "PATH")]
    pub path: PathBuf,

    /// Rewrites the file in place instead of reporting violations.
    #[clap(long)]
    pub fix: bool,
}

impl CheckCommand {
    /// Executes the `check` subcommand.
    fn exec(self) -> Result<u8> {
        let source = match read_source(&self.path) {
            Ok(source) => source,
            Err(e) => {
                print_error(&e);
                return Ok(EXIT_ERROR);
            }
        };

        let display_path = self.path.to_string_lossy().into_owned();
        let result = cfmt::check::check(&source, self.fix);

        let has_parse_errors = result
            .diagnostics
            .iter()
            .any(|d| d.severity() == cfmt::syntax::Severity::Error);
        if has_parse_errors {
            emit_diagnostics(&display_path, &source, &result.diagnostics)?;
            return Ok(EXIT_ERROR);
        }

        if self.fix {
            if let Some(fixed) = &result.fixed {
                if self.path.as_os_str() == "-" {
                    print!("{fixed}");
                } else if let Err(e) = write_source_atomically(&self.path, fixed) {
                    print_error(&e);
                    return Ok(EXIT_ERROR);
                }
            }
            return Ok(EXIT_CLEAN);
        }

        if result.is_clean() {
            return Ok(EXIT_CLEAN);
        }

        emit_diagnostics(&display_path, &source, &result.diagnostics)?;
        Ok(EXIT_VIOLATIONS)
    }
}

/// Parses a source file and prints its abstract syntax tree.
#[derive(Args)]
#[clap(disable_version_flag = true)]
pub struct DumpAstCommand {
    /// The path to the source file, or `-` to read from stdin.
    #[clap(value_name = "PATH")]
    pub path: PathBuf,
}

impl DumpAstCommand {
    /// Executes the `dump-ast` subcommand.
    fn exec(self) -> Result<u8> {
        let source = read_source(&self.path)?;
        let (module, diagnostics) = cfmt::ast::parse(&source);
        if !diagnostics.is_empty() {
            emit_diagnostics(&self.path.to_string_lossy(), &source, &diagnostics)?;
            return Ok(EXIT_ERROR);
        }

        println!("{module:#?}");
        Ok(EXIT_CLEAN)
    }
}

/// Lexes a source file and prints its token stream, including
/// whitespace, comments, and preprocessor directives.
#[derive(Args)]
#[clap(disable_version_flag = true)]
pub struct DumpTokensCommand {
    /// The path to the source file, or `-` to read from stdin.
    #[clap(value_name = "PATH")]
    pub path: PathBuf,
}

impl DumpTokensCommand {
    /// Executes the `dump-tokens` subcommand.
    fn exec(self) -> Result<u8> {
        let source = read_source(&self.path)?;
        for token in cfmt::syntax::tokenize(&source) {
            println!("{:>5} {:?} {:?}", token.start, token.kind, token.text);
        }
        Ok(EXIT_CLEAN)
    }
}

/// A style checker and auto-formatter for a C-family language.
#[derive(Parser)]
#[clap(
    bin_name = "cfmt",
    version,
    propagate_version = true,
    arg_required_else_help = true
)]
struct App {
    /// The subcommand to use.
    #[command(subcommand)]
    command: Command,

    /// The verbosity flags.
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
enum Command {
    /// Checks (and optionally fixes) a source file.
    Check(CheckCommand),

    /// Prints the abstract syntax tree of a source file.
    DumpAst(DumpAstCommand),

    /// Prints the token stream of a source file.
    DumpTokens(DumpTokensCommand),
}

/// Prints `error` the way a user expects, respecting terminal color.
fn print_error(error: &anyhow::Error) {
    eprintln!(
        "{label}: {error:?}",
        label = if std::io::stderr().is_terminal() {
            "error".red().bold()
        } else {
            "error".normal()
        }
    );
}

fn main() -> ExitCode {
    let app = App::parse();

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(app.verbose.log_level_filter().as_trace())
        .with_writer(std::io::stderr)
        .with_ansi(stderr().is_terminal())
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: a global tracing subscriber was already installed");
    }

    let result = match app.command {
        Command::Check(cmd) => cmd.exec(),
        Command::DumpAst(cmd) => cmd.exec(),
        Command::DumpTokens(cmd) => cmd.exec(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            print_error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser as _;

    use super::*;

    #[test]
    fn parses_check_with_fix_flag() {
        let app = App::try_parse_from(["cfmt", "check", "--fix", "foo.c"]).unwrap();
        match app.command {
            Command::Check(cmd) => {
                assert!(cmd.fix);
                assert_eq!(cmd.path, PathBuf::from("foo.c"));
            }
            _ => panic!("expected a check subcommand"),
        }
    }

    #[test]
    fn parses_dump_tokens() {
        let app = App::try_parse_from(["cfmt", "dump-tokens", "foo.c"]).unwrap();
        assert!(matches!(app.command, Command::DumpTokens(_)));
    }

    #[test]
    fn write_source_atomically_replaces_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stale contents").unwrap();
        let path = file.path().to_path_buf();

        write_source_atomically(&path, "int x;\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "int x;\n");
    }

    #[test]
    fn check_command_exits_clean_on_compliant_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "int main(void)\n{{\n\treturn 0;\n}}\n").unwrap();

        let cmd = CheckCommand {
            path: file.path().to_path_buf(),
            fix: false,
        };
        assert_eq!(cmd.exec().unwrap(), EXIT_CLEAN);
    }

    #[test]
    fn check_command_exits_nonzero_on_violations() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "int x = 1+2;\n").unwrap();

        let cmd = CheckCommand {
            path: file.path().to_path_buf(),
            fix: false,
        };
        assert_eq!(cmd.exec().unwrap(), EXIT_VIOLATIONS);
    }
}
