mod dto;
mod edo;
mod error;
mod spell;

use std::{
    fmt::{self, Debug, Display},
    fs::File,
    io::{self, Read, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use edo::{KeyOptions, OptionsOptions};
use edo31::settings::SettingsImportError;
use spell::SpellOptions;

#[derive(Parser)]
#[command(name = "edo31", version, about)]
struct MainOptions {
    /// Write output to a file instead of stdout
    #[arg(long = "of")]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: MainCommand,
}

#[derive(Subcommand)]
enum MainCommand {
    /// Print the step sizes and the spelling options of every 31-EDO step
    #[command(name = "info")]
    Info,

    /// Print the spelling options of a single step, simplest first
    #[command(name = "options")]
    Options(OptionsOptions),

    /// Parse a custom key signature, e.g. "#.#....."
    #[command(name = "key")]
    Key(KeyOptions),

    /// Spell the notes of a YAML score
    #[command(name = "spell")]
    Spell(SpellOptions),
}

impl MainOptions {
    fn run(self) -> CliResult<()> {
        let stdin = io::stdin();
        let input = Box::new(stdin.lock());

        let stdout = io::stdout();
        let output: Box<dyn Write> = match self.output_file {
            Some(output_file) => Box::new(File::create(output_file)?),
            None => Box::new(stdout.lock()),
        };

        let stderr = io::stderr();
        let error = Box::new(stderr.lock());

        let mut app = App {
            input,
            output,
            error,
        };

        self.command.run(&mut app)
    }
}

impl MainCommand {
    fn run(self, app: &mut App) -> CliResult<()> {
        match self {
            MainCommand::Info => edo::print_info(&mut app.output)?,
            MainCommand::Options(options) => options.run(app)?,
            MainCommand::Key(options) => options.run(app)?,
            MainCommand::Spell(options) => options.run(app)?,
        }
        Ok(())
    }
}

pub fn run_in_shell_env(args: impl IntoIterator<Item = String>) -> CliResult<()> {
    let options = match MainOptions::try_parse_from(args) {
        Err(err) => {
            return if err.use_stderr() {
                Err(CliError::CommandError(err.to_string()))
            } else {
                print!("{err}");
                Ok(())
            };
        }
        Ok(options) => options,
    };

    options.run()
}

struct App<'a> {
    input: Box<dyn 'a + Read>,
    output: Box<dyn 'a + Write>,
    error: Box<dyn 'a + Write>,
}

impl App<'_> {
    pub fn writeln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.output, "{message}")
    }

    pub fn errln(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(&mut self.error, "{message}")
    }

    pub fn read(&mut self) -> &mut dyn Read {
        &mut self.input
    }
}

pub type CliResult<T> = Result<T, CliError>;

pub enum CliError {
    IoError(io::Error),
    CommandError(String),
}

impl Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(err) => write!(f, "IO error / {err}"),
            CliError::CommandError(err) => write!(f, "The command failed / {err}"),
        }
    }
}

impl From<String> for CliError {
    fn from(v: String) -> Self {
        CliError::CommandError(v)
    }
}

impl From<SettingsImportError> for CliError {
    fn from(v: SettingsImportError) -> Self {
        CliError::CommandError(format!("Could not load glyph settings ({v})"))
    }
}

impl From<io::Error> for CliError {
    fn from(v: io::Error) -> Self {
        CliError::IoError(v)
    }
}
