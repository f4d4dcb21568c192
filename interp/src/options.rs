use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  subscheme [options]             Start interactive REPL
  subscheme [options] <file>...   Evaluate files in one global environment

Options:
  -h, --help          Show this help message
  --prompt <text>     Prompt shown for a new expression (default: \"* \")
  --history <file>    History file (default: ~/.subscheme_history)
  --no-history        Do not load or save REPL history

Set RUST_LOG=subscheme=debug to trace definitions and errors.";

pub const DEFAULT_PROMPT: &str = "* ";
pub const CONTINUATION_PROMPT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub help: bool,
    pub prompt: String,
    /// None when history is disabled or no home directory is known
    pub history: Option<PathBuf>,
    pub files: Vec<PathBuf>,
}

impl Options {
    pub fn from_env() -> Result<Self, pico_args::Error> {
        Self::from_args(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self, pico_args::Error> {
        Self::from_args(pico_args::Arguments::from_vec(args))
    }

    fn from_args(mut args: pico_args::Arguments) -> Result<Self, pico_args::Error> {
        let help = args.contains(["-h", "--help"]);
        let no_history = args.contains("--no-history");
        let history_file: Option<PathBuf> = args.opt_value_from_str("--history")?;
        let prompt: Option<String> = args.opt_value_from_str("--prompt")?;

        let mut files = Vec::new();
        for arg in args.finish() {
            let path = PathBuf::from(arg);
            if path.to_string_lossy().starts_with('-') {
                return Err(pico_args::Error::ArgumentParsingFailed {
                    cause: format!("unknown option '{}'", path.display()),
                });
            }
            files.push(path);
        }

        let history = if no_history {
            None
        } else {
            history_file.or_else(default_history_path)
        };

        Ok(Options {
            help,
            prompt: prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            history,
            files,
        })
    }
}

fn default_history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".subscheme_history"))
}
