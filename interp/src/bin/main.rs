use std::process;

use subscheme::options::{Options, USAGE};
use subscheme::repl::{run_files, run_repl};

fn main() {
    env_logger::init();

    let options = match Options::from_env() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if options.help {
        println!("{USAGE}");
        return;
    }

    if options.files.is_empty() {
        if let Err(e) = run_repl(&options) {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    } else {
        match run_files(&options.files) {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {}
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    }
}
