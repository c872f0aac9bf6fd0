use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::LevelFilter;

use jstub::logging::SimpleLogger;
use jstub::parser::parse_class_file;
use jstub::stub::ClassStub;

/// Generate a Python type stub from a compiled JVM class file.
#[derive(Parser)]
#[command(name = "jstub", version)]
struct Args {
    /// Path to the .class file to stub.
    class_file: PathBuf,

    /// Increase log verbosity (-v: info, -vv: debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<(), String> {
    let bytes = std::fs::read(&args.class_file)
        .map_err(|e| format!("cannot read {}: {}", args.class_file.display(), e))?;
    let class = parse_class_file(&bytes).map_err(|e| e.to_string())?;
    let stub = ClassStub::from_class_file(&class).map_err(|e| e.to_string())?;
    let stdout = std::io::stdout();
    let mut sink = stdout.lock();
    stub.write_to(&mut sink).and_then(|()| sink.flush().map_err(Into::into))
        .map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = SimpleLogger::init(level);
    if let Err(message) = run(&args) {
        eprintln!("jstub: {}", message);
        process::exit(1);
    }
}
