use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use clap::Parser;
use treejson::FormatOptions;

#[derive(Parser, Debug)]
#[command(name = "treejson", version, about = "JSON validator and pretty-printer")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Emit compact output (no indentation, newlines or spaces).
    #[arg(short, long)]
    compact: bool,

    /// Indentation size in spaces (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Indent with a tab instead of spaces.
    #[arg(long)]
    tab: bool,

    /// Use \r\n line endings.
    #[arg(long)]
    crlf: bool,

    /// Validate only; print nothing on success.
    #[arg(long)]
    check: bool,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let input = read_input(args.input.as_deref())?;
    let root = treejson::from_str(&input)?;

    if args.check {
        return Ok(());
    }

    let mut rendered = treejson::to_string_with_options(&root, &format_options(&args));
    rendered.push('\n');
    write_output(args.output.as_deref(), &rendered)?;
    Ok(())
}

fn format_options(args: &Args) -> FormatOptions {
    if args.compact {
        return FormatOptions::default();
    }
    let indent = if args.tab {
        "\t".to_string()
    } else {
        " ".repeat(args.indent)
    };
    let newline = if args.crlf { "\r\n" } else { "\n" };
    FormatOptions::new()
        .with_indent(indent)
        .with_newline(newline)
        .with_space(" ")
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => fs::read_to_string(path),
    }
}

fn write_output(path: Option<&str>, contents: &str) -> io::Result<()> {
    match path {
        None => io::stdout().write_all(contents.as_bytes()),
        Some(path) => fs::write(path, contents),
    }
}
