use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, NamedSource};

#[derive(Parser)]
#[command(name = "g5", version, about = "Tokenize Go sources and read their package/import header")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one `<kind,lexeme,line,column>` record per token.
    Lex { file: PathBuf },
    /// Print the package name and the import table.
    Parse { file: PathBuf },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Lex { file } => lex(&file),
        Command::Parse { file } => parse(&file),
    }
}

fn lex(path: &Path) -> miette::Result<()> {
    let src = g5_front::read_source(path)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let dumped = g5_front::dump_tokens(&src, &mut out);
    // keep the records written before a failure
    out.flush().into_diagnostic()?;
    dumped.map_err(|e| miette::Report::new(e).with_source_code(named(path, &src)))
}

fn parse(path: &Path) -> miette::Result<()> {
    let src = g5_front::read_source(path)?;
    let header = g5_front::parse_source(&src)
        .map_err(|e| miette::Report::new(e).with_source_code(named(path, &src)))?;

    println!("package {}", header.package);
    for (import_path, alias) in header.imports.iter() {
        if alias.is_empty() {
            println!("import {import_path:?}");
        } else {
            println!("import {alias} {import_path:?}");
        }
    }
    Ok(())
}

fn named(path: &Path, src: &str) -> NamedSource<String> {
    NamedSource::new(path.display().to_string(), src.to_owned())
}
