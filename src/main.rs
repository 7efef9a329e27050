#![allow(clippy::print_stderr)]
#![allow(clippy::implicit_return)]
#![allow(clippy::absolute_paths)]
#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::exhaustive_structs)]
#![allow(clippy::question_mark_used)]
#![allow(clippy::std_instead_of_core)]
#![allow(clippy::single_call_fn)]
#![allow(clippy::exit)]

use clap::{ArgAction, CommandFactory, Parser, ValueHint, value_parser};
use clap_complete::aot::{Shell, generate};
use listdir::{Backend, EntryName, FsEncoding, Lister};
use std::ffi::OsString;
use std::io::{self, BufWriter, Write, stdout};
use std::process::ExitCode;

//this allocator is more efficient than jemalloc through my testing
#[cfg(all(
    feature = "mimalloc",
    any(target_os = "linux", target_os = "macos", target_os = "android")
))]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

const DEFAULT_PATH: &str = ".";

#[derive(Parser)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = "List directory entries in the order the filesystem returns them"
)]
///generate our arguments and parse them.
pub struct Args {
    #[arg(
        value_name = "PATH",
        help = format!("Directories to list (defaults to {DEFAULT_PATH})"),
        value_hint = ValueHint::DirPath,
    )]
    paths: Vec<OsString>,

    #[arg(
        short = 'b',
        long = "bytes",
        default_value_t = false,
        help = "Print names as raw bytes, never decode them"
    )]
    bytes: bool,

    #[arg(
        short = 'e',
        long = "encoding",
        default_value_t = FsEncoding::Utf8,
        value_parser = value_parser!(FsEncoding),
        help = "Encoding used to decode names: utf-8, ascii or latin-1"
    )]
    encoding: FsEncoding,

    #[arg(
        long = "backend",
        default_value_t = Backend::ReadDir,
        value_parser = value_parser!(Backend),
        help = "How the directory is read: readdir, or getdents on Linux"
    )]
    backend: Backend,

    #[arg(
        short = '0',
        long = "print0",
        default_value_t = false,
        help = "Separate names with NUL instead of newline"
    )]
    print0: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help = "Log to stderr, repeat for more detail"
    )]
    verbose: u8,

    #[arg(
        long = "generate",
        action = ArgAction::Set,
        value_parser = value_parser!(Shell),
        help = "Generate shell completions"
    )]
    generate: Option<Shell>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(log_level(args.verbose))
        .init();

    if let Some(generator) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_owned();
        generate(generator, &mut cmd, name, &mut stdout());
        return ExitCode::SUCCESS;
    }

    let lister = Lister::new()
        .encoding(args.encoding)
        .backend(args.backend)
        .text(Some(!args.bytes));

    let paths = if args.paths.is_empty() {
        vec![OsString::from(DEFAULT_PATH)]
    } else {
        args.paths
    };

    let separator = if args.print0 { b'\0' } else { b'\n' };
    let show_headers = paths.len() > 1;
    let mut failed = false;
    let mut out = BufWriter::new(stdout().lock());

    for (index, path) in paths.iter().enumerate() {
        let names = match lister.list(path) {
            Ok(names) => names,
            Err(e) => {
                // flush what we have so stdout and stderr interleave sensibly
                let _ = out.flush();
                eprintln!("listdir: {e}");
                failed = true;
                continue;
            }
        };

        let written = write_listing(
            &mut out,
            show_headers.then_some((path, index == 0)),
            &names,
            separator,
        );

        if let Err(e) = written {
            //the only error that should happen here is a closed pipe, eg `listdir | head`
            if e.kind() == io::ErrorKind::BrokenPipe {
                return ExitCode::SUCCESS;
            }
            eprintln!("listdir: {e}");
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = out.flush()
        && e.kind() != io::ErrorKind::BrokenPipe
    {
        eprintln!("listdir: {e}");
        return ExitCode::FAILURE;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Maps the number of `-v` flags onto a log level, warnings are always shown
const fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Writes one listing, preceded by `PATH:` like `ls` does when several paths are given
fn write_listing<W: Write>(
    out: &mut W,
    header: Option<(&OsString, bool)>,
    names: &[EntryName],
    separator: u8,
) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt as _;

    if let Some((path, first)) = header {
        if !first {
            out.write_all(b"\n")?;
        }
        out.write_all(path.as_bytes())?;
        out.write_all(b":\n")?;
    }

    for name in names {
        out.write_all(name.as_bytes())?;
        out.write_all(&[separator])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_log_level() {
        assert_eq!(log_level(0), log::LevelFilter::Warn);
        assert_eq!(log_level(1), log::LevelFilter::Info);
        assert_eq!(log_level(2), log::LevelFilter::Debug);
        assert_eq!(log_level(9), log::LevelFilter::Trace);
    }

    #[test]
    fn headers_separate_listings() {
        let names = [EntryName::Text("a".into()), EntryName::Bytes(b"b".to_vec())];
        let first = OsString::from("/x");
        let second = OsString::from("/y");

        let mut out = Vec::new();
        write_listing(&mut out, Some((&first, true)), &names, b'\n').unwrap();
        write_listing(&mut out, Some((&second, false)), &names, b'\0').unwrap();
        assert_eq!(out, b"/x:\na\nb\n\n/y:\na\0b\0");
    }
}
