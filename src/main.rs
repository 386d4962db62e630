use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use log::{error, info};
use scopecheck::{
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::{lenient_check, type_check},
};

#[derive(Parser, Debug)]
#[command(name = "scopecheck", version, about = "Scope and type analysis for .lang programs")]
struct Cli {
    /// Source file to analyse
    input: PathBuf,

    /// Stop after the lenient pass
    #[arg(long)]
    lenient_only: bool,

    /// Print the resulting scope tree
    #[arg(long)]
    scopes: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let env = env_logger::Env::default().filter_or(
        "SCOPECHECK_LOG",
        if verbose {
            "debug"
        } else if quiet {
            "error"
        } else {
            "info"
        },
    );

    env_logger::Builder::from_env(env)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_module_path(verbose)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.to_string_lossy().into_owned());

    let source = match read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            error!("failed to read {}: {}", cli.input.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(err) => {
            display_error(&err, &source, &cli.input);
            return ExitCode::FAILURE;
        }
    };

    info!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let mut ast = match parse(tokens, Rc::new(file_name)) {
        Ok(ast) => ast,
        Err(err) => {
            display_error(&err, &source, &cli.input);
            return ExitCode::FAILURE;
        }
    };

    info!("Parsed in {:?}", parse_start.elapsed());

    let check_start = Instant::now();
    let scopes = if cli.lenient_only {
        lenient_check(&mut ast)
    } else {
        type_check(&mut ast).map(|analysis| analysis.scopes)
    };

    let scopes = match scopes {
        Ok(scopes) => scopes,
        Err(err) => {
            display_error(&err, &source, &cli.input);
            return ExitCode::FAILURE;
        }
    };

    info!("Type checked in {:?}", check_start.elapsed());

    if cli.scopes {
        print!("{}", scopes);
    }

    info!("Total time: {:?}", start.elapsed());
    ExitCode::SUCCESS
}
