//! clox CLI - Command line interface
//!
//! `clox` starts a REPL, `clox <path>` runs a script.

use clap::Parser;
use clox_config::{LogFormat, LogLevel};
use clox_core::{InterpretResult, Scanner, Vm};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};

mod config;
mod error;
mod logging;
mod platform;

use crate::config::{parse_log_format, parse_log_level, Overrides};
use crate::error::CliError;
use crate::logging::CLI_TARGET;
use crate::platform::print_error;

#[derive(Parser, Debug)]
#[command(
    name = "clox",
    about = "clox bytecode interpreter - REPL and script runner",
    version
)]
struct Cli {
    /// Script to run; starts a REPL when omitted
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Global log level: silent, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Log output format: pretty, compact, json
    #[arg(long, value_name = "FORMAT", value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    /// Trace every executed instruction
    #[arg(long)]
    trace: bool,

    /// Print the token stream before interpreting
    #[arg(long)]
    dump_tokens: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(error::exit_code::USAGE);
        }
        Err(e) => {
            // --help / --version
            let _ = e.print();
            process::exit(0);
        }
    };

    if let Err(e) = run(cli) {
        print_error(&e, None);
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let overrides = Overrides {
        log_level: cli.log_level,
        log_format: cli.log_format,
        trace: cli.trace,
    };
    let config = config::resolve(cli.config.as_deref(), &overrides)?;
    logging::init(&config.logging)?;
    debug!(target: CLI_TARGET, ?config, "configuration resolved");

    let mut vm = Vm::with_config(config.vm);
    match cli.path {
        Some(path) => run_file(&mut vm, &path, cli.dump_tokens),
        None => repl(&mut vm, cli.dump_tokens),
    }
}

/// 逐行读取并解释，输入结束时退出
fn repl(vm: &mut Vm, dump_tokens: bool) -> Result<(), CliError> {
    info!(target: CLI_TARGET, "starting REPL");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(CliError::Stdout)?;

        line.clear();
        if input.read_line(&mut line).map_err(CliError::Stdin)? == 0 {
            println!();
            return Ok(());
        }

        let source = strip_line_ending(&line);
        // REPL 中的错误只报告，不退出
        if let Err(e) = execute(vm, source, dump_tokens) {
            print_error(&e, Some(source));
        }
    }
}

/// 解释整个文件；出错时按错误类型退出
fn run_file(vm: &mut Vm, path: &Path, dump_tokens: bool) -> Result<(), CliError> {
    info!(target: CLI_TARGET, "running {}", path.display());
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(e) = execute(vm, &source, dump_tokens) {
        print_error(&e, Some(&source));
        process::exit(e.exit_code());
    }
    Ok(())
}

fn execute(vm: &mut Vm, source: &str, dump_tokens: bool) -> Result<(), CliError> {
    if dump_tokens {
        for token in Scanner::new(source) {
            println!("{token}");
        }
    }

    match vm.interpret(source) {
        InterpretResult::Ok => Ok(()),
        InterpretResult::CompileError(e) => Err(e.into()),
        InterpretResult::RuntimeError(e) => Err(e.into()),
    }
}

/// 去掉行尾的 `\n` 或 `\r\n`
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
