//! Command implementations for the CLI tool.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use jndi_strip::gate::{AlwaysNo, AlwaysYes, Confirm, Scripted};
use jndi_strip::{BatchDriver, InputReference, LogContext, RemoveOptions};

use crate::exit_codes::{ExitCode, error_to_exit_code, records_to_exit_code, scan_to_exit_code};
use crate::input::collect_inputs;
use crate::output::create_formatter;
use crate::prompt::TerminalGate;
use crate::{ConfirmMode, OutputFormat};

/// Name recorded at the top of every run in the audit log.
const OPERATION: &str = jndi_strip::audit::DEFAULT_OPERATION;

/// Configuration for the remove command.
pub struct RemoveConfig<'a> {
    pub paths: &'a [PathBuf],
    pub read_stdin: bool,
    pub confirm: ConfirmMode,
    pub options: RemoveOptions,
    pub log_file: &'a Path,
    pub format: OutputFormat,
}

/// Configuration for the scan command.
pub struct ScanConfig<'a> {
    pub paths: &'a [PathBuf],
    pub read_stdin: bool,
    pub options: RemoveOptions,
    pub log_file: &'a Path,
    pub format: OutputFormat,
}

/// Remove command implementation
pub fn remove(config: &RemoveConfig<'_>) -> ExitCode {
    let formatter = create_formatter(config.format);

    let inputs = match read_inputs(config.paths, config.read_stdin) {
        Ok(inputs) => inputs,
        Err(code) => return code,
    };

    let gate: Box<dyn Confirm> = match &config.confirm {
        ConfirmMode::Yes => Box::new(AlwaysYes),
        ConfirmMode::No => Box::new(AlwaysNo),
        ConfirmMode::Scripted(answers) => Box::new(Scripted::new(answers.iter().copied())),
        ConfirmMode::Interactive => {
            if !TerminalGate::is_available() {
                eprintln!("Error: No terminal to confirm removals; pass --yes, --no or --answers");
                return ExitCode::BadArgs;
            }
            Box::new(TerminalGate::new())
        }
    };

    let log = LogContext::create(config.log_file, OPERATION);
    let mut driver = BatchDriver::new(config.options.clone(), log, gate);

    let records = match driver.run(inputs) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: {}", e);
            return error_to_exit_code(&e);
        }
    };

    print!("{}", formatter.format_records(&records));
    records_to_exit_code(&records)
}

/// Scan command implementation
pub fn scan(config: &ScanConfig<'_>) -> ExitCode {
    let formatter = create_formatter(config.format);

    let inputs = match read_inputs(config.paths, config.read_stdin) {
        Ok(inputs) => inputs,
        Err(code) => return code,
    };

    let log = LogContext::create(config.log_file, OPERATION);
    let driver = BatchDriver::new(config.options.clone(), log, AlwaysNo);

    let records = match driver.scan(inputs) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: {}", e);
            return error_to_exit_code(&e);
        }
    };

    print!("{}", formatter.format_scan(&records));
    scan_to_exit_code(&records)
}

/// Gathers inputs from arguments and, if requested, standard input.
fn read_inputs(paths: &[PathBuf], read_stdin: bool) -> Result<Vec<InputReference>, ExitCode> {
    let stdin = std::io::stdin();
    let mut lock = stdin.lock();
    let reader: Option<&mut dyn BufRead> = if read_stdin { Some(&mut lock) } else { None };

    let inputs = collect_inputs(paths, reader).map_err(|e| {
        eprintln!("Error reading standard input: {}", e);
        ExitCode::IoError
    })?;

    if inputs.is_empty() {
        eprintln!("Error: No archives given");
        return Err(ExitCode::BadArgs);
    }
    Ok(inputs)
}
