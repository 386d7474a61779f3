//! Run command - evaluate configuration text and write the bindings

use crate::config::{self, Effective, Overrides};
use anyhow::{Context, Result};
use quill_runtime::{render, Diagnostic, Quill};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

/// Hint printed before reading an interactive stdin
pub const INPUT_HINT: &str = "Enter configuration. Finish with Ctrl+D (Ctrl+Z on Windows).";

/// Arguments for a single run
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub output: PathBuf,
    pub input: Option<PathBuf>,
    pub format: Option<quill_runtime::OutputFormat>,
    pub sort_keys: bool,
    pub no_prompt: bool,
    pub config: Option<PathBuf>,
    pub json: bool,
}

/// Evaluate the input and write the result to `args.output`
///
/// Nothing is written when evaluation fails.
pub fn run(args: RunArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config = config::load(args.config.as_deref(), &cwd)?;
    let effective = Effective::resolve(
        &config,
        Overrides {
            format: args.format,
            sort_keys: args.sort_keys,
            no_prompt: args.no_prompt,
        },
        &args.output,
    );

    let quill = Quill::new().with_input_name("<stdin>");
    let result = match &args.input {
        Some(path) => quill.process_file(path),
        None => quill.process(&read_stdin(effective.prompt)?),
    };

    for warning in quill.take_warnings() {
        print_diagnostic(&warning, args.json);
    }
    let bindings = match result {
        Ok(bindings) => bindings,
        Err(diag) => {
            print_diagnostic(&diag, args.json);
            return Err(anyhow::anyhow!("Failed to evaluate configuration"));
        }
    };

    let document = render(&bindings, &effective.output)
        .with_context(|| format!("Failed to serialize as {}", effective.output.format))?;
    fs::write(&args.output, document)
        .with_context(|| format!("Failed to write output file: {}", args.output.display()))?;

    println!("Result written to file: {}", args.output.display());
    Ok(())
}

fn read_stdin(prompt: bool) -> Result<String> {
    let mut stdin = io::stdin();
    if prompt && stdin.is_terminal() {
        eprintln!("{}", INPUT_HINT);
    }
    let mut source = String::new();
    stdin
        .read_to_string(&mut source)
        .context("Failed to read standard input")?;
    Ok(source)
}

fn print_diagnostic(diag: &Diagnostic, json: bool) {
    if json {
        match diag.to_json_string() {
            Ok(text) => eprintln!("{}", text),
            Err(_) => eprintln!("{}", diag),
        }
    } else {
        eprint!("{}", diag.to_human_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn args(input: PathBuf, output: PathBuf) -> RunArgs {
        RunArgs {
            output,
            input: Some(input),
            format: Some(quill_runtime::OutputFormat::Json),
            sort_keys: false,
            no_prompt: true,
            config: None,
            json: false,
        }
    }

    #[test]
    fn test_run_writes_output() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "global x = 5\ny = ?{{+ x 2}}").unwrap();
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.json");

        run(args(input.path().to_path_buf(), out.clone())).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written, "{\n  \"x\": 5,\n  \"y\": 7\n}\n");
    }

    #[test]
    fn test_run_failure_writes_nothing() {
        let mut input = NamedTempFile::new().unwrap();
        writeln!(input, "x = 1\nno separator here").unwrap();
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.json");

        assert!(run(args(input.path().to_path_buf(), out.clone())).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_run_missing_input() {
        let dir = TempDir::new().unwrap();
        let result = run(args(dir.path().join("absent.quill"), dir.path().join("out")));
        assert!(result.is_err());
    }
}
