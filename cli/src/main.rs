//! file: cli/src/main.rs
//! description: command-line interface for the Vypr compiler.
//!
//! This binary wires the `vypr_core` stages together: it loads a `.vy`
//! source file, runs lexing, parsing, semantic analysis, IR lowering and
//! Python emission, writes the generated script plus a batch wrapper, and
//! (outside verbose mode) launches the result through the host interpreter.

use clap::{Arg, ArgAction, Command};
use console::style;
use log::{error, info, warn, Level};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use vypr_core::analyzers::Analyzer;
use vypr_core::{ast, emit, ir, lexer, Script};

mod output;

fn main() {
    // Human-friendly single-line log format with colored level tags.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let lvl = match record.level() {
                Level::Error => style("error").red().bold(),
                Level::Warn => style("warn").yellow().bold(),
                Level::Info => style("info").green().bold(),
                Level::Debug => style("debug").cyan(),
                Level::Trace => style("trace").magenta(),
            };
            writeln!(buf, "{}: {}", lvl, record.args())
        })
        .init();

    let matches = Command::new("Vypr")
        .version("0.1.0")
        .about("Translates Vypr (.vy) source files to Python")
        .arg(
            Arg::new("file")
                .help("The Vypr source file to compile")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .help("Show compilation progress and per-stage diagnostics")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .help("Output basename (defaults to the source file without extension)")
                .short('o')
                .long("output")
                .value_name("BASENAME"),
        )
        .arg(
            Arg::new("dump")
                .help("Write a dump of the given stage: tokens, ast or ir")
                .short('d')
                .long("dump")
                .value_name("STAGE"),
        )
        .get_matches();

    let file = matches
        .get_one::<String>("file")
        .expect("required argument");
    let verbose = matches.get_flag("verbose");
    let output = matches.get_one::<String>("output").cloned();
    let dump = matches.get_one::<String>("dump").cloned();

    process::exit(run(file, verbose, output, dump));
}

fn run(file: &str, verbose: bool, output: Option<String>, dump: Option<String>) -> i32 {
    let source_path = Path::new(file);
    if source_path.extension().map(|e| e.to_string_lossy().to_string()) != Some("vy".to_string()) {
        error!("Source file must have .vy extension");
        return 1;
    }

    let script = match Script::new(source_path.to_path_buf()) {
        Ok(script) => script,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    // Default output basename: the source path without its extension.
    let basename = output.unwrap_or_else(|| {
        source_path
            .with_extension("")
            .to_string_lossy()
            .to_string()
    });

    // Lexical analysis
    let tokens = match lexer::Lexer::new(&script).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    if verbose {
        output::stage("Lexical Analysis");
        print!("{}", output::render_tokens(&tokens));
    }

    // Syntax analysis
    let program = match ast::parse_tokens(tokens.clone(), &script) {
        Ok(program) => program,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    if verbose {
        output::stage("Syntax Analysis");
        print!("{}", output::render_ast(&program));
    }

    // Semantic analysis
    let mut analyzer = Analyzer::new();
    if let Err(e) = analyzer.analyze(&program) {
        error!("{}", e);
        return 1;
    }
    if verbose {
        output::stage("Semantic Analysis");
        print!("{}", analyzer.symbol_table_dump());
    }

    // IR generation
    let functions = ir::lower_program(&program);
    if verbose {
        output::stage("Intermediate Representation");
        print!("{}", output::render_ir(&functions));
    }

    // Optional stage dump
    if let Some(stage) = dump.as_deref() {
        let dumped = match stage {
            "tokens" => std::fs::write("dumped_tokens.txt", output::render_tokens(&tokens)),
            "ast" => std::fs::write("dumped_ast.txt", output::render_ast(&program)),
            "ir" => std::fs::write("dumped_ir.txt", output::render_ir(&functions)),
            _ => {
                error!("Unknown dump stage: {}", stage);
                return 1;
            }
        };
        if let Err(e) = dumped {
            error!("Failed to write dump file: {}", e);
            return 1;
        }
    }

    // Code generation
    if verbose {
        output::stage("Code Generation");
    }
    let python = match emit::emit_python(&functions) {
        Ok(python) => python,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let py_file = format!("{}.py", basename);
    let bat_file = format!("{}.bat", basename);

    if let Err(e) = std::fs::write(&py_file, &python) {
        error!("Could not write output file {}: {}", py_file, e);
        return 1;
    }
    if let Err(e) = std::fs::write(&bat_file, wrapper_script(&py_file)) {
        error!("Could not write wrapper file {}: {}", bat_file, e);
        return 1;
    }
    info!("Generated {} and {}", py_file, bat_file);

    if verbose {
        println!("\nVerbose mode: Skipping automatic execution.");
        return 0;
    }

    output::success("Compilation successful!");
    println!("Output files:");
    println!("  - {}", py_file);
    println!("  - {}", bat_file);

    println!("\nAttempting to run generated Python script...");
    output::program_output_start();
    let status = run_generated(&py_file);
    output::program_output_end();

    match status {
        Some(code) if code != 0 => {
            warn!(
                "Python script execution might have failed (return code: {}). Ensure 'python' is in your PATH.",
                code
            );
        }
        Some(_) => {}
        None => {
            warn!("Could not launch a Python interpreter. Ensure 'python3' or 'python' is in your PATH.");
        }
    }

    0
}

/// One-line wrapper invoking the host interpreter on the generated script,
/// resolved to an absolute path so the wrapper works from any directory.
fn wrapper_script(py_file: &str) -> String {
    let absolute = std::fs::canonicalize(py_file)
        .unwrap_or_else(|_| PathBuf::from(py_file));
    format!("@echo off\npython \"{}\" %*\n", absolute.display())
}

/// Run the generated script, preferring `python3` and falling back to
/// `python`. Returns the interpreter's exit code, or None if no interpreter
/// could be started.
fn run_generated(py_file: &str) -> Option<i32> {
    for interpreter in ["python3", "python"] {
        match process::Command::new(interpreter).arg(py_file).status() {
            Ok(status) => return Some(status.code().unwrap_or(-1)),
            Err(_) => continue,
        }
    }
    None
}
