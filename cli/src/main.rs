use arith::{
    Backend, Code, CompilationOptions, Engine, ErrorReport, Expression,
    compiler::BytecodeCompiler, render_error, samples,
};
use bumpalo::Bump;
use clap::{Parser, ValueEnum};
use miette::Result;

/// Arith - compile arithmetic expression trees and run them
#[derive(Parser, Debug)]
#[command(name = "arith")]
#[command(about = "Render, compile and evaluate sample arithmetic expressions", long_about = None)]
struct Args {
    /// Sample expression to use (see --list)
    #[arg(long, default_value = "canonical")]
    sample: String,

    /// Backend(s) that run the compiled function
    #[arg(long, value_enum, default_value_t = BackendChoice::All)]
    backend: BackendChoice,

    /// What to print before the results
    #[arg(long, value_enum, default_value_t = Show::All)]
    show: Show,

    /// List the available samples and exit
    #[arg(long)]
    list: bool,

    /// Arguments, in parameter order (defaults to the sample's own)
    #[arg(allow_negative_numbers = true)]
    args: Vec<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    Interpreter,
    Native,
    All,
}

impl BackendChoice {
    fn backends(self) -> Vec<Backend> {
        match self {
            BackendChoice::Interpreter => vec![Backend::Interpreter],
            BackendChoice::Native => vec![Backend::Native],
            BackendChoice::All => [Backend::Interpreter, Backend::Native]
                .into_iter()
                .filter(|backend| backend.is_available())
                .collect(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Show {
    Prefix,
    Bytecode,
    All,
    None,
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
enum CliError {
    #[error("unknown sample `{0}`")]
    #[diagnostic(code(arith::cli::unknown_sample), help("run with --list to see the samples"))]
    UnknownSample(String),
}

fn print_listing(code: &Code) {
    let depths = code.stack_depths();
    for (addr, (instruction, depth)) in code.instructions().iter().zip(depths).enumerate() {
        println!("  {addr:4}  {:<12} ; depth {depth}", instruction.to_string());
    }
}

fn show(expr: &Expression<'_>, show: Show) -> Result<()> {
    if matches!(show, Show::Prefix | Show::All) {
        println!("prefix:   {expr}");
    }
    if matches!(show, Show::Bytecode | Show::All) {
        let code = BytecodeCompiler::compile(expr).map_err(ErrorReport::from)?;
        println!(
            "bytecode: {} instructions, max stack {}",
            code.len(),
            code.max_stack_size()
        );
        print_listing(&code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if args.list {
        for sample in samples::SAMPLES {
            println!(
                "{:<10} {}  ({})",
                sample.name,
                sample.infix,
                sample.params.join(", ")
            );
        }
        return Ok(());
    }

    let sample =
        samples::find(&args.sample).ok_or_else(|| CliError::UnknownSample(args.sample.clone()))?;
    let arena = Bump::new();
    let expr = sample.expression(&arena).map_err(ErrorReport::from)?;

    println!("sample:   {} = {}", sample.name, sample.infix);
    show(&expr, args.show)?;

    let call_args: &[f64] = if args.args.is_empty() {
        sample.default_args
    } else {
        &args.args
    };
    let bindings: Vec<String> = expr
        .params()
        .iter()
        .zip(call_args)
        .map(|(name, value)| format!("{name} = {value}"))
        .collect();
    println!("args:     {}", bindings.join(", "));

    let engine = Engine::default();
    let mut failed = false;
    for backend in args.backend.backends() {
        let result = engine
            .compile_with(&expr, &CompilationOptions { backend })
            .and_then(|function| function.call(call_args));
        match result {
            Ok(value) => println!("{:<12} {value}", format!("{backend}:")),
            Err(e) => {
                tracing::debug!(%backend, error = %e, "backend failed");
                render_error(&e);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
