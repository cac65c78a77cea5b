use std::process::ExitCode;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::{self, OutputFormat, TerminalPresenter};
use crate::runner::{self, Options, Runner, RunnerError};
use crate::session::Session;
use crate::view::Presenter;

fn print_banner() {
    const BANNER: &str = r#"
                __             __
    ____  ____ / /_____  ____/ /__  _  __
   / __ \/ __ \/ //_/ _ \/ __  / _ \| |/_/
  / /_/ / /_/ / ,< /  __/ /_/ /  __/>  <
 / .___/\____/_/|_|\___/\__,_/\___/_/|_|
/_/
       the first-generation catalog in your terminal
    "#;
    print!("{}", BANNER);
    println!();
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

#[derive(Clone, Debug)]
struct RunConfig {
    options: Options,
    workers: usize,
    verbose: u8,
    // Some(true) forces colors on, Some(false) off, None leaves the tty check
    color: Option<bool>,
    output: Option<String>,
    output_format: OutputFormat,
    filter: Option<String>,
    select: Option<u32>,
    once: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let color = if args.color {
        Some(true)
    } else if args.no_color || cfg.no_color.unwrap_or(false) {
        Some(false)
    } else {
        None
    };

    let options = Options {
        api_url: args
            .api_url
            .or(cfg.api_url)
            .unwrap_or_else(|| Options::default().api_url),
        count: args.count.or(cfg.count).unwrap_or(runner::DEFAULT_COUNT),
        timeout_seconds: args.timeout.or(cfg.timeout).unwrap_or(0),
        proxy: args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty()),
        user_agent: args
            .user_agent
            .or(cfg.user_agent)
            .unwrap_or_else(|| runner::DEFAULT_USER_AGENT.to_string()),
    };
    let workers = args.workers.or(cfg.workers).unwrap_or(4);
    if workers == 0 {
        return Err("invalid workers, expected positive integer".to_string());
    }

    let output = args.output.or(cfg.output).filter(|p| !p.trim().is_empty());
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text or json"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    Ok(RunConfig {
        options,
        workers,
        verbose: args.verbose,
        color,
        output,
        output_format,
        filter: args.filter,
        select: args.select,
        once: args.once,
    })
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pokedex={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SessionCommand {
    Filter(String),
    Select(u32),
    List,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> SessionCommand {
    let Some(rest) = line.strip_prefix(':') else {
        return SessionCommand::Filter(line.to_string());
    };
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("q" | "quit"), None, None) => SessionCommand::Quit,
        (Some("l" | "list"), None, None) => SessionCommand::List,
        (Some("s" | "select"), Some(id), None) => match id.parse::<u32>() {
            Ok(id) => SessionCommand::Select(id),
            Err(_) => SessionCommand::Unknown(line.to_string()),
        },
        _ => SessionCommand::Unknown(line.to_string()),
    }
}

fn select_or_report<P: Presenter>(session: &mut Session, id: u32, presenter: &mut P) {
    if session.select_id(id, presenter).is_none() {
        println!("{} no entry #{}", "::".bold().white(), id.to_string().red());
    }
}

async fn export_index(session: &Session, path: &str, format: OutputFormat) -> Result<(), String> {
    let path = config::expand_tilde(path);
    tokio::fs::write(&path, output::render(session.index(), format))
        .await
        .map_err(|e| format!("failed to write output '{}': {e}", path.display()))
}

async fn run_async(run: RunConfig) -> Result<ExitCode, String> {
    if let Some(enabled) = run.color {
        colored::control::set_override(enabled);
    }
    print_banner();

    let runner = Runner::new(run.options.clone()).map_err(|e| e.to_string())?;
    let options = runner.options();
    format_kv_line("API", &options.api_url);
    format_kv_line("Count", &options.count.to_string());
    format_kv_line(
        "Timeout",
        &if options.timeout_seconds == 0 {
            "none".to_string()
        } else {
            format!("{}s", options.timeout_seconds)
        },
    );
    format_kv_line("Proxy", options.proxy.as_deref().unwrap_or("none"));
    if let Some(path) = run.output.as_deref() {
        format_kv_line("Output", path);
    }
    println!();

    let pb = ProgressBar::new(u64::from(options.count));
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb.set_style(
        ProgressStyle::with_template(
            ":: Loading: [{pos}/{len}] :: {per_sec} :: Duration: [{elapsed_precise}]",
        )
        .map_err(|e| format!("failed to build progress bar style: {e}"))?,
    );

    let now = Instant::now();
    let mut presenter = TerminalPresenter::new(std::io::stdout());
    let result = runner.open_session(&pb, &mut presenter).await;
    pb.finish_and_clear();

    let mut session = match result {
        Ok(session) => session,
        // the presenter already shows the error placeholder
        Err(RunnerError::Load(_)) => return Ok(ExitCode::FAILURE),
        Err(e) => return Err(e.to_string()),
    };
    println!(
        ":: Loaded :: {} records in {}ms ::",
        session.index().len(),
        now.elapsed().as_millis()
    );
    println!();

    if let Some(path) = run.output.as_deref() {
        export_index(&session, path, run.output_format).await?;
    }

    if let Some(filter) = run.filter.as_deref() {
        session.filter(filter, &mut presenter);
    }
    if let Some(id) = run.select {
        select_or_report(&mut session, id, &mut presenter);
    }
    if run.once {
        return Ok(ExitCode::SUCCESS);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        presenter.prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read input: {e}")),
        };
        match parse_command(&line) {
            SessionCommand::Filter(value) => session.filter(&value, &mut presenter),
            SessionCommand::Select(id) => select_or_report(&mut session, id, &mut presenter),
            SessionCommand::List => {
                let filter = session.filter_value();
                format_kv_line("Filter", if filter.is_empty() { "none" } else { filter });
                session.redraw(&mut presenter);
            }
            SessionCommand::Quit => break,
            SessionCommand::Unknown(raw) => {
                println!("{} unknown command '{}'", "::".bold().white(), raw.red());
            }
        }
    }
    println!();
    Ok(ExitCode::SUCCESS)
}

pub fn run_cli() -> Result<ExitCode, String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(ExitCode::SUCCESS);
            }
            _ => return Err(e.to_string()),
        },
    };

    if args.init_config {
        let path = config::default_config_path()
            .ok_or_else(|| "could not determine home directory".to_string())?;
        let created = config::ensure_default_config_file(&path)?;
        format_kv_line(
            "Config",
            &format!(
                "{} ({})",
                path.display(),
                if created { "created" } else { "exists" }
            ),
        );
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => ConfigFile::default(),
    };

    let run = build_run_config(args, cfg)?;
    init_tracing(run.verbose);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(run.workers)
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
