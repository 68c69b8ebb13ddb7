//! Feed recorded `TickInput` JSON lines through a session.
//!
//! Ticks are stamped on a synthetic clock `--frame-ms` apart so the
//! frame-rate governor behaves as it would on a live camera.

use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use signscribe_core::{
    load_config, DictionaryHandle, EngineConfig, Session, TickInput, WordListDictionary,
};
use tracing::{info, warn};

#[derive(Debug)]
struct Args {
    input: PathBuf,
    config: Option<PathBuf>,
    dictionary: Option<PathBuf>,
    frame_ms: u64,
    emit_all: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("signscribe_core=info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("replay failed: {e:#}");
        std::process::exit(1);
    }
}

fn parse_args() -> anyhow::Result<Args> {
    let mut input: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut dictionary: Option<PathBuf> = None;
    let mut frame_ms: u64 = 33;
    let mut emit_all = false;

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--input" => {
                let Some(v) = it.next() else {
                    bail!("missing value for --input");
                };
                input = Some(PathBuf::from(v));
            }
            "--config" => {
                let Some(v) = it.next() else {
                    bail!("missing value for --config");
                };
                config = Some(PathBuf::from(v));
            }
            "--dictionary" => {
                let Some(v) = it.next() else {
                    bail!("missing value for --dictionary");
                };
                dictionary = Some(PathBuf::from(v));
            }
            "--frame-ms" => {
                let Some(v) = it.next() else {
                    bail!("missing value for --frame-ms");
                };
                frame_ms = v
                    .parse::<u64>()
                    .context("invalid value for --frame-ms")?
                    .clamp(1, 1_000);
            }
            "--all" => emit_all = true,
            "--help" | "-h" => {
                println!(
                    "Usage: replay --input <ticks.jsonl|-> [--config <cfg.json>] \\
  [--dictionary <words.txt>] [--frame-ms <n>] [--all]"
                );
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    let Some(input) = input else {
        bail!("--input is required");
    };
    Ok(Args {
        input,
        config,
        dictionary,
        frame_ms,
        emit_all,
    })
}

fn run() -> anyhow::Result<()> {
    let args = parse_args()?;

    let config = args
        .config
        .as_deref()
        .map(load_config)
        .unwrap_or_else(EngineConfig::default);
    let dictionary = match &args.dictionary {
        Some(path) => Some(DictionaryHandle::new(
            WordListDictionary::load(path)
                .with_context(|| format!("loading dictionary {}", path.display()))?,
        )),
        None => None,
    };
    let mut session = Session::new(config.session, dictionary)?;

    let reader: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = fs::File::open(&args.input)
            .with_context(|| format!("opening {}", args.input.display()))?;
        Box::new(BufReader::new(file))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let start = Instant::now();
    let frame = Duration::from_millis(args.frame_ms);
    let mut ticks = 0u32;
    let mut last = session.snapshot();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let input: TickInput = match serde_json::from_str(&line) {
            Ok(input) => input,
            Err(e) => {
                warn!(line = line_no + 1, "skipping unparsable tick: {e}");
                continue;
            }
        };
        last = session.tick_at(&input, start + frame * ticks);
        ticks += 1;
        if args.emit_all {
            serde_json::to_writer(&mut out, &last)?;
            writeln!(out)?;
        }
    }

    if !args.emit_all {
        serde_json::to_writer_pretty(&mut out, &last)?;
        writeln!(out)?;
    }

    let snap = session.diagnostics().snapshot();
    info!(
        ticks,
        commits = snap.commits,
        control_edges = snap.control_edges,
        recovered_faults = snap.recovered_faults,
        "replay finished"
    );
    Ok(())
}
