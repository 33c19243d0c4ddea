mod config;
mod display;
mod fill;

use clap::Parser;
use log::{LevelFilter, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use config::{Emitters, LumenConfig, Order, load_config_from_path};
use lumen_grid::{ChunkDims, Light, LightField, SeedField};
use lumen_lighting::{Drain, EmitterSeeding, PropagationStats};

#[derive(Parser, Debug)]
#[command(name = "lumen", about = "Chunk light propagation benchmark")]
struct Cli {
    /// Propagation runs to time per pass
    #[arg(long, short = 's')]
    samples: Option<usize>,

    /// Print the final light field
    #[arg(long, short = 'v')]
    display: bool,

    /// RNG seed for the random fill (entropy when absent)
    #[arg(long, short = 'S')]
    seed: Option<u64>,

    /// TOML config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    order: Option<Order>,

    #[arg(long, value_enum)]
    emitters: Option<Emitters>,

    /// Chunk side length, shell included
    #[arg(long)]
    side: Option<usize>,

    /// Also write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<(), Box<dyn Error>> {
    match log_file {
        Some(path) => {
            use simplelog::{
                ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger,
            };
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, Config::default(), File::create(path)?),
            ])?;
        }
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<LumenConfig, Box<dyn Error>> {
    let mut cfg = match &cli.config {
        Some(path) => load_config_from_path(path)?,
        None => LumenConfig::default(),
    };
    if let Some(n) = cli.samples {
        cfg.bench.samples = n;
    }
    if let Some(order) = cli.order {
        cfg.propagation.order = order;
    }
    if let Some(emitters) = cli.emitters {
        cfg.propagation.emitters = emitters;
    }
    if let Some(side) = cli.side {
        cfg.chunk.side = side;
    }
    Ok(cfg)
}

struct Pass {
    dest: LightField,
    stats: PropagationStats,
    secs: f64,
}

/// Fills a fresh chunk from `fill_seed` and times `samples` propagation runs over it.
fn bench_pass(cfg: &LumenConfig, fill_seed: u64) -> Result<Pass, Box<dyn Error>> {
    let dims = ChunkDims::new(cfg.chunk.side)?;
    let mut seed = SeedField::new(dims);
    seed.set_border_opaque();
    let mut rng = StdRng::seed_from_u64(fill_seed);
    fill::fill_random(&mut seed, &cfg.fill, &mut rng);

    let mut dest = LightField::new(dims);
    let max_level = Light::from(cfg.fill.max_strength);
    let mut drain = Drain::new(cfg.propagation.order.into(), &dims, max_level);
    let emitters: EmitterSeeding = cfg.propagation.emitters.into();

    let mut stats = PropagationStats::default();
    let start = Instant::now();
    for _ in 0..cfg.bench.samples {
        dest.clear();
        stats = drain.run(&seed, &mut dest, emitters)?;
    }
    let secs = start.elapsed().as_secs_f64();
    Ok(Pass { dest, stats, secs })
}

/// Light field first when `display` is set, then the timing line.
fn write_report<W: Write>(out: &mut W, pass: &Pass, samples: usize, display: bool) -> io::Result<()> {
    if display {
        display::write_chunk(out, &pass.dest)?;
    }
    let rate = if pass.secs > 0.0 {
        samples as f64 / pass.secs
    } else {
        0.0
    };
    writeln!(out, "{} loops in {:.6}s ({:.1} loops/sec)", samples, pass.secs, rate)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;
    let cfg = load_config(&cli)?;

    // Both passes light the same chunk.
    let fill_seed = cli.seed.unwrap_or_else(rand::random);
    info!(
        "side={} order={:?} emitters={:?} samples={} seed={}",
        cfg.chunk.side, cfg.propagation.order, cfg.propagation.emitters, cfg.bench.samples, fill_seed
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..2 {
        let pass = bench_pass(&cfg, fill_seed)?;
        write_report(&mut out, &pass, cfg.bench.samples, cli.display)?;
        out.flush()?;
        info!(
            "seeds={} pushes={} expansions={} improvements={} stale={} max_level={}",
            pass.stats.seeds,
            pass.stats.pushes,
            pass.stats.expansions,
            pass.stats.improvements,
            pass.stats.stale,
            pass.dest.max_level()
        );
    }
    Ok(())
}
