use std::io::{BufWriter, Write};

use clap::Parser;
use serde::Serialize;

use sparkmatrix::cli::CliOptions;
use sparkmatrix::{Engine, Result};

/// Run an effect without a window and print one JSON line per frame.
#[derive(Parser, Debug)]
#[command(name = "sparkmatrix-headless")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    options: CliOptions,

    /// Frames to run
    #[arg(long, default_value_t = 100)]
    ticks: u64,
}

/// One frame as written to stdout. Rows run bottom to top.
#[derive(Debug, Serialize)]
struct FrameRecord {
    tick: u64,
    alive: usize,
    energy: u64,
    width: i32,
    height: i32,
    rows: Vec<Vec<[u8; 3]>>,
}

impl FrameRecord {
    fn capture(engine: &Engine, brightness: u8) -> Self {
        let frame = engine.frame();
        let rows = frame
            .rows()
            .map(|row| {
                row.iter()
                    .map(|c| {
                        let c = c.scaled(brightness);
                        [c.r, c.g, c.b]
                    })
                    .collect()
            })
            .collect();
        Self {
            tick: engine.tick_count(),
            alive: engine.system.alive_count(),
            energy: frame.total_energy(),
            width: frame.width(),
            height: frame.height(),
            rows,
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let preset = cli.options.to_preset()?;
    let ticks = cli.ticks;
    let mut engine = preset.build();
    log::info!(
        "running {} for {ticks} ticks on {}x{}",
        preset.effect.label(),
        preset.matrix.cells_x,
        preset.matrix.cells_y
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..ticks {
        engine.tick();
        let record = FrameRecord::capture(&engine, preset.brightness);
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
