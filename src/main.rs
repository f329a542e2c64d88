use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use circuitgen::config::Params;
use circuitgen::{Error, Result};

fn arg<T: FromStr>(args: &[String], i: usize, name: &'static str, default: T) -> Result<T> {
    match args.get(i) {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| Error::Argument {
            name,
            value: s.clone(),
        }),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "saved");
    Ok(())
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = arg(&args, 1, "seed", 42)?;
    let width: f32 = arg(&args, 2, "width", 1280.0)?;
    let height: f32 = arg(&args, 3, "height", 720.0)?;
    let out_dir = args
        .get(4)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir).map_err(|source| Error::Io {
        path: out_dir.clone(),
        source,
    })?;

    let params = Params::default();
    info!(
        seed,
        width,
        height,
        cell_size = params.cell_size,
        max_wire_len = params.max_wire_len,
        "generating circuit"
    );

    let (circuit, timings) = circuitgen::generate(seed, width, height, &params)?;
    let layout = &circuit.layout;
    info!(
        rows = layout.rows,
        cols = layout.cols,
        target = layout.target,
        placed = layout.wires.len(),
        cells = layout.cell_count(),
        "layout ready"
    );

    for t in &timings {
        info!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    write_file(&out_dir.join("circuit.svg"), circuit.svg.as_bytes())?;
    write_file(
        &out_dir.join("wires.json"),
        &serde_json::to_vec_pretty(&layout)?,
    )?;

    if circuit.rgba.is_empty() {
        info!("empty drawing area, skipping circuit.png");
        return Ok(());
    }
    let png = out_dir.join("circuit.png");
    image::save_buffer(
        &png,
        &circuit.rgba,
        layout.width as u32,
        layout.height as u32,
        image::ColorType::Rgba8,
    )?;
    info!(path = %png.display(), "saved");

    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_env("CIRCUITGEN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}
