pub mod config;
pub mod crossover;
pub mod direction;
pub mod error;
pub mod grid;
pub mod layout;
pub mod render;
pub mod rng;
pub mod router;

use std::time::Instant;

use config::Params;
use layout::Layout;
use rng::Rng;

pub use error::{ConfigError, Error, Result};

/// Everything one request produces: the layout plus its rendered forms.
pub struct Circuit {
    pub layout: Layout,
    pub svg: String,
    pub rgba: Vec<u8>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Validate, route and render one pass for a `width x height` pixel area.
pub fn generate(
    seed: u64,
    width: f32,
    height: f32,
    params: &Params,
) -> std::result::Result<(Circuit, Vec<Timing>), ConfigError> {
    params.validate_area(width, height)?;

    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Build grid and route wires
    let t = Instant::now();
    let mut rng = Rng::new(seed);
    let layout = layout::generate(width, height, params, &mut rng);
    timings.push(Timing {
        name: "route",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. SVG with draw-in animation
    let t = Instant::now();
    let svg = render::render_svg(&layout, &params.style);
    timings.push(Timing {
        name: "render_svg",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 3. Raster preview
    let t = Instant::now();
    let rgba = render::render_rgba(&layout, &params.style)?;
    timings.push(Timing {
        name: "render_rgba",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    timings.push(Timing {
        name: "TOTAL",
        ms: total_start.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((Circuit { layout, svg, rgba }, timings))
}
