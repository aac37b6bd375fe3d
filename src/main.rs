// src/main.rs

use log::{info, warn};
use env_logger::Env;
use grpoly::backends::{IntegerRing, RationalRing};
use grpoly::config::PolyConfig;
use grpoly::core::{GrResult, Ring};
use grpoly::polynomial::GrPoly;
use grpoly::series::{GrSeries, SeriesCtx};

fn main() {
    let config = match PolyConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration, using defaults: {}", e);
            PolyConfig::default()
        }
    };

    // Initialize the logger
    let env = Env::default()
        .filter_or("GRPOLY_LOG", config.log_level.as_str())
        .write_style_or("GRPOLY_LOG_STYLE", "auto");
    env_logger::Builder::from_env(env).init();

    if let Err(e) = run(&config) {
        warn!("Example failed: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &PolyConfig) -> GrResult<()> {
    let zz = IntegerRing::with_tuning(config.tuning);
    let f = GrPoly::from_i64s(&[1, 0, 1], &zz)?;
    let g = GrPoly::from_i64s(&[1, 1], &zz)?;
    let (q, r) = f.divrem(&g, &zz)?;
    info!("Ring: {}", zz.name());
    println!("({}) = ({}) * ({}) + ({})", f.write("x", &zz), g.write("x", &zz), q.write("x", &zz), r.write("x", &zz));

    let qq = RationalRing::with_tuning(config.tuning);
    let ctx = SeriesCtx::from_config(&config.series);
    let x = GrSeries::gen(&ctx, &qq);
    let e = x.exp(&ctx, &qq)?;
    println!("exp(x) = {}", e.write("x", &qq));
    Ok(())
}
