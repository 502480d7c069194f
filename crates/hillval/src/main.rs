//! Hill of Value CLI: run a grid sweep and export the scenario table.

mod export;
mod loader;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;

use hillval_core::config::{EngineConfig, GridAxis};
use hillval_core::model::SamplingProfile;
use hillval_core::sweep::{SweepProgress, sweep_evaluate};

#[derive(Parser, Debug)]
#[command(name = "hillval")]
#[command(about = "Evaluate mine NPV across a cut-off grade x production rate grid")]
struct Args {
    /// Cut-off grade axis minimum (%)
    #[arg(long, default_value_t = 0.2)]
    cutoff_min: f64,

    /// Cut-off grade axis maximum (%)
    #[arg(long, default_value_t = 1.0)]
    cutoff_max: f64,

    /// Cut-off grade axis step (%)
    #[arg(long, default_value_t = 0.1)]
    cutoff_step: f64,

    /// Production rate axis minimum (Mtpa)
    #[arg(long, default_value_t = 2.0)]
    production_min: f64,

    /// Production rate axis maximum (Mtpa)
    #[arg(long, default_value_t = 6.0)]
    production_max: f64,

    /// Production rate axis step (Mtpa)
    #[arg(long, default_value_t = 0.5)]
    production_step: f64,

    /// Mean metal price ($/t)
    #[arg(long, default_value_t = 4000.0)]
    price: f64,

    /// Metal price standard deviation ($/t)
    #[arg(long, default_value_t = 0.0)]
    price_std: f64,

    /// Mean metallurgical recovery (%)
    #[arg(long, default_value_t = 85.0)]
    recovery: f64,

    /// Recovery standard deviation (%)
    #[arg(long, default_value_t = 0.0)]
    recovery_std: f64,

    /// Operating cost per tonne ($/t)
    #[arg(long, default_value_t = 40.0)]
    opex: f64,

    /// Discount rate (%)
    #[arg(long, default_value_t = 8.0)]
    discount_rate: f64,

    /// Monte Carlo trials per grid cell
    #[arg(long, default_value_t = 100)]
    trials: usize,

    /// RNG seed; omit for a fresh seed per run
    #[arg(long)]
    seed: Option<u64>,

    /// Grade-tonnage curve file (columns: Cutoff, Tonnage, Grade)
    #[arg(long)]
    grade_tonnage_curve: Option<PathBuf>,

    /// CAPEX curve file (columns: Production, CAPEX)
    #[arg(long)]
    capex_curve: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Export only cells with finite, positive NPV and CAPEX
    #[arg(long)]
    valid_only: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn engine_config(&self) -> color_eyre::Result<EngineConfig> {
        let grade_tonnage_curve = self
            .grade_tonnage_curve
            .as_deref()
            .map(loader::load_grade_tonnage_curve)
            .transpose()?;
        let capex_curve = self
            .capex_curve
            .as_deref()
            .map(loader::load_capex_curve)
            .transpose()?;

        Ok(EngineConfig {
            cutoff: GridAxis::new(self.cutoff_min, self.cutoff_max, self.cutoff_step),
            production: GridAxis::new(
                self.production_min,
                self.production_max,
                self.production_step,
            ),
            price: SamplingProfile::Normal {
                mean: self.price,
                std_dev: self.price_std,
            },
            recovery: SamplingProfile::Normal {
                mean: self.recovery,
                std_dev: self.recovery_std,
            },
            opex_per_tonne: self.opex,
            discount_rate_pct: self.discount_rate,
            trials_per_cell: self.trials,
            grade_tonnage_curve,
            capex_curve,
            seed: self.seed,
        })
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level);

    let config = args.engine_config()?;
    config.validate()?;
    tracing::info!(
        cells = config.total_cells(),
        trials = config.trials_per_cell,
        "starting sweep"
    );

    let progress = SweepProgress::new(0);
    let done = Arc::new(AtomicBool::new(false));
    let reporter = {
        let progress = progress.clone();
        let done = done.clone();
        std::thread::spawn(move || {
            loop {
                std::thread::sleep(Duration::from_millis(500));
                if done.load(Ordering::Relaxed) {
                    break;
                }
                let total = progress.total();
                if total > 0 {
                    tracing::info!("evaluated {}/{} cells", progress.completed(), total);
                }
            }
        })
    };

    let result = sweep_evaluate(&config, Some(&progress));
    done.store(true, Ordering::Relaxed);
    let _ = reporter.join();
    let table = result?;

    let (view, view_name) = if args.valid_only {
        (table.valid_only(), "valid-only")
    } else {
        (table.clone(), "full")
    };
    tracing::info!(
        rows = view.len(),
        dropped = table.len() - view.len(),
        "sweep complete"
    );

    match &args.output {
        Some(path) => {
            export::export_table(path, &view)?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            export::write_table(&mut stdout.lock(), &view)?;
        }
    }

    // Surface pivot is a per-view concern: filtering can leave holes, which
    // downstream surface plots must know about. A failed pivot never fails
    // the run.
    match view.to_surface() {
        Ok(surface) => {
            if let Some((cutoff, production, npv)) = surface.peak() {
                tracing::info!(
                    "hill of value peak: NPV {npv:.2} at cutoff {cutoff}, production {production}"
                );
            }
        }
        Err(e) => tracing::warn!("{view_name} view cannot form a surface: {e}"),
    }

    Ok(())
}
