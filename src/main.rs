use std::{
    thread,
    time::{Duration, Instant},
};

use log::{info, warn};

use tsp_vis_core::{Error, Result, TspSolver, VisOptions, logging, write_route};

const SPIKE_THRESHOLD_FACTOR: f64 = 3.0;

fn main() -> Result<()> {
    let now = Instant::now();
    let options = VisOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let mut solver = TspSolver::new(options.solver_config()?);
    solver.generate_points(options.points, options.bounds()?)?;

    let interrupt = solver.interrupt_handle();
    ctrlc::set_handler(move || {
        warn!("signal: interrupt requested");
        interrupt.interrupt();
    })
    .map_err(|e| Error::other(format!("failed to install Ctrl-C handler: {e}")))?;

    solver.start_solving()?;

    let progress = Duration::from_millis(options.progress_ms);
    while solver.is_solving() {
        thread::sleep(progress);
        let tour = solver.tour();
        info!(
            "progress: visited={}/{} length={:.2} elapsed_s={:.2}",
            tour.route().len().min(tour.point_count()),
            tour.point_count(),
            tour.length(),
            now.elapsed().as_secs_f32()
        );
    }

    let outcome = solver.wait()?;
    let tour = solver.tour();
    write_route(&tour, options.output_path())?;

    info!(
        "output: outcome={outcome:?} n={} length={:.2} time={:.2}s",
        tour.route().len(),
        tour.length(),
        now.elapsed().as_secs_f32()
    );

    tour.metrics(SPIKE_THRESHOLD_FACTOR);

    Ok(())
}
