use crate::report::FitCurve;
use plotters::prelude::*;
use std::error::Error;

pub fn visualize_fit(curve: &FitCurve, output_path: &str) -> Result<(), Box<dyn Error>> {
    // Create a drawing area for the chart.
    let root = BitMapBackend::new(output_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let (min_y, max_y) = curve
        .points
        .iter()
        .flat_map(|p| [p.truth, p.sample, p.fitted])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    let margin = 0.1 * (max_y - min_y).max(1e-3);

    let mut chart = ChartBuilder::on(&root)
        .caption("Polynomial fit of sin(2πx)", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, (min_y - margin)..(max_y + margin))?;

    chart.configure_mesh().x_desc("x").y_desc("y").draw()?;

    chart
        .draw_series(LineSeries::new(
            curve.points.iter().map(|p| (p.x, p.truth)),
            &BLUE,
        ))?
        .label("sin(2πx)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            curve.points.iter().map(|p| (p.x, p.fitted)),
            &RED,
        ))?
        .label("fit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(
            curve
                .points
                .iter()
                .map(|p| Circle::new((p.x, p.sample), 4, BLACK.filled())),
        )?
        .label("samples")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLACK.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    // Save the result to the specified output path.
    root.present()?;
    println!("Chart saved to {}", output_path);
    Ok(())
}

/// Best objective per generation on a log scale.
pub fn visualize_convergence(history: &[f64], output_path: &str) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(output_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let floor = 1e-12;
    let max_y = history.iter().copied().fold(floor, f64::max);
    let min_y = history.iter().copied().fold(max_y, f64::min).max(floor);

    let mut chart = ChartBuilder::on(&root)
        .caption("Best objective per generation", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0..history.len().max(1), (min_y..max_y * 1.1).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Generation")
        .y_desc("Objective")
        .draw()?;

    chart.draw_series(LineSeries::new(
        history
            .iter()
            .enumerate()
            .map(|(g, &v)| (g + 1, v.max(floor))),
        &RED,
    ))?;

    root.present()?;
    println!("Chart saved to {}", output_path);
    Ok(())
}
