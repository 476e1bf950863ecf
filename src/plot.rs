use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

fn bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (-1.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let margin = (max - min) * 0.05;
    (min - margin, max + margin)
}

/// Line chart of the total reward of each episode.
pub fn plot_rewards<P: AsRef<Path>>(path: P, rewards: &[f64]) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path.as_ref(), (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let (y_min, y_max) = bounds(rewards);
    let x_max = rewards.len().max(1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption("Q-Learning Training Rewards", ("sans-serif", 28).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Episode")
        .y_desc("Total Reward")
        .draw()?;

    chart.draw_series(LineSeries::new(
        rewards.iter().enumerate().map(|(i, r)| (i as f64, *r)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Bar chart of the order quantity chosen at each stock level.
pub fn plot_policy<P: AsRef<Path>>(
    path: P,
    policy: &[usize],
    action_size: usize,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path.as_ref(), (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let n_states = policy.len().max(1) as f64;
    let y_max = action_size.max(1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Learned Policy (Action per Stock Level)",
            ("sans-serif", 28).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n_states - 0.5), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Stock Level (State)")
        .y_desc("Action (Order Quantity)")
        .draw()?;

    chart.draw_series(policy.iter().enumerate().map(|(state, action)| {
        let x = state as f64;
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *action as f64)], BLUE.filled())
    }))?;

    root.present()?;
    Ok(())
}
