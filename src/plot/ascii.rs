//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - curve: `-` line
//! - satiety threshold: `|` column
//! - start point: `o`

use crate::domain::{CurveFile, CurveResponse, SATIETY_THRESHOLD};

/// Render a plot for an in-memory curve response.
pub fn render_ascii_plot(response: &CurveResponse, width: usize, height: usize) -> String {
    render_plot(
        &response.curve.points,
        (0.0, response.start_balance),
        response.satiety_threshold,
        width,
        height,
    )
}

/// Render a plot from a saved curve JSON file.
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64)> = curve
        .grid
        .quantity
        .iter()
        .zip(curve.grid.balance.iter())
        .map(|(&x, &y)| (x, y))
        .collect();

    render_plot(
        &points,
        (0.0, curve.inputs.initial_balance),
        SATIETY_THRESHOLD,
        width,
        height,
    )
}

fn render_plot(
    points: &[(f64, f64)],
    start: (f64, f64),
    threshold_x: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = x_range(points).unwrap_or((0.0, 2.0));
    let (y_min, y_max) = y_range(points, start).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    draw_curve(&mut grid, points, x_min, x_max, y_min, y_max);

    // Threshold column goes into blank cells only, so the curve stays unbroken.
    if threshold_x >= x_min && threshold_x <= x_max {
        let col = map_x(threshold_x, x_min, x_max, width);
        for row in grid.iter_mut() {
            if row[col] == ' ' {
                row[col] = '|';
            }
        }
    }

    // Start point overrides everything at x=0.
    let sx = map_x(start.0, x_min, x_max, width);
    let sy = map_y(start.1, y_min, y_max, height);
    grid[sy][sx] = 'o';

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: quantity=[{x_min:.3}, {x_max:.3}] | balance=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(points: &[(f64, f64)], start: (f64, f64)) -> Option<(f64, f64)> {
    let mut min_y = start.1;
    let mut max_y = start.1;
    for &(_, y) in points {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if points.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_min, y_max, height);
        if let Some((px, py)) = prev {
            draw_line(grid, px, py, cx, cy, '-');
        } else {
            grid[cy][cx] = '-';
        }
        prev = Some((cx, cy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CurveParams, CurveResponse, SampledCurve};

    fn response(points: Vec<(f64, f64)>, start_balance: f64) -> CurveResponse {
        CurveResponse {
            curve: SampledCurve { points },
            params: CurveParams {
                amplitude: 0.0,
                steepness: 1.2,
                midpoint: 0.4,
                baseline: None,
            },
            start_balance,
            satiety_threshold: SATIETY_THRESHOLD,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        // A flat zero curve collapses the y-range, so the renderer falls
        // back to [0, 1] padded.
        let r = response(vec![(0.0, 0.0), (2.0, 0.0)], 0.0);
        let txt = render_ascii_plot(&r, 10, 5);
        let expected = concat!(
            "Plot: quantity=[0.000, 2.000] | balance=[-0.05, 1.05]\n",
            "     |    \n",
            "     |    \n",
            "     |    \n",
            "     |    \n",
            "o---------\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn rising_curve_keeps_marks_in_bounds() {
        let points: Vec<(f64, f64)> = (0..50)
            .map(|i| {
                let x = 2.0 * i as f64 / 49.0;
                (x, -0.2 + 0.4 * x)
            })
            .collect();
        let txt = render_ascii_plot(&response(points, -0.2), 40, 12);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("Plot: quantity=[0.000, 2.000]"));
        for line in &lines[1..] {
            assert_eq!(line.chars().count(), 40);
        }
        assert!(txt.contains('o'));
        assert!(txt.contains('|'));
        assert!(txt.contains('-'));
    }
}
