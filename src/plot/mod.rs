//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - original keys: `o`
//! - reshaped keys: `x` (only where the value actually changed)
//! - reshaped polyline: `-`

/// Render one curve's keys before and after a fit.
///
/// `before` and `after` are parallel `(time, value)` lists. Keys whose value
/// changed are drawn as `x` over the connecting line; unchanged keys stay `o`.
pub fn render_key_plot(
    title: &str,
    before: &[(f64, f64)],
    after: &[(f64, f64)],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = time_range(before, after).unwrap_or((0.0, 1.0));
    let (v_min, v_max) = value_range(before, after).unwrap_or((0.0, 1.0));
    let (v_min, v_max) = pad_range(v_min, v_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Polyline through the reshaped keys first, so points overlay it.
    draw_polyline(&mut grid, after, t_min, t_max, v_min, v_max);

    for &(t, v) in before {
        let x = map_x(t, t_min, t_max, width);
        let y = map_y(v, v_min, v_max, height);
        grid[y][x] = 'o';
    }

    for (&(t, v), &(_, v0)) in after.iter().zip(before.iter()) {
        if (v - v0).abs() > f64::EPSILON {
            let x = map_x(t, t_min, t_max, width);
            let y = map_y(v, v_min, v_max, height);
            grid[y][x] = 'x';
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Curve {title}: time=[{t_min:.3}, {t_max:.3}] | value=[{v_min:.2}, {v_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn time_range(before: &[(f64, f64)], after: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_t = f64::INFINITY;
    let mut max_t = f64::NEG_INFINITY;
    for &(t, _) in before.iter().chain(after.iter()) {
        min_t = min_t.min(t);
        max_t = max_t.max(t);
    }
    if min_t.is_finite() && max_t.is_finite() && max_t > min_t {
        Some((min_t, max_t))
    } else {
        None
    }
}

fn value_range(before: &[(f64, f64)], after: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for &(_, v) in before.iter().chain(after.iter()) {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v.is_finite() && max_v.is_finite() && max_v > min_v {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(v: f64, v_min: f64, v_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((v - v_min) / (v_max - v_min)).clamp(0.0, 1.0);
    // max value -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    v_min: f64,
    v_max: f64,
) {
    if points.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, v) in points {
        let x = map_x(t, t_min, t_max, width);
        let y = map_y(v, v_min, v_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '-');
        } else {
            grid[y][x] = '-';
        }
        prev = Some((x, y));
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
