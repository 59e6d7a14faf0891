use mapgraph_core::{DrawCommand, Point, PointStyle};

#[derive(Debug, Clone)]
pub struct AsciiRenderOptions {
    pub max_width: usize,
    pub max_height: usize,
}

impl Default for AsciiRenderOptions {
    fn default() -> Self {
        Self {
            max_width: 120,
            max_height: 40,
        }
    }
}

/// Rasterizes a frame drawn on a `width` x `height` canvas onto a grid no
/// larger than the option limits. Cells are twice as tall as they are wide.
pub fn render_ascii(frame: &[DrawCommand], width: f64, height: f64, options: &AsciiRenderOptions) -> String {
    if frame.is_empty() {
        return String::new();
    }

    let width = width.max(1.0);
    let height = height.max(1.0);
    let scale_x = (width / options.max_width.max(1) as f64).max(1.0);
    let scale_y = (height / options.max_height.max(1) as f64).max(2.0);
    let scale = Scale { x: scale_x, y: scale_y };

    let grid_width = ((width / scale.x).ceil() as usize).max(1);
    let grid_height = ((height / scale.y).ceil() as usize).max(1);
    let mut grid = vec![vec![' '; grid_width]; grid_height];

    let bounds = (grid_width as f64, grid_height as f64);
    for command in frame {
        match command {
            DrawCommand::Line { from, to } => {
                if let Some((start, end, _)) = clip_segment(scale.to_grid(*from), scale.to_grid(*to), bounds) {
                    draw_line(&mut grid, start, end);
                }
            }
            DrawCommand::Arrow { from, to } => {
                if let Some((start, end, whole)) = clip_segment(scale.to_grid(*from), scale.to_grid(*to), bounds) {
                    draw_line(&mut grid, start, end);
                    if whole {
                        set_cell(&mut grid, end.0, end.1, arrow_head(start, end));
                    }
                }
            }
            DrawCommand::Point { at, style } => {
                let Some((x, y)) = cell_of(scale.to_grid(*at)) else {
                    continue;
                };
                let marker = match style {
                    PointStyle::Node => 'o',
                    PointStyle::Selected => '@',
                };
                put_cell(&mut grid, x, y, marker);
            }
            DrawCommand::Label { at, text } => {
                let Some((x, y)) = cell_of(scale.to_grid(*at)) else {
                    continue;
                };
                let mut column = x.saturating_add(1);
                for ch in text.chars() {
                    put_cell(&mut grid, column, y, ch);
                    column = column.saturating_add(1);
                }
            }
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

struct Scale {
    x: f64,
    y: f64,
}

impl Scale {
    fn to_grid(&self, point: Point) -> (f64, f64) {
        (point.x / self.x, point.y / self.y)
    }
}

fn cell_of((x, y): (f64, f64)) -> Option<(i64, i64)> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some((x.floor() as i64, y.floor() as i64))
}

/// Liang-Barsky clip of a grid-space segment to `[0, max_x] x [0, max_y]`.
/// Returns the clipped end cells and whether the far end survived unclipped.
/// Deltas are halved so segments spanning the whole `f64` range stay finite.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    (max_x, max_y): (f64, f64),
) -> Option<((i64, i64), (i64, i64), bool)> {
    if ![from.0, from.1, to.0, to.1].iter().all(|value| value.is_finite()) {
        return None;
    }
    let half_dx = to.0 * 0.5 - from.0 * 0.5;
    let half_dy = to.1 * 0.5 - from.1 * 0.5;
    let checks = [
        (-half_dx, from.0 * 0.5),
        (half_dx, max_x * 0.5 - from.0 * 0.5),
        (-half_dy, from.1 * 0.5),
        (half_dy, max_y * 0.5 - from.1 * 0.5),
    ];

    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            exit = exit.min(t);
        }
        if enter > exit {
            return None;
        }
    }

    let at = |t: f64| (from.0 + t * half_dx + t * half_dx, from.1 + t * half_dy + t * half_dy);
    let start = cell_of(at(enter))?;
    let end = cell_of(at(exit))?;
    Some((start, end, exit >= 1.0))
}

/// Callers pass clipped cells, so the walk is bounded by the grid size.
fn draw_line(grid: &mut [Vec<char>], start: (i64, i64), end: (i64, i64)) {
    let (mut x, mut y) = start;
    let (x2, y2) = end;
    let ch = stroke_char(start, end);
    let dx = (x2 - x).abs();
    let dy = -(y2 - y).abs();
    let step_x = if x < x2 { 1 } else { -1 };
    let step_y = if y < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        set_cell(grid, x, y, ch);
        if x == x2 && y == y2 {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += step_x;
        }
        if doubled <= dx {
            err += dx;
            y += step_y;
        }
    }
}

fn stroke_char(start: (i64, i64), end: (i64, i64)) -> char {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    if dy == 0 {
        '-'
    } else if dx == 0 {
        '|'
    } else if dx.abs() > dy.abs() * 2 {
        '-'
    } else if dy.abs() > dx.abs() * 2 {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

fn arrow_head(start: (i64, i64), end: (i64, i64)) -> char {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    if dx.abs() >= dy.abs() {
        if dx >= 0 { '>' } else { '<' }
    } else if dy > 0 {
        'v'
    } else {
        '^'
    }
}

/// Writes a stroke cell, merging crossings into `+`; never overwrites
/// markers or text.
fn set_cell(grid: &mut [Vec<char>], x: i64, y: i64, ch: char) {
    let Some(cell) = cell_mut(grid, x, y) else {
        return;
    };
    let existing = *cell;
    if existing == ' ' || is_stroke(existing) {
        *cell = merge_char(existing, ch);
    }
}

fn put_cell(grid: &mut [Vec<char>], x: i64, y: i64, ch: char) {
    if let Some(cell) = cell_mut(grid, x, y) {
        *cell = ch;
    }
}

fn cell_mut(grid: &mut [Vec<char>], x: i64, y: i64) -> Option<&mut char> {
    let row = usize::try_from(y).ok()?;
    let column = usize::try_from(x).ok()?;
    grid.get_mut(row)?.get_mut(column)
}

fn is_stroke(ch: char) -> bool {
    matches!(ch, '-' | '|' | '/' | '\\' | '+')
}

fn merge_char(existing: char, incoming: char) -> char {
    if existing == ' ' || existing == incoming {
        return incoming;
    }
    if is_stroke(incoming) { '+' } else { incoming }
}
