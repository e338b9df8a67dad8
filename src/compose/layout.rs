use std::str::FromStr;

use crate::foundation::error::{NanobananaError, NanobananaResult};

/// How inputs are arranged on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Left to right (`horizontal` or `row`).
    #[default]
    Horizontal,
    /// Top to bottom (`vertical` or `column`).
    Vertical,
    Grid,
}

impl Direction {
    pub fn parse(s: &str) -> NanobananaResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "row" => Ok(Self::Horizontal),
            "vertical" | "column" => Ok(Self::Vertical),
            "grid" => Ok(Self::Grid),
            _ => Err(NanobananaError::InvalidDirection(s.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = NanobananaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Cross-axis placement for row and column layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    Start,
    #[default]
    Center,
    End,
}

impl Align {
    /// Unknown values fall back to [`Align::Center`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "end" => Self::End,
            _ => Self::Center,
        }
    }
}

fn align_offset(container: u32, content: u32, align: Align) -> u32 {
    let rem = container.saturating_sub(content);
    match align {
        Align::Start => 0,
        Align::Center => rem / 2,
        Align::End => rem,
    }
}

/// Column count for a grid of `count` images.
///
/// `requested == 0` picks `round(count / 2)`, at least one.
pub fn grid_columns(count: usize, requested: u32) -> u32 {
    if requested > 0 {
        return requested;
    }
    let auto = (count as f64 * 0.5 + 0.5) as u32;
    auto.max(1)
}

/// Canvas size and per-image top-left offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub canvas: (u32, u32),
    pub offsets: Vec<(u32, u32)>,
}

/// Place images of the given `sizes`.
///
/// Fails with `InvalidSize` when the canvas would not fit in `u32` pixels.
pub fn layout_offsets(
    sizes: &[(u32, u32)],
    direction: Direction,
    gap: u32,
    columns: u32,
    align: Align,
) -> NanobananaResult<Layout> {
    let max_w = sizes.iter().map(|s| s.0).max().unwrap_or(0);
    let max_h = sizes.iter().map(|s| s.1).max().unwrap_or(0);
    let gap64 = u64::from(gap);
    let gaps = gap64 * sizes.len().saturating_sub(1) as u64;

    // Sized in u64; offsets never exceed the canvas.
    let (canvas, offsets): ((u64, u64), Vec<(u64, u64)>) = match direction {
        Direction::Horizontal => {
            let width = sizes.iter().map(|s| u64::from(s.0)).sum::<u64>() + gaps;
            let mut x = 0u64;
            let offsets = sizes
                .iter()
                .map(|&(w, h)| {
                    let at = (x, u64::from(align_offset(max_h, h, align)));
                    x += u64::from(w) + gap64;
                    at
                })
                .collect();
            ((width, u64::from(max_h)), offsets)
        }
        Direction::Vertical => {
            let height = sizes.iter().map(|s| u64::from(s.1)).sum::<u64>() + gaps;
            let mut y = 0u64;
            let offsets = sizes
                .iter()
                .map(|&(w, h)| {
                    let at = (u64::from(align_offset(max_w, w, align)), y);
                    y += u64::from(h) + gap64;
                    at
                })
                .collect();
            ((u64::from(max_w), height), offsets)
        }
        Direction::Grid => {
            let cols = u64::from(grid_columns(sizes.len(), columns));
            let rows = (sizes.len() as u64).div_ceil(cols);
            let (cell_w, cell_h) = (u64::from(max_w) + gap64, u64::from(max_h) + gap64);
            let canvas = (
                (cols * cell_w).saturating_sub(gap64),
                (rows * cell_h).saturating_sub(gap64),
            );
            let offsets = sizes
                .iter()
                .enumerate()
                .map(|(i, &(w, h))| {
                    let (row, col) = (i as u64 / cols, i as u64 % cols);
                    (
                        col * cell_w + u64::from(align_offset(max_w, w, Align::Center)),
                        row * cell_h + u64::from(align_offset(max_h, h, Align::Center)),
                    )
                })
                .collect();
            (canvas, offsets)
        }
    };

    let fit = |v: u64| {
        u32::try_from(v).map_err(|_| {
            NanobananaError::invalid_size(format!(
                "combined canvas {}x{} is too large",
                canvas.0, canvas.1
            ))
        })
    };
    Ok(Layout {
        canvas: (fit(canvas.0)?, fit(canvas.1)?),
        offsets: offsets
            .into_iter()
            .map(|(x, y)| -> NanobananaResult<(u32, u32)> { Ok((fit(x)?, fit(y)?)) })
            .collect::<NanobananaResult<_>>()?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layout.rs"]
mod tests;
