//! Builder
//! Example: Line Renderer Drawing API
//!
//! `GraphicsBuilder` accumulates coloured lines one instruction at a time.
//! `GraphicsDirector` knows recipes for common shapes and drives a builder
//! through them.

use serde::Serialize;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("A polygon needs at least 3 sides, got {sides}")]
    TooFewSides { sides: usize },

    #[error("Invalid {what}: {value} (must be finite and non-negative)")]
    InvalidDimension { what: &'static str, value: f64 },

    #[error("Invalid coordinate: ({x}, {y})")]
    InvalidPoint { x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    fn validate(self) -> Result<Self, BuildError> {
        if self.x.is_finite() && self.y.is_finite() {
            Ok(self)
        } else {
            Err(BuildError::InvalidPoint { x: self.x, y: self.y })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub color: Color,
}

/// A finished drawing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graphics {
    lines: Vec<Line>,
}

impl Graphics {
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Debug, Default)]
pub struct GraphicsBuilder {
    graphics: Graphics,
    color: Color,
}

impl GraphicsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Colour applied to every line added from now on.
    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.graphics.lines.push(Line {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
            color: self.color,
        });
        self
    }

    fn add_segment(&mut self, from: Point, to: Point) -> &mut Self {
        self.add_line(from.x, from.y, to.x, to.y)
    }

    pub fn build(self) -> Graphics {
        self.graphics
    }
}

// =============================================================================
// Director
// =============================================================================

pub struct GraphicsDirector<'a> {
    builder: &'a mut GraphicsBuilder,
}

impl<'a> GraphicsDirector<'a> {
    pub fn new(builder: &'a mut GraphicsBuilder) -> Self {
        GraphicsDirector { builder }
    }

    /// Draw with `color`, then put the builder's colour back.
    fn with_color(&mut self, color: Color, draw: impl FnOnce(&mut GraphicsBuilder)) {
        let previous = self.builder.color();
        self.builder.set_color(color);
        draw(&mut *self.builder);
        self.builder.set_color(previous);
    }

    pub fn rectangle(
        &mut self,
        top_left: Point,
        width: f64,
        height: f64,
        color: Color,
    ) -> Result<&mut Self, BuildError> {
        let top_left = top_left.validate()?;
        check_dimension("width", width)?;
        check_dimension("height", height)?;

        let Point { x, y } = top_left;
        self.with_color(color, |b| {
            b.add_line(x, y, x + width, y)
                .add_line(x + width, y, x + width, y + height)
                .add_line(x, y + height, x + width, y + height)
                .add_line(x, y, x, y + height);
        });
        Ok(self)
    }

    /// Regular polygon whose vertices sit `apothem` away from `center`.
    pub fn polygon(
        &mut self,
        sides: usize,
        center: Point,
        apothem: f64,
        color: Color,
    ) -> Result<&mut Self, BuildError> {
        if sides < 3 {
            return Err(BuildError::TooFewSides { sides });
        }
        let center = center.validate()?;
        check_dimension("apothem", apothem)?;

        let vertex = |i: usize| {
            let angle = 2.0 * PI * i as f64 / sides as f64;
            Point::new(center.x + apothem * angle.cos(), center.y + apothem * angle.sin())
        };
        self.with_color(color, |b| {
            for i in 0..sides {
                b.add_segment(vertex(i), vertex(i + 1));
            }
        });
        Ok(self)
    }
}

fn check_dimension(what: &'static str, value: f64) -> Result<(), BuildError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BuildError::InvalidDimension { what, value })
    }
}
