//! 2D points and directed line segments.
//!
//! Everything here is a plain `Copy` value; operations return new values
//! instead of mutating in place.

use std::fmt;
use std::io::{self, Write};
use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `other` to `self`.
    #[inline]
    pub fn minus(&self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    #[inline]
    pub fn plus(&self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector has no direction: the result is NaN in both
    /// components, so never call this on a zero-length vector.
    #[inline]
    pub fn norm(&self) -> Self {
        let length = self.length();
        Self {
            x: self.x / length,
            y: self.y / length,
        }
    }

    #[inline]
    pub fn scale(&self, s: f64) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Rotate by `rad` radians, counter-clockwise in a y-up frame.
    ///
    /// On a y-down screen a negative angle turns the vector upward, which is
    /// the direction every curve rule folds in.
    #[inline]
    pub fn rotate(&self, rad: f64) -> Self {
        let (sin, cos) = rad.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl Add for Point {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl Sub for Point {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Directed line from `p1` to `p2`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    #[inline]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// The vector `p2 - p1` every rule is expressed in.
    #[inline]
    pub fn direction(&self) -> Point {
        self.p2.minus(self.p1)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.p1, self.p2)
    }
}

/// Write a generation as a plain-text listing:
///
/// ```text
/// lines
/// line,0
/// p1,250,300
/// p2,550,300
/// ```
pub fn write_listing<W: Write>(out: &mut W, lines: &[Segment]) -> io::Result<()> {
    writeln!(out, "lines")?;
    for (i, line) in lines.iter().enumerate() {
        writeln!(out, "line,{i}")?;
        writeln!(out, "p1,{},{}", line.p1.x, line.p1.y)?;
        writeln!(out, "p2,{},{}", line.p2.x, line.p2.y)?;
    }
    Ok(())
}
