//! Value types that can be animated.
//!
//! Each type maps losslessly onto a fixed-size `f64` vector so the solvers can
//! operate on it component-wise.

use crate::traits::VectorConvertible;
use nalgebra::{SVector, Vector1, Vector2, Vector4};
use serde::{Deserialize, Serialize};

impl VectorConvertible for f64 {
    type Vector = Vector1<f64>;

    fn from_vector(vector: Self::Vector) -> Self {
        vector[0]
    }

    fn to_vector(&self) -> Self::Vector {
        Vector1::new(*self)
    }
}

impl VectorConvertible for f32 {
    type Vector = Vector1<f64>;

    fn from_vector(vector: Self::Vector) -> Self {
        vector[0] as f32
    }

    fn to_vector(&self) -> Self::Vector {
        Vector1::new(f64::from(*self))
    }
}

impl<const N: usize> VectorConvertible for SVector<f64, N> {
    type Vector = SVector<f64, N>;

    fn from_vector(vector: Self::Vector) -> Self {
        vector
    }

    fn to_vector(&self) -> Self::Vector {
        *self
    }
}

/// A point in two-dimensional space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl VectorConvertible for Point {
    type Vector = Vector2<f64>;

    fn from_vector(vector: Self::Vector) -> Self {
        Self::new(vector[0], vector[1])
    }

    fn to_vector(&self) -> Self::Vector {
        Vector2::new(self.x, self.y)
    }
}

/// A two-dimensional extent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl VectorConvertible for Size {
    type Vector = Vector2<f64>;

    fn from_vector(vector: Self::Vector) -> Self {
        Self::new(vector[0], vector[1])
    }

    fn to_vector(&self) -> Self::Vector {
        Vector2::new(self.width, self.height)
    }
}

/// An axis-aligned rectangle.
/// Vector layout: (x, y, width, height).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }
}

impl VectorConvertible for Rect {
    type Vector = Vector4<f64>;

    fn from_vector(vector: Self::Vector) -> Self {
        Self::new(vector[0], vector[1], vector[2], vector[3])
    }

    fn to_vector(&self) -> Self::Vector {
        Vector4::new(
            self.origin.x,
            self.origin.y,
            self.size.width,
            self.size.height,
        )
    }
}

/// An RGBA color with unclamped components.
/// Components are nominally in `[0, 1]`, but springs may overshoot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }
}

impl VectorConvertible for Color {
    type Vector = Vector4<f64>;

    fn from_vector(vector: Self::Vector) -> Self {
        Self::rgba(vector[0], vector[1], vector[2], vector[3])
    }

    fn to_vector(&self) -> Self::Vector {
        Vector4::new(self.red, self.green, self.blue, self.alpha)
    }
}
