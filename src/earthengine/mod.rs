//! Earth Engine request graphs.
//!
//! Computations are described locally as expression graphs and evaluated
//! lazily by the remote service.

pub mod expression;
pub mod image;

pub use expression::{Expression, FunctionInvocation, ValueNode};
pub use image::{Filter, Geometry, Image, ImageCollection};
