//! Cipherflow Core Types and Definitions
//!
//! This crate provides the rendering-neutral vocabulary shared by the
//! Cipherflow pipeline visualizer. It includes:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Draw**: Stroke, text and shape definitions rendered to SVG ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
