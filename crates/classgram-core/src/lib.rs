//! Classgram Core Types and Definitions
//!
//! This crate provides the foundational types shared by the classgram
//! crates. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Visual definitions for diagram elements ([`draw`] module)
//! - **Model**: The immutable class diagram model ([`model`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod model;
