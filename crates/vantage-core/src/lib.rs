//! Vantage Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Vantage layout
//! and chart composition engine. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Points and bounding boxes ([`geometry`] module)
//! - **Datasets**: The tabular record model consumed by chart composers ([`dataset`] module)

pub mod color;
pub mod dataset;
pub mod geometry;
pub mod identifier;
