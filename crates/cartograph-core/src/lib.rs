//! Cartograph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Cartograph
//! library and its presentation shells. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Diagram-space coordinates ([`geometry`] module)
//! - **Catalogue**: The static node/edge/anchor records a diagram is built from ([`catalogue`] module)

pub mod catalogue;
pub mod color;
pub mod geometry;
pub mod identifier;
