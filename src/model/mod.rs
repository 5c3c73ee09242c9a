//! Core data structures flowing through the Haworth pipeline.
//!
//! - [`types`] – Small enums shared by every stage: prefix, D/L series, ring
//!   type, anomer, Fischer side, ring face and built-in modifications.
//! - [`code`] – The decoded sugar code ([`ParsedCode`]).
//! - [`spec`] – The resolved substituent map for one ring form ([`HaworthSpec`]).
//! - [`ops`] – Primitive drawing instructions ([`RenderOp`]).
//!
//! The model separates chemistry ([`HaworthSpec`]) from geometry ([`RenderOp`]),
//! letting the [`crate::haworth`] pipeline turn one into the other with no
//! state shared between stages.
//!
//! [`ParsedCode`]: code::ParsedCode
//! [`HaworthSpec`]: spec::HaworthSpec
//! [`RenderOp`]: ops::RenderOp

pub mod code;
pub mod ops;
pub mod spec;
pub mod types;
