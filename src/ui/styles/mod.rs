// SPDX-License-Identifier: MPL-2.0
//! Widget styles built on the design tokens.

pub mod button;
pub mod container;
pub mod overlay;
