//! Provider-facing descriptors.
//!
//! `descriptor` exposes validated metadata (`ProviderDescriptor`) covering the three endpoints the
//! login flow talks to: the browser-facing authorization endpoint, the token endpoint, and the
//! user-info endpoint. [`ProviderDescriptor::google`] returns the fixed Google preset.

pub mod descriptor;

pub use descriptor::*;
