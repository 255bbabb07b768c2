//! Target device descriptors.
//!
//! The encoder only ever sees a resolved [`DeviceDescriptor`]: the key
//! vocabulary used to turn single-key commands into backend symbols, and the
//! [`CodeShape`] family that selects the program template. The
//! [`DeviceRegistry`] maps identifiers to descriptors for the CLI and WASM
//! front ends.

mod registry;
mod types;

pub use registry::DeviceRegistry;
pub use types::*;
