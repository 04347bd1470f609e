//! Redstone: wire signal strength, power predicates and torch inversion.
//!
//! - [`power`] - Which cells deliver power to which neighbours
//! - [`wire`] - Signal strength propagation over wire networks
//! - [`torch`] - Torches that emit while their support is unpowered

pub mod power;
pub mod torch;
pub mod wire;

pub use torch::torch_attachment;
pub use wire::MAX_WIRE_STRENGTH;

pub(crate) use wire::PendingUpdates;
