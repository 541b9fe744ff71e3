//! Ports (trait boundaries) between the core and its collaborators.
//!
//! Players plug in through [`Policy`]; anything that wants to watch a
//! training run plugs in through [`Observer`].

pub mod observer;
pub mod policy;

pub use observer::Observer;
pub use policy::Policy;
