//! Numerical core of Hearth: the explicit diffusion stencil, Neumann
//! boundary mirroring, and the halo-exchange seam between workers.
//!
//! The update loop a driver runs each iteration is
//!
//! 1. [`boundary::apply_boundary`] mirrors interior cells into the ghost
//!    border on every side without a neighbour,
//! 2. a [`exchange::HaloExchange`] fills the remaining ghost cells from
//!    neighbouring workers,
//! 3. [`stencil::step`] writes the next temperature field from the current
//!    one,
//!
//! after which the caller swaps the two buffers.

pub mod boundary;
pub mod exchange;
pub mod stencil;

pub use boundary::apply_boundary;
pub use exchange::{ChannelExchange, ExchangeError, HaloExchange, HaloLink, NoopExchange};
pub use stencil::{max_stable_dt, step, step_serial};
