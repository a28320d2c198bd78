//! Halo exchange between neighbouring workers.
//!
//! Each worker owns four optional [`HaloLink`]s, one per cardinal direction.
//! An exchange sends the worker's own edge strips on every link first, then
//! blocks receiving the neighbours' strips into the ghost border. Sending
//! before receiving keeps the pairwise protocol deadlock-free, and the
//! blocking receives double as the iteration barrier: no worker can start
//! its stencil until every neighbour has published its edge.

use std::error::Error;
use std::fmt;

use crossbeam_channel::{Receiver, Sender};
use hearth_grid::Field;

/// A halo message: one packed edge strip.
pub type Halo = Vec<f64>;

/// Failure of a halo exchange. Both variants are fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// A received strip did not match the ghost extent it was meant to fill.
    SizeMismatch {
        /// Ghost extent of the receiving side.
        expected: usize,
        /// Length of the strip that arrived.
        got: usize,
    },
    /// A neighbour hung up its end of the link mid-run.
    NeighbourGone,
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, got } => write!(
                f,
                "halo strip length mismatch: expected {expected} cells, got {got}"
            ),
            Self::NeighbourGone => write!(f, "neighbouring worker disconnected during exchange"),
        }
    }
}

impl Error for ExchangeError {}

/// Both ends of the channel pair connecting a worker to one neighbour.
#[derive(Debug)]
pub struct HaloLink {
    /// Outgoing strips to the neighbour.
    pub tx: Sender<Halo>,
    /// Incoming strips from the neighbour.
    pub rx: Receiver<Halo>,
}

impl HaloLink {
    /// An unbounded channel pair wired between two workers: `(a_side, b_side)`.
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = crossbeam_channel::unbounded();
        let (b_tx, a_rx) = crossbeam_channel::unbounded();
        (Self { tx: a_tx, rx: a_rx }, Self { tx: b_tx, rx: b_rx })
    }
}

/// Fills a field's ghost border from neighbouring workers.
pub trait HaloExchange {
    /// Publish `field`'s edge strips and fill its ghosts from the
    /// neighbours' strips. Blocks until every linked neighbour has sent.
    fn exchange(&mut self, field: &mut Field) -> Result<(), ExchangeError>;
}

/// Exchange for a worker with no neighbours. The boundary condition owns
/// the whole ghost border, so there is nothing to do.
#[derive(Debug, Default)]
pub struct NoopExchange;

impl HaloExchange for NoopExchange {
    fn exchange(&mut self, _field: &mut Field) -> Result<(), ExchangeError> {
        Ok(())
    }
}

/// Channel-backed exchange over up to four cardinal links.
///
/// `None` in a direction means the subdomain touches the global edge there
/// and the boundary applicator fills that side instead.
#[derive(Debug, Default)]
pub struct ChannelExchange {
    /// Link to the neighbour above.
    pub up: Option<HaloLink>,
    /// Link to the neighbour below.
    pub down: Option<HaloLink>,
    /// Link to the neighbour on the left.
    pub left: Option<HaloLink>,
    /// Link to the neighbour on the right.
    pub right: Option<HaloLink>,
}

impl ChannelExchange {
    fn send_all(&self, field: &Field) -> Result<(), ExchangeError> {
        let rows = field.rows();
        let cols = field.cols();
        if let Some(link) = &self.up {
            link.tx
                .send(field.pack_row(1))
                .map_err(|_| ExchangeError::NeighbourGone)?;
        }
        if let Some(link) = &self.down {
            link.tx
                .send(field.pack_row(rows))
                .map_err(|_| ExchangeError::NeighbourGone)?;
        }
        if let Some(link) = &self.left {
            link.tx
                .send(field.pack_col(1))
                .map_err(|_| ExchangeError::NeighbourGone)?;
        }
        if let Some(link) = &self.right {
            link.tx
                .send(field.pack_col(cols))
                .map_err(|_| ExchangeError::NeighbourGone)?;
        }
        Ok(())
    }

    fn recv(link: &HaloLink, expected: usize) -> Result<Halo, ExchangeError> {
        let strip = link.rx.recv().map_err(|_| ExchangeError::NeighbourGone)?;
        if strip.len() != expected {
            return Err(ExchangeError::SizeMismatch {
                expected,
                got: strip.len(),
            });
        }
        Ok(strip)
    }
}

impl HaloExchange for ChannelExchange {
    fn exchange(&mut self, field: &mut Field) -> Result<(), ExchangeError> {
        let rows = field.rows();
        let cols = field.cols();
        self.send_all(field)?;
        if let Some(link) = &self.up {
            let strip = Self::recv(link, cols)?;
            field.write_ghost_row(0, &strip);
        }
        if let Some(link) = &self.down {
            let strip = Self::recv(link, cols)?;
            field.write_ghost_row(rows + 1, &strip);
        }
        if let Some(link) = &self.left {
            let strip = Self::recv(link, rows)?;
            field.write_ghost_col(0, &strip);
        }
        if let Some(link) = &self.right {
            let strip = Self::recv(link, rows)?;
            field.write_ghost_col(cols + 1, &strip);
        }
        Ok(())
    }
}
