use bx_core::{BxError, CounterId, CustomerId};
use thiserror::Error;

use crate::Disposition;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] BxError),

    #[error("invalid service-time distribution: {0}")]
    Distribution(String),

    #[error("{counter} is already serving {occupant}")]
    CounterBusy {
        counter:  CounterId,
        occupant: CustomerId,
    },

    #[error("{customer} cannot {action} while {disposition:?}")]
    InvalidTransition {
        customer:    CustomerId,
        disposition: Disposition,
        action:      &'static str,
    },

    #[error("invariant violated: {0}")]
    Invariant(String),
}

pub type SimResult<T> = Result<T, SimError>;
