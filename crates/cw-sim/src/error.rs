use chrono::{DateTime, Utc};
use thiserror::Error;

use cw_core::CallId;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("call {0} is queued more than once")]
    DuplicateCall(CallId),

    #[error(
        "no call could be made in {idle_steps} consecutive steps with {pending} \
         numbers pending (clock at {at}); their calling windows never open"
    )]
    Stalled {
        pending:    usize,
        idle_steps: usize,
        at:         DateTime<Utc>,
    },
}

pub type SimResult<T> = Result<T, SimError>;
