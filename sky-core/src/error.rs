use std::{error::Error as _, time::Duration};

use thiserror::Error;

/// Every way a lookup can fail. All variants are terminal for the run.
#[derive(Debug, Error)]
pub enum SkyError {
    /// Connection, DNS or I/O failure while talking to a remote API.
    ///
    /// The message includes every cause in the chain, down to the OS error.
    #[error("failed to {action}: {}", source_chain(.source))]
    Transport {
        action: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The shared request deadline elapsed.
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The remote API answered with something other than 200 OK.
    #[error("API returned status {0}")]
    RemoteStatus(u16),

    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The geocoding API returned no results.
    #[error("location not found")]
    NotFound,

    #[error("city name cannot be empty")]
    EmptyCityName,
}

impl SkyError {
    /// Wrap a reqwest error, keeping client-side timeouts distinguishable.
    pub(crate) fn transport(action: &'static str, source: reqwest::Error, budget: Duration) -> Self {
        if source.is_timeout() {
            Self::Timeout(budget)
        } else {
            Self::Transport { action, source }
        }
    }
}

/// `err` followed by each of its causes, separated by ": ".
fn source_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}
