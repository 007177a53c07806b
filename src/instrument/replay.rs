//! History Replay
//!
//! Rebuilds a readable call trace from the recorded history lists.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::error::{CacheError, Result};
use crate::instrument::OpId;
use crate::store::KeyStore;

/// One recorded call: argument and result representations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

// == Call Trace ==
/// Replayed history of one operation.
///
/// Renders as a header line followed by one line per recorded call:
///
/// ```text
/// Cache.store was called 2 times:
/// Cache.store("foo") -> 1f0e...
/// Cache.store("bar") -> 7ab2...
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CallTrace {
    /// Operation name
    pub op: String,
    /// Number of recorded calls (length of the input history)
    pub calls: usize,
    /// Number of recorded outputs
    pub outputs: usize,
    /// Inputs paired with outputs by position
    pub records: Vec<CallRecord>,
}

impl CallTrace {
    /// True when every recorded input has a matching output.
    pub fn is_aligned(&self) -> bool {
        self.calls == self.outputs
    }

    /// Serializes the trace as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CacheError::Conversion(e.to_string()))
    }

    /// Prints the trace to stdout.
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for CallTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.op, self.calls)?;
        for record in &self.records {
            writeln!(f, "{}({}) -> {}", self.op, record.input, record.output)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Reads the full input and output history of `op` and pairs them up.
///
/// Lists of unequal length (a call failed or is still in flight) are paired
/// over their common prefix and a warning is logged.
pub async fn replay(store: &dyn KeyStore, op: OpId) -> Result<CallTrace> {
    let inputs = store.lrange(&op.inputs_key(), 0, -1).await?;
    let outputs = store.lrange(&op.outputs_key(), 0, -1).await?;

    if inputs.len() != outputs.len() {
        warn!(
            op = op.name(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            "call history is misaligned, showing common prefix"
        );
    }

    let calls = inputs.len();
    let output_count = outputs.len();
    let records = inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| CallRecord { input, output })
        .collect();

    Ok(CallTrace {
        op: op.name().to_string(),
        calls,
        outputs: output_count,
        records,
    })
}
