//! Driving a live device: the transport seam and the reconcile loop.

use log::{debug, info};
use thiserror::Error;

use crate::apply::apply;
use crate::convergence::check_convergence;
use crate::diff::diff;
use crate::error::Error;
use crate::format::{render, RenderMode};
use crate::parser::parse_with;
use crate::script::Script;
use crate::tree::SectionTree;

/// Failure reported by a [`Device`], typically device error text matched in
/// a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeviceError {
    pub message: String,
}

impl DeviceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Line-oriented connection to a device. Implementations own the transport
/// and decide which responses count as errors.
pub trait Device {
    /// Run one command line and return the device's response.
    fn send(&mut self, line: &str) -> Result<String, DeviceError>;

    /// Return the device's current configuration as export text.
    fn export(&mut self) -> Result<String, DeviceError>;
}

/// Result of a successful [`reconcile`].
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The script that was sent.
    pub script: Script,
    /// Number of wire lines sent, refresh directives included.
    pub lines_sent: usize,
    /// Tree parsed from the device after the script ran.
    pub result: SectionTree,
}

/// Send every wire line of `script` in order, stopping at the first failure.
///
/// Nothing is retried: a failed line leaves the device part-way through the
/// script.
pub fn execute<D: Device + ?Sized>(device: &mut D, script: &Script) -> Result<usize, Error> {
    let mut sent = 0;
    for line in render(script, RenderMode::Wire) {
        debug!("> {line}");
        let response = device
            .send(&line)
            .map_err(|source| Error::Device {
                line: line.clone(),
                source,
            })?;
        if !response.is_empty() {
            debug!("< {}", response.trim_end());
        }
        sent += 1;
    }
    Ok(sent)
}

fn fetch<D: Device + ?Sized>(device: &mut D, target: &SectionTree) -> Result<SectionTree, Error> {
    let text = device.export().map_err(|source| Error::Device {
        line: "/export".to_string(),
        source,
    })?;
    Ok(parse_with(&text, target.order_table().clone())?)
}

/// Bring the device to `target`.
///
/// The script is first checked offline: replaying it on the exported
/// baseline must reach `target`. After sending, the device is exported again
/// and must match the replayed prediction.
pub fn reconcile<D: Device + ?Sized>(device: &mut D, target: &SectionTree) -> Result<Outcome, Error> {
    let base = fetch(device, target)?;
    let script = diff(&base, target)?;
    if script.is_empty() {
        info!("device already matches target");
        return Ok(Outcome {
            script,
            lines_sent: 0,
            result: base,
        });
    }

    let predicted = apply(&base, &script)?;
    check_convergence(&predicted, target)?;

    info!("sending {} command(s)", script.len());
    let lines_sent = execute(device, &script)?;

    let result = fetch(device, target)?;
    check_convergence(&result, &predicted)?;
    Ok(Outcome {
        script,
        lines_sent,
        result,
    })
}
