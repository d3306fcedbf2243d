pub mod raster;

use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::overlay::PoseOverlay;
use crate::overlay::canvas::DrawList;
use crate::types::{CanvasInfo, PoseFrame};

pub use raster::RasterCanvas;

/// Everything the overlay needs for one frame.
#[derive(Clone, Debug)]
pub struct OverlayInput {
    pub frame: PoseFrame,
    pub classification: Vec<String>,
    pub canvas: CanvasInfo,
}

fn run_worker_loop(
    overlay: PoseOverlay,
    input_rx: Receiver<OverlayInput>,
    output_tx: Sender<DrawList>,
) {
    while let Some(input) = recv_latest_input(&input_rx) {
        let list = overlay.render_to_list(&input.frame, &input.classification, &input.canvas);
        match output_tx.try_send(list) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => log::trace!("overlay consumer busy, dropping draw list"),
            Err(TrySendError::Disconnected(_)) => {
                log::info!("overlay consumer gone, stopping worker");
                return;
            }
        }
    }
    log::info!("overlay input closed, stopping worker");
}

/// Blocks for the next input, then skips ahead to the newest one queued.
fn recv_latest_input(input_rx: &Receiver<OverlayInput>) -> Option<OverlayInput> {
    let mut input = input_rx.recv().ok()?;
    while let Ok(newer) = input_rx.try_recv() {
        input = newer;
    }
    Some(input)
}

/// Renders overlays on a dedicated thread until the input channel closes.
pub fn start_overlay_worker(
    overlay: PoseOverlay,
    input_rx: Receiver<OverlayInput>,
    output_tx: Sender<DrawList>,
) -> Result<thread::JoinHandle<()>> {
    log::info!("starting overlay worker: {:?}", overlay.config());

    thread::Builder::new()
        .name("pose-overlay".into())
        .spawn(move || run_worker_loop(overlay, input_rx, output_tx))
        .context("failed to spawn overlay worker thread")
}
