//! Simulation loop
//!
//! A long-lived background thread that wakes on a fixed period, advances the
//! animation controller, renders a frame and publishes both into the shared
//! state. Work happens on local copies; the lock is only taken to snapshot and
//! to publish.

use anyhow::{Context, Result};
use crossbeam_channel::{select, tick, Receiver, Sender};
use log::{debug, info};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::animation::TickOutcome;
use super::render::{FrameRenderer, Scene};
use super::state::SharedSimulationState;
use super::types::{AnimationState, DEFAULT_TICK_RATE};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickReport {
    /// Nothing changed and the current frame is still valid
    Unchanged,
    /// A new frame (and possibly a new controller state) was published
    Published {
        state: AnimationState,
        outcome: TickOutcome,
    },
    /// A command changed the state mid-tick; this tick's work was dropped
    Preempted,
}

/// Drives the animation forward at a fixed rate
pub struct SimulationLoop {
    state: SharedSimulationState,
    renderer: Arc<dyn FrameRenderer>,
    period: Duration,
}

impl SimulationLoop {
    pub fn new(state: SharedSimulationState, renderer: Arc<dyn FrameRenderer>) -> Self {
        Self {
            state,
            renderer,
            period: period_for_rate(DEFAULT_TICK_RATE),
        }
    }

    /// Set the cadence in ticks per second
    pub fn with_tick_rate(mut self, ticks_per_second: u32) -> Self {
        self.period = period_for_rate(ticks_per_second);
        self
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run exactly one tick
    pub fn step(&self) -> TickReport {
        // Snapshot under the lock
        let (revision, mut controller, grid, needs_frame, tick_number) = {
            let state = self.state.lock();
            let needs_frame = state.frame_revision != Some(state.revision);
            (
                state.revision,
                state.controller.clone(),
                Arc::clone(&state.grid),
                needs_frame,
                state.ticks + 1,
            )
        };

        // Advance and render outside the lock
        let outcome = controller.tick(&grid);
        let changed = !matches!(outcome, TickOutcome::Idle);
        let frame = if changed || needs_frame {
            Some(self.renderer.render(&Scene {
                grid: &grid,
                controller: &controller,
                tick: tick_number,
            }))
        } else {
            None
        };

        // Publish, unless a command got in first
        let mut state = self.state.lock();
        if state.revision != revision {
            debug!(
                "Tick {} preempted (revision {} -> {})",
                tick_number, revision, state.revision
            );
            state.ticks += 1;
            return TickReport::Preempted;
        }

        state.ticks += 1;
        let Some(frame) = frame else {
            return TickReport::Unchanged;
        };

        let animation = controller.state();
        if changed {
            if let TickOutcome::Failed(kind) = outcome {
                state.last_error = Some(kind);
            }
            state.controller = controller;
            state.revision += 1;
        }
        state.frame = Some(frame);
        state.frame_revision = Some(state.revision);

        match outcome {
            TickOutcome::Completed => info!(
                "Problem {} completed after {} moves",
                state.problem_index,
                state.controller.path().moves()
            ),
            TickOutcome::Advanced(coord) => debug!("Tick {}: player at {}", tick_number, coord),
            _ => {}
        }

        TickReport::Published {
            state: animation,
            outcome,
        }
    }

    /// Run the loop on a dedicated thread until the handle is shut down
    pub fn spawn(self) -> Result<LoopHandle> {
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded(1);
        let join = thread::Builder::new()
            .name("simulation-loop".into())
            .spawn(move || self.run(shutdown_rx))
            .context("Failed to spawn simulation loop thread")?;

        Ok(LoopHandle {
            shutdown: shutdown_tx,
            join,
        })
    }

    fn run(self, shutdown: Receiver<()>) {
        info!(
            "Simulation loop started ({:.1} ticks/s)",
            1.0 / self.period.as_secs_f64()
        );
        let ticker = tick(self.period);

        loop {
            select! {
                recv(ticker) -> _ => {
                    self.step();
                }
                recv(shutdown) -> _ => break,
            }
        }

        info!(
            "Simulation loop stopped after {} ticks",
            self.state.lock().ticks
        );
    }
}

/// Handle to a running simulation loop thread
pub struct LoopHandle {
    shutdown: Sender<()>,
    join: JoinHandle<()>,
}

impl LoopHandle {
    /// Ask the loop to stop and wait for it
    pub fn shutdown(self) -> Result<()> {
        // A full or disconnected channel both mean the loop will stop
        let _ = self.shutdown.try_send(());
        self.join
            .join()
            .map_err(|_| anyhow::anyhow!("Simulation loop thread panicked"))
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

fn period_for_rate(ticks_per_second: u32) -> Duration {
    Duration::from_secs(1) / ticks_per_second.max(1)
}
