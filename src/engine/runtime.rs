// src/engine/runtime.rs

use std::fmt;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::errors::Result;
use crate::exec::CompilerBackend;

use super::core::ShaderCompiler;

/// Drives a [`ShaderCompiler`] from the async world: ticks the cooperative
/// update loop on a fixed period until Ctrl-C.
///
/// Each tick runs one `update()` to completion on the current worker thread
/// (via `block_in_place`), so all compiler state stays single-threaded.
pub struct Runtime<C: CompilerBackend> {
    compiler: ShaderCompiler<C>,
    tick: Duration,
}

impl<C: CompilerBackend> fmt::Debug for Runtime<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("compiler", &self.compiler)
            .field("tick", &self.tick)
            .finish()
    }
}

impl<C: CompilerBackend> Runtime<C> {
    pub fn new(compiler: ShaderCompiler<C>, tick: Duration) -> Self {
        Self { compiler, tick }
    }

    /// Main loop. Returns after Ctrl-C, once the in-flight update finished.
    pub async fn run(mut self) -> Result<()> {
        info!("shaderforge runtime started");

        let mut ticker = interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);
        let mut listening = true;

        loop {
            tokio::select! {
                res = &mut shutdown, if listening => {
                    match res {
                        Ok(()) => {
                            info!("shutdown requested; stopping runtime");
                            break;
                        }
                        Err(e) => {
                            warn!(error = %e, "failed to listen for Ctrl+C");
                            listening = false;
                        }
                    }
                }
                _ = ticker.tick() => {
                    tokio::task::block_in_place(|| self.compiler.update());
                }
            }
        }

        info!("runtime exiting");
        Ok(())
    }
}
