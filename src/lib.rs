#![allow(clippy::new_without_default)]
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use image::RgbaImage;

use crate::coord::Resolution;
use crate::painter::Hsl;
use crate::render::Renderer;
use crate::viewport::{Command, Viewport};

pub mod bench;
pub mod complex;
pub mod coord;
#[cfg(feature = "gui")]
pub mod gui;
pub mod painter;
pub mod render;
pub mod solver;
pub mod threads;
pub mod viewport;

pub mod defaults {
    use lazy_static::lazy_static;

    use crate::complex::c;
    use crate::coord::Region;

    pub const ITERATION_LIMIT: u32 = 50;

    lazy_static! {
        pub static ref INITIAL_REGION: Region = Region::new(c(-2.0, 1.0), c(1.0, -1.0));
    }
}

/// Owns the viewport state and the render pool; navigation commands mutate
/// the viewport, `render` produces the frame for the current state.
pub struct Explorer {
    resolution: Resolution,
    viewport: Viewport,
    renderer: Renderer,
}

impl Explorer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            resolution: Resolution::new(width, height),
            viewport: Viewport::new(*defaults::INITIAL_REGION, defaults::ITERATION_LIMIT),
            renderer: Renderer::threaded(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.resolution = Resolution::new(width, height);
    }

    pub fn apply(&mut self, command: Command) {
        self.viewport.apply(command);
    }

    pub fn render(&self) -> RgbaImage {
        self.renderer.render(
            &self.viewport.region(),
            self.resolution,
            self.viewport.limit(),
            Hsl,
        )
    }
}

#[derive(Copy, Clone, Debug)]
enum Action {
    Command(Command),
    Resize(usize, usize),
}

/// Runs an Explorer on its own thread: commands in through a channel, the
/// latest finished frame out through a slot the display layer takes from.
/// Only the render thread touches the viewport, and it renders between
/// commands, never mid-command.
pub struct ExplorerWorker {
    tx: Sender<Action>,
    frames: Arc<RwLock<Option<RgbaImage>>>,
    shutdown: Arc<AtomicBool>,
}

impl ExplorerWorker {
    fn spawn(
        rx: Receiver<Action>,
        width: usize,
        height: usize,
        frames: Arc<RwLock<Option<RgbaImage>>>,
        shutdown: Arc<AtomicBool>,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            let mut explorer = Explorer::new(width, height);
            frames.write().unwrap().replace(explorer.render());
            loop {
                if shutdown.load(Ordering::SeqCst) {
                    return;
                }
                match rx.recv_timeout(Duration::from_millis(20)) {
                    Ok(Action::Command(command)) => explorer.apply(command),
                    Ok(Action::Resize(w, h)) => explorer.resize(w, h),
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => return,
                }
                frames.write().unwrap().replace(explorer.render());
            }
        })
    }

    pub fn new(width: usize, height: usize) -> Self {
        let (tx, rx) = channel();
        let frames = Arc::new(RwLock::new(None));
        let shutdown = Arc::new(AtomicBool::new(false));
        Self::spawn(rx, width, height, frames.clone(), shutdown.clone());
        Self {
            tx,
            frames,
            shutdown,
        }
    }

    pub fn command(&self, command: Command) {
        self.tx.send(Action::Command(command)).unwrap();
    }

    pub fn resize(&self, width: usize, height: usize) {
        self.tx.send(Action::Resize(width, height)).unwrap();
    }

    pub fn has_frame(&self) -> bool {
        self.frames.read().unwrap().is_some()
    }

    pub fn next_frame(&self) -> Option<RgbaImage> {
        self.frames.write().unwrap().take()
    }
}

impl Drop for ExplorerWorker {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}
