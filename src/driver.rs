//! Frame loop driver
//!
//! Runs one [`Game::frame`] per display refresh while a run is in progress.
//! The next frame is always held as a [`PendingFrame`]; dropping that handle
//! cancels it, so stopping the loop, dropping the loop, or replacing the
//! pending frame can never leave a stray callback behind.
//!
//! Scheduled callbacks only hold a `Weak` reference back to the loop. A
//! callback that still fires after teardown finds nothing and returns.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::game::Game;
use crate::sim::RunPhase;

/// Work to run on the next frame, given the frame timestamp in ms
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Called after every driven frame (HUD updates, logging)
pub type FrameObserver = Box<dyn FnMut(&Game)>;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("no window to schedule frames on")]
    NoWindow,
    #[error("frame request was refused: {0}")]
    Refused(String),
}

/// Something that can run a callback on the next frame
pub trait FrameScheduler {
    type Handle;

    fn request(&self, callback: FrameCallback) -> Result<Self::Handle, DriverError>;
    fn cancel(&self, handle: &Self::Handle);
}

/// A scheduled frame that is cancelled when dropped
pub struct PendingFrame<S: FrameScheduler> {
    scheduler: Rc<S>,
    handle: Option<S::Handle>,
}

impl<S: FrameScheduler> PendingFrame<S> {
    /// The frame has fired; nothing left to cancel
    fn disarm(mut self) {
        self.handle = None;
    }
}

impl<S: FrameScheduler> Drop for PendingFrame<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(&handle);
        }
    }
}

struct Shared<S: FrameScheduler> {
    game: Rc<RefCell<Game>>,
    scheduler: Rc<S>,
    pending: RefCell<Option<PendingFrame<S>>>,
    observer: RefCell<Option<FrameObserver>>,
}

impl<S: FrameScheduler + 'static> Shared<S> {
    fn schedule(this: &Rc<Self>) -> Result<(), DriverError> {
        let weak: Weak<Self> = Rc::downgrade(this);
        let handle = this.scheduler.request(Box::new(move |time: f64| {
            if let Some(shared) = weak.upgrade() {
                Shared::on_frame(&shared, time);
            }
        }))?;

        // Replacing an older pending frame cancels it
        let previous = this.pending.borrow_mut().replace(PendingFrame {
            scheduler: this.scheduler.clone(),
            handle: Some(handle),
        });
        drop(previous);
        Ok(())
    }

    fn on_frame(this: &Rc<Self>, time: f64) {
        let fired = this.pending.borrow_mut().take();
        if let Some(frame) = fired {
            frame.disarm();
        }

        let phase = this.game.borrow_mut().frame(time);

        if let Some(observer) = this.observer.borrow_mut().as_mut() {
            observer(&this.game.borrow());
        }

        if phase == RunPhase::Running {
            if let Err(e) = Shared::schedule(this) {
                log::error!("Could not schedule next frame: {}", e);
            }
        } else {
            log::info!("Frame loop idle ({:?})", phase);
        }
    }
}

/// Drives a shared [`Game`] from a [`FrameScheduler`]
pub struct FrameLoop<S: FrameScheduler + 'static> {
    shared: Rc<Shared<S>>,
}

impl<S: FrameScheduler + 'static> FrameLoop<S> {
    pub fn new(game: Rc<RefCell<Game>>, scheduler: Rc<S>) -> Self {
        Self {
            shared: Rc::new(Shared {
                game,
                scheduler,
                pending: RefCell::new(None),
                observer: RefCell::new(None),
            }),
        }
    }

    pub fn game(&self) -> &Rc<RefCell<Game>> {
        &self.shared.game
    }

    /// Run `observer` after every driven frame
    pub fn set_observer(&self, observer: FrameObserver) {
        *self.shared.observer.borrow_mut() = Some(observer);
    }

    /// Start a run and begin driving it
    pub fn start(&self, now_ms: f64) -> Result<(), DriverError> {
        self.shared.game.borrow_mut().start(now_ms);
        self.ensure_scheduled()
    }

    /// Restart after a finished run and begin driving it
    pub fn restart(&self, now_ms: f64) -> Result<(), DriverError> {
        self.shared.game.borrow_mut().restart(now_ms);
        self.ensure_scheduled()
    }

    /// Cancel the pending frame, if any
    pub fn stop(&self) {
        let pending = self.shared.pending.borrow_mut().take();
        if pending.is_some() {
            log::info!("Frame loop stopped");
        }
        drop(pending);
    }

    pub fn is_scheduled(&self) -> bool {
        self.shared.pending.borrow().is_some()
    }

    fn ensure_scheduled(&self) -> Result<(), DriverError> {
        let running = self.shared.game.borrow().phase() == RunPhase::Running;
        if running && !self.is_scheduled() {
            Shared::schedule(&self.shared)?;
        }
        Ok(())
    }
}

impl<S: FrameScheduler + 'static> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Scheduler advanced by hand: headless sessions and tests
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<Vec<(u64, FrameCallback)>>,
    next_id: Cell<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback queued before this call. Returns how many ran.
    pub fn fire(&self, time: f64) -> usize {
        let due = std::mem::take(&mut *self.queue.borrow_mut());
        let count = due.len();
        for (_, callback) in due {
            callback(time);
        }
        count
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request(&self, callback: FrameCallback) -> Result<u64, DriverError> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.queue.borrow_mut().push((id, callback));
        Ok(id)
    }

    fn cancel(&self, handle: &u64) {
        self.queue.borrow_mut().retain(|(id, _)| id != handle);
    }
}
