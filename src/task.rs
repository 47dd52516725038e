//! One-shot tasks deferred to the next idle pass of the event loop.

use crate::model::WindowId;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Default,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Move keyboard focus to the window's content view.
    FocusContentView(WindowId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Default)]
pub struct TaskQueue {
    pending: Vec<(TaskHandle, Priority, DeferredTask)>,
    next_handle: u64,
}

pub type SharedTasks = Rc<RefCell<TaskQueue>>;

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, priority: Priority, task: DeferredTask) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        self.pending.push((handle, priority, task));
        handle
    }

    /// Returns false if the task already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _, _)| *h != handle);
        self.pending.len() != before
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|(h, _, _)| *h == handle)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the next task: highest priority first, then oldest.
    pub fn pop(&mut self) -> Option<(TaskHandle, DeferredTask)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .max_by(|(ia, (_, pa, _)), (ib, (_, pb, _))| pa.cmp(pb).then(ib.cmp(ia)))
            .map(|(i, _)| i)?;
        let (handle, _, task) = self.pending.remove(index);
        Some((handle, task))
    }
}
