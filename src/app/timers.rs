use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::{set_timeout_with_handle, TimeoutHandle};

use crate::scheduler::{Scheduler, TaskId};

/// [`Scheduler`] backed by `window.setTimeout`.
#[derive(Clone, Default)]
pub struct BrowserScheduler {
    next_id: Rc<Cell<u64>>,
    handles: Rc<RefCell<HashMap<TaskId, TimeoutHandle>>>,
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
        let id = TaskId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let handles = Rc::downgrade(&self.handles);
        let fired = move || {
            if let Some(handles) = handles.upgrade() {
                handles.borrow_mut().remove(&id);
            }
            task();
        };
        match set_timeout_with_handle(fired, delay) {
            Ok(handle) => {
                self.handles.borrow_mut().insert(id, handle);
            }
            Err(e) => log::warn!("couldn't schedule timer: {e:?}"),
        }
        id
    }

    fn cancel(&self, id: TaskId) {
        if let Some(handle) = self.handles.borrow_mut().remove(&id) {
            handle.clear();
        }
    }
}
