use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use parallax::Axis;

type Listener = Rc<RefCell<dyn FnMut(f64)>>;

/// A source of scroll offsets, passed explicitly to whatever needs it.
///
/// Offsets are host content offsets in layout pixels: they decrease as the viewport moves
/// down/right.
pub trait ScrollSource {
    fn current_offset(&self, axis: Axis) -> f64;

    /// Registers `callback` for changes on `axis`. Dropping the returned handle unsubscribes.
    fn subscribe(&self, axis: Axis, callback: Box<dyn FnMut(f64)>) -> Subscription;
}

/// Unsubscribe handle returned by [`ScrollSource::subscribe`].
///
/// The callback is removed on [`Subscription::unsubscribe`] or when the handle is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A handle with nothing to tear down.
    pub fn empty() -> Self {
        Self { unsubscribe: None }
    }

    pub fn unsubscribe(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

#[derive(Default)]
struct AxisValue {
    value: f64,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Default)]
struct Shared {
    x: AxisValue,
    y: AxisValue,
}

impl Shared {
    fn axis(&self, axis: Axis) -> &AxisValue {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisValue {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }
}

/// The writable end of a scroll container's offsets.
///
/// There is exactly one `ScrollSignal` per container; contained layers read through cloned
/// [`ScrollReader`]s. Subscribers are only notified when a value actually changes.
pub struct ScrollSignal {
    shared: Rc<RefCell<Shared>>,
}

impl ScrollSignal {
    pub fn new() -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared::default())),
        }
    }

    pub fn reader(&self) -> ScrollReader {
        ScrollReader {
            shared: Rc::clone(&self.shared),
        }
    }

    pub fn offset(&self, axis: Axis) -> f64 {
        self.shared.borrow().axis(axis).value
    }

    /// Stores `value` for `axis` and notifies that axis's subscribers if it changed.
    ///
    /// A callback may call `set` again. Listeners still running further up the stack are not
    /// re-entered; they only observe the nested value through `current_offset`.
    pub fn set(&self, axis: Axis, value: f64) {
        // Snapshot listeners so callbacks run without holding the borrow.
        let listeners: Vec<Listener> = {
            let mut shared = self.shared.borrow_mut();
            let slot = shared.axis_mut(axis);
            if slot.value == value {
                return;
            }
            slot.value = value;
            slot.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        ptrace!(?axis, value, listeners = listeners.len(), "ScrollSignal::set");
        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(value),
                Err(_) => {
                    ptrace!(?axis, value, "ScrollSignal::set: skipped busy listener");
                }
            }
        }
    }

    pub fn set_offsets(&self, x: f64, y: f64) {
        self.set(Axis::X, x);
        self.set(Axis::Y, y);
    }

    pub fn subscriber_count(&self, axis: Axis) -> usize {
        self.shared.borrow().axis(axis).listeners.len()
    }
}

impl Default for ScrollSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScrollSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("ScrollSignal")
            .field("x", &shared.x.value)
            .field("y", &shared.y.value)
            .finish_non_exhaustive()
    }
}

/// A read-only, cloneable view of a [`ScrollSignal`].
#[derive(Clone)]
pub struct ScrollReader {
    shared: Rc<RefCell<Shared>>,
}

impl ScrollSource for ScrollReader {
    fn current_offset(&self, axis: Axis) -> f64 {
        self.shared.borrow().axis(axis).value
    }

    fn subscribe(&self, axis: Axis, callback: Box<dyn FnMut(f64)>) -> Subscription {
        let listener: Listener = Rc::new(RefCell::new(callback));
        let id = {
            let mut shared = self.shared.borrow_mut();
            let slot = shared.axis_mut(axis);
            let id = slot.next_id;
            slot.next_id += 1;
            slot.listeners.push((id, listener));
            id
        };
        ptrace!(?axis, id, "ScrollReader::subscribe");

        let weak: Weak<RefCell<Shared>> = Rc::downgrade(&self.shared);
        Subscription::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared
                .borrow_mut()
                .axis_mut(axis)
                .listeners
                .retain(|(other, _)| *other != id);
            ptrace!(?axis, id, "ScrollReader::unsubscribe");
        })
    }
}

impl fmt::Debug for ScrollReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("ScrollReader")
            .field("x", &shared.x.value)
            .field("y", &shared.y.value)
            .finish()
    }
}
