//! Generic stack of lexical frames.
//!
//! The same structure backs the type checker (`ScopeStack<Type>`) and the
//! interpreter (`ScopeStack<Value>`). Both are addressed only through the
//! [`Address`]es computed by the resolver, so as long as both passes push and
//! pop frames at the same program points, one address is valid for both.
//!
//! Frames are reference counted: a closure keeps the frame it was declared in
//! alive after the stack has moved past it, and writes through any handle are
//! visible through every other handle to the same frame.

use std::{cell::RefCell, fmt, rc::Rc};

/// Static location of a binding.
///
/// `distance` is the number of parent hops from the current frame and `slot`
/// is the binding's position inside the frame found there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub distance: usize,
    pub slot: usize,
}

impl Address {
    pub fn new(distance: usize, slot: usize) -> Self {
        Address { distance, slot }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.distance, self.slot)
    }
}

/// Storage for one scope. A slot stays `None` until its declaration runs.
struct Frame<T> {
    slots: Vec<Option<T>>,
    parent: Option<FrameRef<T>>,
}

/// Shared handle to a frame.
pub struct FrameRef<T>(Rc<RefCell<Frame<T>>>);

impl<T> FrameRef<T> {
    fn new(parent: Option<FrameRef<T>>) -> Self {
        FrameRef(Rc::new(RefCell::new(Frame {
            slots: Vec::new(),
            parent,
        })))
    }

    fn parent(&self) -> Option<FrameRef<T>> {
        self.0.borrow().parent.clone()
    }

    /// Walks `distance` parents up from this frame.
    fn ancestor(&self, distance: usize) -> Option<FrameRef<T>> {
        let mut frame = self.clone();
        for _ in 0..distance {
            frame = frame.parent()?;
        }
        Some(frame)
    }

    /// Returns `true` when both handles point at the same frame.
    pub fn ptr_eq(&self, other: &FrameRef<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for FrameRef<T> {
    fn clone(&self) -> Self {
        FrameRef(Rc::clone(&self.0))
    }
}

// Frames may be reachable from the values they hold, so the contents are not
// printed.
impl<T> fmt::Debug for FrameRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameRef")
            .field("slots", &self.0.borrow().slots.len())
            .finish()
    }
}

pub struct ScopeStack<T> {
    current: FrameRef<T>,
}

impl<T: Clone> ScopeStack<T> {
    /// Creates a stack holding only the global frame.
    pub fn new() -> Self {
        ScopeStack {
            current: FrameRef::new(None),
        }
    }

    /// Pushes an empty frame on top of the current one.
    pub fn enter_scope(&mut self) {
        self.current = FrameRef::new(Some(self.current.clone()));
    }

    /// Pops the current frame. The global frame is never popped.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.current.parent() {
            self.current = parent;
        }
    }

    /// Handle to the current frame, as captured by closures.
    pub fn current_frame(&self) -> FrameRef<T> {
        self.current.clone()
    }

    /// Pushes an empty frame whose parent is `parent` instead of the current
    /// frame, returning the frame that was current so it can be restored.
    pub fn enter_frame(&mut self, parent: &FrameRef<T>) -> FrameRef<T> {
        std::mem::replace(&mut self.current, FrameRef::new(Some(parent.clone())))
    }

    /// Makes `saved` the current frame again.
    pub fn restore(&mut self, saved: FrameRef<T>) {
        self.current = saved;
    }

    /// Binds `value` to `slot` of the current frame, growing it as needed.
    pub fn define(&self, slot: usize, value: T) {
        let mut frame = self.current.0.borrow_mut();
        if frame.slots.len() <= slot {
            frame.slots.resize(slot + 1, None);
        }
        frame.slots[slot] = Some(value);
    }

    /// Reads the binding at `address`, if it has been defined.
    pub fn get(&self, address: Address) -> Option<T> {
        let frame = self.current.ancestor(address.distance)?;
        let frame = frame.0.borrow();
        frame.slots.get(address.slot).cloned().flatten()
    }

    /// Overwrites an already defined binding. Returns `false` when there is
    /// nothing bound at `address`.
    pub fn assign(&self, address: Address, value: T) -> bool {
        let Some(frame) = self.current.ancestor(address.distance) else {
            return false;
        };
        let mut frame = frame.0.borrow_mut();
        match frame.slots.get_mut(address.slot) {
            Some(entry) if entry.is_some() => {
                *entry = Some(value);
                true
            }
            _ => false,
        }
    }
}

impl<T: Clone> Default for ScopeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}
