use crate::Vec;

/// Operand stack with a maximum size enforced in debug builds.
///
/// The VM sizes the stack from [`Code::max_stack_size`](super::Code), which
/// the emitter computes exactly, so exceeding it means the depth bookkeeping
/// is wrong. Release builds skip the check.
///
/// # Examples
///
/// ```ignore
/// let mut stack = Stack::new(2);
/// stack.push(1.0);
/// stack.push(2.0);
/// assert_eq!(stack.pop(), Some(2.0));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Debug)]
pub struct Stack<T> {
    items: Vec<T>,
    /// Enforced in debug mode only.
    max_size: usize,
}

impl<T> Stack<T> {
    /// Create an empty stack able to hold `max_size` values without
    /// reallocating.
    pub fn new(max_size: usize) -> Self {
        Self {
            items: Vec::with_capacity(max_size),
            max_size,
        }
    }

    /// # Panics
    ///
    /// Panics in debug mode if the stack is already at maximum capacity.
    #[inline]
    pub fn push(&mut self, value: T) {
        debug_assert!(
            self.items.len() < self.max_size,
            "Stack overflow: attempted to push beyond maximum size of {}",
            self.max_size
        );
        self.items.push(value);
    }

    /// Returns `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all values, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
