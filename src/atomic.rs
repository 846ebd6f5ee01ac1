use std::sync::atomic::{self, Ordering};

/// Lock-free `f64` cell.
///
/// The value is stored as its IEEE 754 bit pattern in a native atomic, so
/// `get` and `set` are single instructions and `update` is a CAS retry loop.
#[derive(Debug)]
pub struct AtomicF64(atomic::AtomicU64);
impl AtomicF64 {
    pub fn new(value: f64) -> Self {
        AtomicF64(atomic::AtomicU64::new(value.to_bits()))
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::SeqCst))
    }

    #[inline]
    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::SeqCst);
    }

    /// Applies `f` to the current value atomically.
    ///
    /// `f` may run more than once when other writers race this update;
    /// exactly one application is published.
    #[inline]
    pub fn update<F>(&self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        let mut current = self.0.load(Ordering::SeqCst);
        loop {
            let new = f(f64::from_bits(current)).to_bits();
            match self
                .0
                .compare_exchange_weak(current, new, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => break,
                Err(v) => current = v,
            }
        }
    }

    #[inline]
    pub fn add(&self, delta: f64) {
        self.update(|v| v + delta);
    }
}

/// Lock-free `u64` counter cell.
#[derive(Debug)]
pub struct AtomicU64(atomic::AtomicU64);
impl AtomicU64 {
    pub fn new(value: u64) -> Self {
        AtomicU64(atomic::AtomicU64::new(value))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    #[inline]
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}
