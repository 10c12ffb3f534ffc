// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Higher level Mutex type and friends.
//!
//! These are modeled after the synchronization primitives in
//! [`std::sync`](https://doc.rust-lang.org/stable/std/sync/index.html),
//! notably `Mutex`, and the associated types.

use core::{
    cell::UnsafeCell,
    fmt,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

use crate::sys::sync as sys;
use crate::time::{Forever, NoWait, Timeout};

/// Until poisoning is implemented, mutexes never return an error, and we
/// just get back the guard.
pub type LockResult<Guard> = Result<Guard, ()>;

/// The return type from [`Mutex::try_lock`].
///
/// The error indicates the reason for the failure.  Until poisoning is
/// implemented, there is only a single type of failure.
pub type TryLockResult<Guard> = Result<Guard, TryLockError>;

/// An enumeration of possible errors associated with a [`TryLockResult`].
#[derive(Debug)]
pub enum TryLockError {
    /// The lock could not be acquired at this time because the operation
    /// would otherwise block (or, for [`Mutex::try_lock_for`], because the
    /// wait timed out).
    WouldBlock,
}

/// A mutual exclusion primitive useful for protecting shared data.
///
/// This mutex will block threads waiting for the lock to become available.
/// It is modeled after
/// [`std::sync::Mutex`](https://doc.rust-lang.org/stable/std/sync/struct.Mutex.html),
/// with the following differences:
/// - Poisoning: not implemented; there is no unwinding to recover from here.
/// - Re-locking: the kernel mutex underneath is not recursive, so a thread
///   that locks a mutex it already holds waits on itself.
/// - Timed acquisition: [`try_lock_for`] bounds the wait, which a
///   fixed-priority system frequently needs.
///
/// Mutexes are thread-context objects; no method of this type may be called
/// from an interrupt handler.
///
/// [`try_lock_for`]: Mutex::try_lock_for
pub struct Mutex<T: ?Sized> {
    pub(crate) inner: sys::Mutex,
    data: UnsafeCell<T>,
}

// At least if correctly done, the Mutex provides for Send and Sync as long
// as the inner data supports Send.
unsafe impl<T: ?Sized + Send> Send for Mutex<T> {}
unsafe impl<T: ?Sized + Send> Sync for Mutex<T> {}

impl<T> fmt::Debug for Mutex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mutex {:?}", self.inner)
    }
}

/// An RAII implementation of a "scoped lock" of a mutex.  When this
/// structure is dropped (falls out of scope), the lock will be unlocked.
///
/// The data protected by the mutex can be accessed through this guard via
/// its [`Deref`] and [`DerefMut`] implementations.
///
/// This structure is created by the [`lock`] and [`try_lock`] methods on
/// [`Mutex`].
///
/// [`lock`]: Mutex::lock
/// [`try_lock`]: Mutex::try_lock
pub struct MutexGuard<'a, T: ?Sized + 'a> {
    pub(crate) lock: &'a Mutex<T>,
    // until <https://github.com/rust-lang/rust/issues/68318> is implemented,
    // we have to mark unsend explicitly.  This can be done by holding
    // Phantom data with an unsafe cell in it.
    _nosend: PhantomData<UnsafeCell<()>>,
}

// Make sure the guard doesn't get sent.
// Negative trait bounds are unstable, see marker above.
unsafe impl<T: ?Sized + Sync> Sync for MutexGuard<'_, T> {}

impl<T> Mutex<T> {
    /// Construct a new wrapped Mutex, using the given underlying sys mutex.
    ///
    /// It is safe to share the underlying Mutex between different items,
    /// but without careful use, it is easy to deadlock, so it is not
    /// recommended.
    pub const fn new_from(t: T, raw_mutex: sys::Mutex) -> Mutex<T> {
        Mutex {
            inner: raw_mutex,
            data: UnsafeCell::new(t),
        }
    }

    /// Construct a new Mutex, allocating the underlying kernel mutex.
    pub fn new(t: T) -> Mutex<T> {
        Mutex::new_from(t, sys::Mutex::new().unwrap())
    }
}

impl<T: ?Sized> Mutex<T> {
    /// Acquires a mutex, blocking the current thread until it is able to do
    /// so.
    ///
    /// This function will block the local thread until it is available to
    /// acquire the mutex.  Upon returning, the thread is the only thread
    /// with the lock held.  An RAII guard is returned to allow scoped
    /// unlock of the lock.  When the guard goes out of scope, the mutex
    /// will be unlocked.
    pub fn lock(&self) -> LockResult<MutexGuard<'_, T>> {
        // With `Forever`, should never return an error.
        self.inner.lock(Forever).unwrap();
        unsafe { Ok(MutexGuard::new(self)) }
    }

    /// Attempts to acquire this lock.
    ///
    /// If the lock could not be acquired at this time, then [`Err`] is
    /// returned.  Otherwise, an RAII guard is returned.  The lock will be
    /// unlocked when the guard is dropped.
    ///
    /// This function does not block.
    pub fn try_lock(&self) -> TryLockResult<MutexGuard<'_, T>> {
        self.try_lock_for(NoWait)
    }

    /// Attempts to acquire this lock, waiting at most `timeout` for the
    /// current holder to release it.
    pub fn try_lock_for<D>(&self, timeout: D) -> TryLockResult<MutexGuard<'_, T>>
    where
        D: Into<Timeout>,
    {
        match self.inner.lock(timeout.into()) {
            Ok(()) => unsafe { Ok(MutexGuard::new(self)) },
            Err(_) => Err(TryLockError::WouldBlock),
        }
    }
}

impl<'mutex, T: ?Sized> MutexGuard<'mutex, T> {
    unsafe fn new(lock: &'mutex Mutex<T>) -> MutexGuard<'mutex, T> {
        MutexGuard {
            lock,
            _nosend: PhantomData,
        }
    }
}

impl<T: ?Sized> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.lock.data.get() }
    }
}

impl<T: ?Sized> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T: ?Sized> Drop for MutexGuard<'_, T> {
    #[inline]
    fn drop(&mut self) {
        self.lock.inner.unlock();
    }
}
