//! # Per-Thread CPU Clock
//!
//! [`ThreadClock`] measures the CPU time consumed by the calling thread. It
//! is read with `clock_gettime(CLOCK_THREAD_CPUTIME_ID)` on POSIX targets
//! that provide a thread CPU-time clock.
//!
//! ## Unsupported platforms
//!
//! When the clock is unavailable (other targets, or the system call fails),
//! [`ThreadClock::now`] returns [`ThreadInstant::UNSUPPORTED`]. That value
//! is a sentinel, not a zero duration: check
//! [`ThreadInstant::is_supported`] before using a reading.
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_clock::ThreadClock;
//!
//! let start = ThreadClock::now();
//! let total: u64 = (0..10_000u64).sum();
//! assert!(total > 0);
//!
//! match ThreadClock::now().duration_since(start) {
//!     Some(cpu) => println!("used {:?} of CPU", cpu),
//!     None => println!("thread CPU clock unsupported"),
//! }
//! ```

use std::fmt;
use std::time::Duration;

/// A reading of the calling thread's CPU-time clock.
///
/// Readings are only comparable when taken on the same thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ThreadInstant {
    cpu_time: Duration,
}

impl ThreadInstant {
    /// Sentinel returned when the clock cannot be read.
    pub const UNSUPPORTED: ThreadInstant = ThreadInstant {
        cpu_time: Duration::ZERO,
    };

    /// Builds a reading from CPU time elapsed since the thread started.
    pub const fn from_cpu_time(cpu_time: Duration) -> Self {
        Self { cpu_time }
    }

    /// Returns `false` for the [`ThreadInstant::UNSUPPORTED`] sentinel.
    #[inline]
    pub fn is_supported(&self) -> bool {
        *self != Self::UNSUPPORTED
    }

    /// CPU time consumed by the thread up to this reading, or `None` for
    /// the sentinel.
    #[inline]
    pub fn cpu_time(&self) -> Option<Duration> {
        self.is_supported().then_some(self.cpu_time)
    }

    /// Nanoseconds of CPU time; `0` for the sentinel.
    #[inline]
    pub fn as_nanos(&self) -> u128 {
        self.cpu_time.as_nanos()
    }

    /// CPU time elapsed between `earlier` and `self`.
    ///
    /// Returns `None` if either reading is the sentinel. Saturates to zero
    /// if `earlier` is later than `self`.
    pub fn duration_since(&self, earlier: ThreadInstant) -> Option<Duration> {
        if !self.is_supported() || !earlier.is_supported() {
            return None;
        }
        Some(self.cpu_time.saturating_sub(earlier.cpu_time))
    }

    /// CPU time consumed by the calling thread since this reading.
    pub fn elapsed(&self) -> Option<Duration> {
        ThreadClock::now().duration_since(*self)
    }
}

impl fmt::Display for ThreadInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_supported() {
            write!(f, "{}ns", self.as_nanos())
        } else {
            write!(f, "unsupported")
        }
    }
}

/// Per-thread CPU-time clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadClock;

impl ThreadClock {
    /// The clock never runs backwards within one thread.
    pub const IS_STEADY: bool = true;

    /// Whether this target has a thread CPU-time clock at all.
    pub const fn is_available() -> bool {
        cfg!(any(
            target_os = "linux",
            target_os = "android",
            target_os = "macos",
            target_os = "ios",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        ))
    }

    /// Reads the calling thread's CPU-time clock.
    ///
    /// Returns [`ThreadInstant::UNSUPPORTED`] if the clock cannot be read.
    pub fn now() -> ThreadInstant {
        match sys::thread_cpu_time() {
            Some(cpu_time) => ThreadInstant::from_cpu_time(cpu_time),
            None => ThreadInstant::UNSUPPORTED,
        }
    }
}

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
))]
mod sys {
    use std::time::Duration;

    pub(crate) fn thread_cpu_time() -> Option<Duration> {
        // SAFETY: timespec is plain old data; all-zero is a valid value.
        let mut ts: libc::timespec = unsafe { std::mem::zeroed() };
        // SAFETY: `ts` is a valid, writable timespec for the duration of the call.
        let rc = unsafe { libc::clock_gettime(libc::CLOCK_THREAD_CPUTIME_ID, &mut ts) };
        if rc != 0 {
            tracing::warn!(
                error = %std::io::Error::last_os_error(),
                "clock_gettime(CLOCK_THREAD_CPUTIME_ID) failed"
            );
            return None;
        }
        let secs = u64::try_from(ts.tv_sec).ok()?;
        let nanos = u32::try_from(ts.tv_nsec).ok()?;
        Some(Duration::new(secs, nanos))
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly"
)))]
mod sys {
    use std::time::Duration;

    pub(crate) fn thread_cpu_time() -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn spin(iterations: u64) -> u64 {
        (0..iterations).fold(0u64, |acc, i| acc.wrapping_mul(31).wrapping_add(i))
    }

    #[test]
    fn test_sentinel_is_unsupported() {
        let sentinel = ThreadInstant::UNSUPPORTED;
        assert!(!sentinel.is_supported());
        assert_eq!(sentinel.cpu_time(), None);
        assert_eq!(sentinel.to_string(), "unsupported");
        assert_eq!(ThreadInstant::default(), sentinel);
    }

    #[test]
    fn test_duration_since_with_sentinel() {
        let reading = ThreadInstant::from_cpu_time(Duration::from_millis(5));
        assert_eq!(reading.duration_since(ThreadInstant::UNSUPPORTED), None);
        assert_eq!(ThreadInstant::UNSUPPORTED.duration_since(reading), None);
    }

    #[test]
    fn test_duration_since_saturates() {
        let early = ThreadInstant::from_cpu_time(Duration::from_millis(5));
        let late = ThreadInstant::from_cpu_time(Duration::from_millis(8));
        assert_eq!(late.duration_since(early), Some(Duration::from_millis(3)));
        assert_eq!(early.duration_since(late), Some(Duration::ZERO));
    }

    #[test]
    fn test_now_matches_availability() {
        let _ = spin(100_000);
        let now = ThreadClock::now();
        assert_eq!(now.is_supported(), ThreadClock::is_available());
    }

    #[test]
    fn test_clock_is_monotonic_within_thread() {
        if !ThreadClock::is_available() {
            return;
        }
        let mut previous = ThreadClock::now();
        for _ in 0..100 {
            std::hint::black_box(spin(1_000));
            let current = ThreadClock::now();
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_clock_advances_with_work() {
        if !ThreadClock::is_available() {
            return;
        }
        let start = ThreadClock::now();
        std::hint::black_box(spin(std::hint::black_box(20_000_000)));
        let used = start.elapsed().unwrap();
        assert!(used > Duration::ZERO);
    }

    #[test]
    fn test_sleeping_thread_uses_little_cpu() {
        if !ThreadClock::is_available() {
            return;
        }
        let used = thread::spawn(|| {
            let start = ThreadClock::now();
            thread::sleep(Duration::from_millis(200));
            start.elapsed().unwrap()
        })
        .join()
        .unwrap();
        assert!(used < Duration::from_millis(150), "sleep consumed {:?} CPU", used);
    }
}
