//! Working-set reclamation.
//!
//! [`ReclaimAction`] wraps an OS trim primitive behind a boundary that always
//! returns a [`ReclaimOutcome`]. Errors and panics from the primitive are
//! caught here and logged; reclamation is best-effort and never affects the
//! host's save or load flow.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{info, warn};

use crate::error::Result;

/// Something that can ask the OS to release memory.
pub trait TrimPrimitive {
    /// Run the primitive once.
    ///
    /// # Errors
    /// Returns [`crate::WsgcError::PrimitiveUnavailable`] when the platform has
    /// no such primitive, or [`crate::WsgcError::Primitive`] when it fails.
    fn trim(&self) -> Result<()>;
}

impl<F> TrimPrimitive for F
where
    F: Fn() -> Result<()>,
{
    fn trim(&self) -> Result<()> {
        self()
    }
}

/// The platform's own trim primitive.
///
/// On Windows this is `K32EmptyWorkingSet` on the current process, which
/// pages out as much of the working set as the OS allows. On glibc Linux it
/// is `malloc_trim(0)`, which hands free heap pages back to the kernel. Other
/// platforms report [`crate::WsgcError::PrimitiveUnavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkingSetTrim;

impl TrimPrimitive for WorkingSetTrim {
    #[cfg(windows)]
    fn trim(&self) -> Result<()> {
        use windows_sys::Win32::System::ProcessStatus::K32EmptyWorkingSet;
        use windows_sys::Win32::System::Threading::GetCurrentProcess;

        // SAFETY: the pseudo-handle from GetCurrentProcess needs no closing and
        // is always valid for the calling process.
        let emptied = unsafe { K32EmptyWorkingSet(GetCurrentProcess()) };
        win32_result(emptied != 0, std::io::Error::last_os_error)
    }

    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    fn trim(&self) -> Result<()> {
        // SAFETY: malloc_trim only walks glibc's own arenas and takes no
        // pointers from us.
        let released = unsafe { libc::malloc_trim(0) };
        tracing::debug!(released = released != 0, "malloc_trim");
        Ok(())
    }

    #[cfg(not(any(windows, all(target_os = "linux", target_env = "gnu"))))]
    fn trim(&self) -> Result<()> {
        Err(crate::WsgcError::PrimitiveUnavailable(std::env::consts::OS.to_string()))
    }
}

/// Map a Win32 `BOOL` return onto `Result`, reading the OS error on `FALSE`.
#[cfg(any(windows, test))]
fn win32_result(succeeded: bool, last_error: impl FnOnce() -> std::io::Error) -> Result<()> {
    if succeeded {
        Ok(())
    } else {
        Err(crate::WsgcError::Primitive(last_error().to_string()))
    }
}

/// Result of one reclamation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReclaimOutcome {
    /// The primitive ran.
    Success,
    /// The primitive was unavailable, failed, or panicked.
    Failure(String),
}

impl ReclaimOutcome {
    /// Whether the attempt succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Best-effort reclamation around a [`TrimPrimitive`].
#[derive(Debug, Clone, Default)]
pub struct ReclaimAction<P = WorkingSetTrim> {
    primitive: P,
}

impl<P: TrimPrimitive> ReclaimAction<P> {
    /// Wrap a primitive.
    #[must_use]
    pub fn new(primitive: P) -> Self {
        Self { primitive }
    }

    /// Invoke the primitive exactly once and report the outcome.
    pub fn reclaim(&self) -> ReclaimOutcome {
        let detail = match catch_unwind(AssertUnwindSafe(|| self.primitive.trim())) {
            Ok(Ok(())) => {
                info!("Private working set emptied");
                return ReclaimOutcome::Success;
            }
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };
        warn!(error = %detail, "Error emptying private working set");
        ReclaimOutcome::Failure(detail)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("trim primitive panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("trim primitive panicked: {s}")
    } else {
        "trim primitive panicked".to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::WsgcError;

    #[test]
    fn success_is_reported() {
        let calls = Cell::new(0);
        let action = ReclaimAction::new(|| -> Result<()> {
            calls.set(calls.get() + 1);
            Ok(())
        });
        assert_eq!(action.reclaim(), ReclaimOutcome::Success);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unavailable_primitive_is_a_failure() {
        let action = ReclaimAction::new(|| -> Result<()> {
            Err(WsgcError::PrimitiveUnavailable("plan9".into()))
        });
        let outcome = action.reclaim();
        assert_eq!(
            outcome,
            ReclaimOutcome::Failure("Trim primitive unavailable on plan9".into())
        );
        assert!(!outcome.is_success());
    }

    #[test]
    fn panicking_primitive_is_caught() {
        let action = ReclaimAction::new(|| -> Result<()> { panic!("handle closed") });
        match action.reclaim() {
            ReclaimOutcome::Failure(detail) => assert!(detail.contains("handle closed")),
            ReclaimOutcome::Success => panic!("expected failure"),
        }
    }

    #[test]
    fn platform_primitive_never_escapes() {
        // Succeeds on Windows and glibc, reports unavailable elsewhere.
        let outcome = ReclaimAction::new(WorkingSetTrim).reclaim();
        if cfg!(any(windows, all(target_os = "linux", target_env = "gnu"))) {
            assert!(outcome.is_success());
        } else {
            assert!(!outcome.is_success());
        }
    }

    #[test]
    fn win32_false_is_a_primitive_error() {
        let err = win32_result(false, || std::io::Error::from_raw_os_error(5))
            .expect_err("FALSE must fail");
        assert!(matches!(err, WsgcError::Primitive(_)));
        assert!(win32_result(true, || unreachable!("not read on success")).is_ok());
    }
}
