//! Last error message sink.
//!
//! Every failing public operation in this crate records its message here in addition to
//! returning it, so code that only propagates a status can still report what went wrong.
//! The sink is per thread.

use std::cell::RefCell;

use crate::ValueErr;

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Record `msg` as the most recent error on this thread.
pub fn set_last_error(msg: impl Into<String>) {
    let msg = msg.into();
    LAST_ERROR.with_borrow_mut(|slot| *slot = Some(msg));
}

/// The most recent error recorded on this thread.
pub fn last_error() -> Option<String> {
    LAST_ERROR.with_borrow(Clone::clone)
}

/// Take the most recent error, leaving the sink empty.
pub fn take_last_error() -> Option<String> {
    LAST_ERROR.with_borrow_mut(Option::take)
}

/// Record the error of a failed result and pass the result through.
pub(crate) fn track<T>(res: Result<T, ValueErr>) -> Result<T, ValueErr> {
    if let Err(e) = &res {
        set_last_error(e.to_string());
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_takes() {
        set_last_error("first");
        set_last_error("second");
        assert_eq!(last_error().as_deref(), Some("second"));
        assert_eq!(take_last_error().as_deref(), Some("second"));
        assert_eq!(last_error(), None);
    }

    #[test]
    fn track_records_failures_only() {
        let _ = take_last_error();
        let ok: Result<u8, ValueErr> = track(Ok(1));
        assert!(ok.is_ok());
        assert_eq!(last_error(), None);
        let _ = track::<u8>(Err(ValueErr::NotTerminated));
        assert_eq!(last_error().as_deref(), Some("Input buffer not \\0 terminated"));
    }
}
