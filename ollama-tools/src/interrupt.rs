//! Racing work against a long-lived interrupt signal.
//!
//! `tokio::signal::ctrl_c()` replaces the default SIGINT handler the first
//! time it is polled, so a tool that listens for it must keep listening for
//! the rest of its run. Pin one signal future up front and pass it to every
//! [`race`].

use std::future::Future;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Interrupted,
}

/// Runs `work` until it finishes or `interrupt` fires, whichever comes first.
///
/// `work` is dropped when interrupted. Once this returns
/// [`Outcome::Interrupted`], `interrupt` has completed and must not be raced
/// again.
pub async fn race<F, I>(work: F, interrupt: &mut I) -> Outcome<F::Output>
where
    F: Future,
    I: Future + Unpin,
{
    tokio::select! {
        output = work => Outcome::Done(output),
        _ = interrupt => Outcome::Interrupted,
    }
}
