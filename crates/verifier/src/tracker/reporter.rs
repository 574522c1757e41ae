//! Background reporter for unhandled verifications.
//!
//! Dropped verifiers hand their description and unresolved creation context
//! to a single reporter thread, which symbolises the stack, snapshots the
//! active sink and writes the diagnostic there. Reports are
//! written in the order they were queued.

use std::sync::OnceLock;
use std::thread;

use crossbeam::channel::{self, Sender};

use crate::sink::current_sink;

use super::{format_report, CreationContext};

/// An unconsulted verifier, described but not yet symbolised.
pub(crate) struct Unhandled {
    pub(crate) description: String,
    pub(crate) context: CreationContext,
}

impl Unhandled {
    fn render(mut self) -> String {
        format_report(&self.description, &self.context.render())
    }
}

enum Message {
    Report { unhandled: Unhandled, terminate: bool },
    Flush(Sender<()>),
}

/// `None` when the reporter thread could not be spawned.
static REPORTER: OnceLock<Option<Sender<Message>>> = OnceLock::new();

fn reporter() -> Option<&'static Sender<Message>> {
    REPORTER.get_or_init(spawn_reporter).as_ref()
}

fn spawn_reporter() -> Option<Sender<Message>> {
    let (tx, rx) = channel::unbounded::<Message>();
    let spawned = thread::Builder::new()
        .name("verifier-reporter".to_string())
        .spawn(move || {
            tracing::debug!("unhandled verification reporter started");
            for message in rx {
                match message {
                    Message::Report {
                        unhandled,
                        terminate,
                    } => emit(unhandled, terminate),
                    Message::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });
    match spawned {
        Ok(_) => Some(tx),
        Err(err) => {
            tracing::error!(%err, "failed to spawn reporter; reporting inline");
            None
        }
    }
}

/// Write one diagnostic to the current sink, then terminate if asked to.
fn emit(unhandled: Unhandled, terminate: bool) {
    let text = unhandled.render();
    let sink = current_sink();
    if let Err(err) = sink.write_report(&text) {
        tracing::error!(%err, ?sink, "failed to write unhandled verification report");
    }
    if terminate {
        std::process::exit(1);
    }
}

/// Queue a diagnostic for the reporter thread.
///
/// With `terminate`, the process exits once the diagnostic is written and
/// this call does not return.
pub(crate) fn submit(unhandled: Unhandled, terminate: bool) {
    let Some(tx) = reporter() else {
        emit(unhandled, terminate);
        return;
    };
    tracing::trace!(terminate, "queueing unhandled verification report");
    if let Err(channel::SendError(Message::Report {
        unhandled,
        terminate,
    })) = tx.send(Message::Report {
        unhandled,
        terminate,
    }) {
        emit(unhandled, terminate);
        return;
    }
    if terminate {
        // The reporter exits the process after writing; park until it does.
        flush_unhandled_reports();
        loop {
            thread::park();
        }
    }
}

/// Block until every report queued before this call has been written.
///
/// Useful before process exit, and in tests in place of waiting on drops.
pub fn flush_unhandled_reports() {
    let Some(tx) = reporter() else {
        return;
    };
    let (ack_tx, ack_rx) = channel::bounded(1);
    if tx.send(Message::Flush(ack_tx)).is_ok() {
        let _ = ack_rx.recv();
    }
}
