use serde::Serialize;

/// Severity attached to a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
	/// Informational, no action required.
	Info,
	/// Conversion problem; the current call fails but processing continues.
	Warning,
	/// Unexpected host state; still never fatal to the caller.
	Error,
}

/// Sink receiving advisory diagnostics from the marshalling core.
///
/// Messages never affect control flow; the core reports the same
/// success/failure whether or not anything listens.
pub trait DiagSink {
	/// Receive one message at the given severity.
	fn message(&mut self, severity: Severity, text: &str);
}

/// Sink that discards every message.
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagSink for NullSink {
	fn message(&mut self, _severity: Severity, _text: &str) {}
}

/// Sink forwarding messages to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagSink for TracingSink {
	fn message(&mut self, severity: Severity, text: &str) {
		match severity {
			Severity::Info => tracing::info!(target: "procattr", "{text}"),
			Severity::Warning => tracing::warn!(target: "procattr", "{text}"),
			Severity::Error => tracing::error!(target: "procattr", "{text}"),
		}
	}
}

/// Sink collecting messages in memory, mostly for tests.
#[derive(Debug, Default)]
pub struct VecSink {
	/// Collected `(severity, message)` pairs in arrival order.
	pub messages: Vec<(Severity, String)>,
}

impl DiagSink for VecSink {
	fn message(&mut self, severity: Severity, text: &str) {
		self.messages.push((severity, text.to_owned()));
	}
}
