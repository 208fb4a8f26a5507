// self
use crate::{_prelude::*, obs::Operation};

/// Future returned by [`RequestSpan::instrument`] with tracing enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`RequestSpan::instrument`]; the input future itself.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Span wrapping a single client operation.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"mercadolibre_oauth2.request",
				operation = operation.as_str(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Runs `fut` inside the span; the span is entered on every poll, never held across awaits.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for a classified provider error inside the current span.
pub fn trace_provider_error(http_status: Option<u16>, code: &dyn Display) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(http_status, code = %code, "provider reported an error");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (http_status, code);
	}
}
