use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{
        format::{Compact, Format, FormatEvent, FormatFields, Writer},
        time::SystemTime,
        FmtContext,
    },
    registry::LookupSpan,
};

/// Indents each event by span depth and tags it with the innermost span,
/// e.g. `  └─[append_record] INFO Creating worksheet 'Staff Biodata'`.
pub struct PrettyFormatter {
    inner: Format<Compact, SystemTime>,
}

impl PrettyFormatter {
    pub fn new(ansi: bool) -> Self {
        Self {
            inner: Format::default()
                .compact()
                .with_ansi(ansi)
                .with_target(false)
                .with_source_location(false),
        }
    }
}

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let (depth, innermost) = match ctx.event_scope() {
            Some(scope) => {
                let spans: Vec<_> = scope.collect();
                (spans.len(), spans.first().map(|span| span.name()))
            }
            None => (0, None),
        };

        write!(writer, "{}", "  ".repeat(depth.saturating_sub(1)))?;
        if let Some(name) = innermost {
            write!(writer, "└─[{}] ", name)?;
        }

        self.inner.format_event(ctx, writer, event)
    }
}
