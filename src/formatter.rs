//! Tracing formatter that stamps each line with the simulation frame

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::macros::format_description;
use time::{format_description::FormatItem, OffsetDateTime};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Frames simulated since startup
static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Frame numbers wrap at 16 bits when displayed
const FRAME_DISPLAY_MASK: u64 = 0xFFFF;

const CLOCK: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

/// ANSI treatment of one piece of a log line.
#[derive(Clone, Copy)]
enum Style {
    Dim,
    Bold,
    Color(&'static str),
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Dim => "\x1b[2m",
            Style::Bold => "\x1b[1m",
            Style::Color(code) => code,
        }
    }

    fn write(self, writer: &mut Writer<'_>, value: impl fmt::Display) -> fmt::Result {
        if writer.has_ansi_escapes() {
            write!(writer, "{}{}\x1b[0m", self.code(), value)
        } else {
            write!(writer, "{}", value)
        }
    }
}

fn level_style(level: &Level) -> (Style, &'static str) {
    match *level {
        Level::TRACE => (Style::Color("\x1b[35m"), "TRACE"),
        Level::DEBUG => (Style::Color("\x1b[34m"), "DEBUG"),
        Level::INFO => (Style::Color("\x1b[32m"), " INFO"),
        Level::WARN => (Style::Color("\x1b[33m"), " WARN"),
        Level::ERROR => (Style::Color("\x1b[31m"), "ERROR"),
    }
}

/// Wall-clock time, frame number in hex, level, span path, target, fields.
///
/// ```text
/// 14:02:11.0831 f01A3  INFO quiz_platformer::systems::scene: Entering scene scene="Lost"
/// ```
pub struct FrameFormatter;

impl<S, N> FormatEvent<S, N> for FrameFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let clock = OffsetDateTime::now_utc().format(&CLOCK).map_err(|_| fmt::Error)?;
        let frame = frame_count() & FRAME_DISPLAY_MASK;
        Style::Dim.write(&mut writer, format_args!("{clock} f{frame:04X}"))?;
        writer.write_char(' ')?;

        let (style, label) = level_style(meta.level());
        style.write(&mut writer, label)?;
        writer.write_char(' ')?;

        for span in ctx.event_scope().into_iter().flat_map(|scope| scope.from_root()) {
            Style::Bold.write(&mut writer, span.name())?;
            if let Some(fields) = span.extensions().get::<FormattedFields<N>>() {
                if !fields.is_empty() {
                    write!(writer, "{{{}}}", fields)?;
                }
            }
            writer.write_str(": ")?;
        }

        Style::Dim.write(&mut writer, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Advances the frame counter; called once per simulated frame.
pub fn increment_frame() {
    FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn frame_count() -> u64 {
    FRAME_COUNTER.load(Ordering::Relaxed)
}
