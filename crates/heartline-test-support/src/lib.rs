//! Shared test doubles for Heartline.

mod clock;
mod dispatch;
mod report;

pub use clock::FixedClock;
pub use dispatch::RecordingDispatcher;
pub use report::{
    FailingReportRepository, FailingReportSink, RecordingReportRepository, RecordingReportSink,
};
