pub mod analysis;
pub mod guard;
pub mod message;

pub use analysis::{
    AggregateRecord, AnalysisPayload, ChartKind, ChartSeries, KNOWN_SERIES, SeriesEntry,
    SeriesSpec, extract_series,
};
pub use guard::{GuardResult, HAZARD_CATEGORIES, SafetyStatus, TextVerdict, hazard_label};
pub use message::{GeoPoint, Message};
