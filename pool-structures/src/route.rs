use crate::{Pool, Rider};

/// Shown instead of a pickup time when no rider boards at a stop of a scheduled pool
pub const SCHEDULED_PLACEHOLDER: &str = "TBD";
/// Shown instead of a pickup time when no rider boarded at a stop of a completed pool
pub const COMPLETED_PLACEHOLDER: &str = "Completed";

/// Position of a row in the route sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMarker {
    /// Pickup stop, numbered from 1
    Stop(usize),
    /// The destination, always last
    Arrival,
}

/// One line of the route sequence of a [Pool]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRow<'a> {
    /// Stop number or arrival
    pub marker: RowMarker,
    /// Name of the stop or of the destination
    pub place: &'a str,
    /// Pickup time at the stop, or the placeholder. Always `None` for the arrival
    pub time: Option<&'a str>,
}

/// Time of the first rider picked up at `stop`.
///
/// `None` when nobody boards there, or when that first rider has no time.
pub fn pickup_time<'a>(riders: &'a [Rider], stop: &str) -> Option<&'a str> {
    riders
        .iter()
        .find(|r| r.pickup == stop)
        .map(|r| r.time.as_str())
        .filter(|time| !time.is_empty())
}

impl Pool {
    /// The pickup order followed by the destination.
    ///
    /// A stop without a pickup time shows `placeholder`.
    pub fn route_rows<'a>(&'a self, placeholder: &'a str) -> Vec<RouteRow<'a>> {
        let mut rows: Vec<RouteRow> = self
            .pickup_order
            .iter()
            .enumerate()
            .map(|(idx, stop)| RouteRow {
                marker: RowMarker::Stop(idx + 1),
                place: stop,
                time: Some(pickup_time(&self.riders, stop).unwrap_or(placeholder)),
            })
            .collect();

        rows.push(RouteRow {
            marker: RowMarker::Arrival,
            place: &self.destination,
            time: None,
        });
        rows
    }
}
