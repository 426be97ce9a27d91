use crate::page::Page;
use crate::qr;
use crate::view_state::TodayView;
use chrono::NaiveDateTime;
use pool_structures::{Pool, RowMarker, Ticket, COMPLETED_PLACEHOLDER, SCHEDULED_PLACEHOLDER};
use std::fmt::{Display, Formatter};

pub const LOADING: &str = "Loading pools...";
pub const NO_POOLS_TODAY: &str = "No pools scheduled for today";
pub const NO_POOLS_YESTERDAY: &str = "No pools completed yesterday";

struct Rupees(f64);

impl Display for Rupees {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{:.2}", self.0)
    }
}

/// `Jan 15, 2024, 9:25:00 AM`
struct CompletedAt(NaiveDateTime);

impl Display for CompletedAt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%b %-d, %Y, %-I:%M:%S %p"))
    }
}

fn write_summary(f: &mut Formatter<'_>, pool: &Pool) -> std::fmt::Result {
    writeln!(
        f,
        "   {} riders | {} km | {} | {}/person",
        pool.riders.len(),
        pool.distance,
        pool.duration,
        Rupees(pool.per_person)
    )
}

/// Pickup stops then the destination. Completed routes check every stop.
struct RouteFormatter<'a> {
    pool: &'a Pool,
    completed: bool,
}

impl<'a> Display for RouteFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let placeholder = if self.completed {
            COMPLETED_PLACEHOLDER
        } else {
            SCHEDULED_PLACEHOLDER
        };

        for row in self.pool.route_rows(placeholder) {
            match row.marker {
                RowMarker::Stop(n) if !self.completed => {
                    write!(f, "     {n:>2}. {}", row.place)?;
                }
                RowMarker::Stop(_) | RowMarker::Arrival => write!(f, "      ✓ {}", row.place)?,
            }
            match row.time {
                Some(time) => writeln!(f, "  ({time})")?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

struct TicketFormatter<'a> {
    ticket: Ticket<'a>,
}

impl<'a> Display for TicketFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Ticket { pool, rider, .. } = self.ticket;
        writeln!(f, "   Ride Ticket")?;
        writeln!(f, "     Passenger:   {}", rider.name)?;
        writeln!(f, "     Ride ID:     {}", pool.id)?;
        writeln!(f, "     Pickup:      {}", rider.pickup)?;
        writeln!(f, "     Time:        {}", rider.time)?;
        writeln!(f, "     Destination: {}", pool.destination)?;
        match qr::to_terminal(&self.ticket) {
            Ok(drawing) => {
                for line in drawing.lines() {
                    writeln!(f, "     {line}")?;
                }
            }
            Err(e) => writeln!(f, "     QR pass unavailable: {e}")?,
        }
        writeln!(f, "     Show this QR code at your pickup location")
    }
}

pub struct TodayFormatter<'a> {
    pub page: &'a Page,
    pub view: &'a TodayView,
}

impl<'a> TodayFormatter<'a> {
    fn format_pool(&self, pool: &Pool, f: &mut Formatter<'_>) -> std::fmt::Result {
        let route_open = self.view.is_route_open(pool);
        writeln!(f, "== {} [{}] ==", pool.route_name, pool.id)?;
        write_summary(f, pool)?;

        if route_open {
            writeln!(f, "   Optimized Route Map")?;
            write!(
                f,
                "{}",
                RouteFormatter {
                    pool,
                    completed: false
                }
            )?;
            writeln!(
                f,
                "   Total Distance: {} km | Total Cost: {} | Per Person: {}",
                pool.distance,
                Rupees(pool.total_cost),
                Rupees(pool.per_person)
            )?;
        }

        writeln!(f, "   Riders & QR Passes")?;
        for (idx, rider) in pool.riders.iter().enumerate() {
            writeln!(
                f,
                "     [{idx}] {} | {} | {}",
                rider.name, rider.pickup, rider.time
            )?;
        }

        if let Some(ticket) = self
            .view
            .open_ticket(pool)
            .and_then(|idx| pool.ticket(idx).ok())
        {
            write!(f, "{}", TicketFormatter { ticket })?;
        }
        Ok(())
    }
}

impl<'a> Display for TodayFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.page.is_loading() {
            return writeln!(f, "{LOADING}");
        }
        if self.page.today().is_empty() {
            return writeln!(f, "{NO_POOLS_TODAY}");
        }

        writeln!(f, "Today's Pooled Rides")?;
        writeln!(
            f,
            "Automatically generated rider groups with optimized routes and cost splitting"
        )?;
        for pool in self.page.today() {
            writeln!(f)?;
            self.format_pool(pool, f)?;
        }
        Ok(())
    }
}

pub struct YesterdayFormatter<'a> {
    pub page: &'a Page,
}

impl<'a> YesterdayFormatter<'a> {
    fn format_pool(pool: &Pool, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== ✓ {} [{}] COMPLETED ==", pool.route_name, pool.id)?;
        if let Some(raw) = &pool.completed_at {
            match pool.completed_at() {
                Some(date) => writeln!(f, "   Completed: {}", CompletedAt(date))?,
                None => writeln!(f, "   Completed: {raw}")?,
            }
        }
        write_summary(f, pool)?;

        writeln!(f, "   Executed Route")?;
        write!(
            f,
            "{}",
            RouteFormatter {
                pool,
                completed: true
            }
        )?;

        writeln!(f, "   Riders")?;
        for rider in &pool.riders {
            writeln!(
                f,
                "     {} | {} • {} | {} paid",
                rider.name,
                rider.pickup,
                rider.time,
                Rupees(pool.per_person)
            )?;
        }
        Ok(())
    }
}

impl<'a> Display for YesterdayFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.page.is_loading() {
            return writeln!(f, "{LOADING}");
        }

        writeln!(f, "Yesterday's Pools")?;
        writeln!(
            f,
            "Proves automation worked overnight: agents ran to form groups, compute routes, and schedule reminders"
        )?;
        writeln!(f, "✓ All pools completed successfully")?;

        if self.page.yesterday().is_empty() {
            writeln!(f)?;
            return writeln!(f, "{NO_POOLS_YESTERDAY}");
        }
        for pool in self.page.yesterday() {
            writeln!(f)?;
            YesterdayFormatter::format_pool(pool, f)?;
        }
        Ok(())
    }
}
