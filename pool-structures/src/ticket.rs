use crate::{Error, Pool, Rider};
use std::fmt;

/// The pass of one rider of a pool
///
/// Its [Display](fmt::Display) is the payload encoded in the QR code:
///
/// ```
/// # use pool_structures::{Pool, Rider};
/// let pool = Pool {
///     id: "pool-001".to_owned(),
///     riders: vec![Rider {
///         name: "Priya Sharma".to_owned(),
///         pickup: "Electronic City".to_owned(),
///         time: "8:15 AM".to_owned(),
///     }],
///     ..Default::default()
/// };
/// let ticket = pool.ticket(0)?;
/// assert_eq!(
///     "RIDE:pool-001|RIDER:Priya Sharma|PICKUP:Electronic City|TIME:8:15 AM",
///     ticket.payload()
/// );
/// # Ok::<(), pool_structures::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ticket<'a> {
    /// The ride
    pub pool: &'a Pool,
    /// The passenger
    pub rider: &'a Rider,
    /// Position of the rider in the pool
    pub index: usize,
}

impl<'a> Ticket<'a> {
    /// `RIDE:<id>|RIDER:<name>|PICKUP:<pickup>|TIME:<time>`. Values are not escaped.
    pub fn payload(&self) -> String {
        self.to_string()
    }

    /// Whether a value holds a delimiter, making the payload impossible to split back.
    ///
    /// The time is the last field, so its own `:` is harmless.
    pub fn is_ambiguous(&self) -> bool {
        let has_delimiter = |s: &str| s.contains(['|', ':']);
        has_delimiter(self.pool.id.as_str())
            || has_delimiter(self.rider.name.as_str())
            || has_delimiter(self.rider.pickup.as_str())
            || self.rider.time.contains('|')
    }
}

impl<'a> fmt::Display for Ticket<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RIDE:{}|RIDER:{}|PICKUP:{}|TIME:{}",
            self.pool.id, self.rider.name, self.rider.pickup, self.rider.time
        )
    }
}

impl Pool {
    /// The ticket of the rider at position `index`
    pub fn ticket(&self, index: usize) -> Result<Ticket<'_>, Error> {
        Ok(Ticket {
            pool: self,
            rider: self.rider(index)?,
            index,
        })
    }

    /// Tickets of all the riders, in order
    pub fn tickets(&self) -> impl Iterator<Item = Ticket<'_>> {
        self.riders
            .iter()
            .enumerate()
            .map(move |(index, rider)| Ticket {
                pool: self,
                rider,
                index,
            })
    }
}
