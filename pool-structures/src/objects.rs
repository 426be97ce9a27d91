use crate::serde_helpers::*;
use crate::Error;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;

/// Objects that have an identifier implement this trait
pub trait Id {
    /// Identifier of the object
    fn id(&self) -> &str;
}

/// A passenger of a [Pool]
///
/// Riders have no identifier, they are known by their position in [Pool::riders].
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Rider {
    /// Name printed on the ticket
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub name: String,
    /// Name of the stop where the rider is picked up
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub pickup: String,
    /// Pickup time as displayed, e.g. `8:15 AM`. It is never parsed
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub time: String,
}

/// A group of riders sharing one ride
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Pool {
    /// Unique identifier of the pool within its collection, e.g. `pool-001`
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub id: String,
    /// Public name of the ride
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub route_name: String,
    /// Riders, in the order they booked
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub riders: Vec<Rider>,
    /// Cost of the whole ride, in rupees
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub total_cost: f64,
    /// Share of each rider, in rupees. Taken as sent, see [Pool::split_discrepancy]
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub per_person: f64,
    /// Length of the route in kilometers
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub distance: f64,
    /// Duration as displayed, e.g. `1h 15m`
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub duration: String,
    /// Stops visited before the destination
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub pickup_order: Vec<String>,
    /// Where the ride ends
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub destination: String,
    /// ISO-8601 timestamp, only present on completed pools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl Id for Pool {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Pool {
    /// Returns the rider at the given position
    pub fn rider(&self, index: usize) -> Result<&Rider, Error> {
        self.riders.get(index).ok_or_else(|| Error::UnknownRider {
            pool_id: self.id.clone(),
            index,
        })
    }

    /// Difference between [Pool::per_person] and an even split of [Pool::total_cost],
    /// when it is more than half a cent. A pool without riders has nothing to split.
    pub fn split_discrepancy(&self) -> Option<f64> {
        if self.riders.is_empty() {
            return None;
        }
        let even_split = self.total_cost / self.riders.len() as f64;
        let difference = self.per_person - even_split;
        if difference.abs() > 0.005 {
            Some(difference)
        } else {
            None
        }
    }

    /// When the pool was completed, if the timestamp is readable
    pub fn completed_at(&self) -> Option<NaiveDateTime> {
        self.completed_at.as_deref().and_then(parse_timestamp)
    }
}

/// Looks up an object by its id. The first match wins.
pub fn find_by_id<'a, T: Id>(objects: &'a [T], id: &str) -> Result<&'a T, Error> {
    objects
        .iter()
        .find(|o| o.id() == id)
        .ok_or_else(|| Error::UnknownPool(id.to_owned()))
}

/// Body of `GET /api/pools/today` and `GET /api/pools/yesterday`
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct PoolsResponse {
    /// The pools of the day
    pub pools: Vec<Pool>,
    /// Number of pools, as announced by the server
    pub count: Option<u64>,
    /// When the server built the response
    pub generated_at: Option<String>,
}

impl PoolsResponse {
    /// Reads a response body.
    ///
    /// Fails only when the body is not JSON. See [PoolsResponse::from_value] for the rest.
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(body)?;
        Ok(Self::from_value(value))
    }

    /// Builds a response from any JSON value.
    ///
    /// A missing or non-array `pools` gives no pools. Elements of `pools` that are not
    /// pools are skipped.
    pub fn from_value(value: Value) -> Self {
        let mut value = match value {
            Value::Object(map) => map,
            other => {
                log::warn!("pools response is not an object: {other}");
                return Self::default();
            }
        };

        let pools = match value.remove("pools") {
            Some(Value::Array(elements)) => elements
                .into_iter()
                .enumerate()
                .filter_map(|(position, element)| match Pool::deserialize(element) {
                    Ok(pool) => Some(pool),
                    Err(e) => {
                        log::warn!("skipping pool at position {position}: {e}");
                        None
                    }
                })
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                log::warn!("'pools' is not an array: {other}");
                Vec::new()
            }
        };

        PoolsResponse {
            pools,
            count: value.get("count").and_then(Value::as_u64),
            generated_at: value
                .get("generated_at")
                .and_then(Value::as_str)
                .map(str::to_owned),
        }
    }
}
