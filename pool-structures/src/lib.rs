/*! Data model of the Alumni Connect ride pools.

A pool groups a few riders sharing one ride towards a common destination, with a
shared route and a cost split. The pools API serves them in two independent
collections: the pools scheduled for today, and the pools completed yesterday.

This crate brings [serde](https://serde.rs) structures of this model and the small
amount of logic derived from it.

To get started, see [Pool] and [PoolsResponse].

## Design decisions

### Lenient decoding

The API is trusted but not validated. Every field of a [Pool] or a [Rider] falls
back to its default when it is missing or `null`, and a [PoolsResponse] whose
`pools` field is missing or is not an array holds no pools. Only a body that is not
JSON at all is an [Error].

### Values are taken verbatim

[Pool::per_person] is never recomputed from [Pool::total_cost].
[Pool::split_discrepancy] can tell when they disagree, the caller decides what to do.

### Derived views

[RouteRow] pairs each stop of the pickup order with the time of the first rider
picked up there. [Ticket] builds the string scanned from a rider's pass.
*/
#![warn(missing_docs)]

#[macro_use]
extern crate serde_derive;

pub mod error;
mod objects;
mod route;
mod serde_helpers;
mod ticket;


pub use error::Error;
pub use objects::*;
pub use route::*;
pub use ticket::Ticket;
