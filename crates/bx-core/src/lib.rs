//! `bx-core`: foundational types for the `rust_boxes` service-counter simulator.
//!
//! This crate is a dependency of every other `bx-*` crate.  It has no `bx-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `CustomerId`, `CounterId`                             |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `RunConfig`, `BoundaryPolicy`, default constants      |
//! | [`rng`]         | `SimRng` (seeded run-level RNG)                       |
//! | [`error`]       | `BxError`, `BxResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BoundaryPolicy, RunConfig, MAX_COUNTERS};
pub use error::{BxError, BxResult};
pub use ids::{CounterId, CustomerId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
