//! Vertical card carousel: paging engine, derived transforms, pagination dots
//!
//! The engine owns a single continuous `progress` value measured in whole-card
//! units. Everything else on screen is a pure derivation of it, recomputed
//! every frame:
//!
//! - `engine` - progress ownership, gesture handling, paging commits,
//!   settlement events
//! - `transform` - per-card visual transform from (index - progress)
//! - `pagination` - spring-eased dot states following `round(progress)`
//! - `gesture` - mouse drag tracking (cells to card units, release velocity)
//! - `interpolate` - clamped piecewise-linear interpolation, shared by the
//!   transform tracks and widgets
//! - `easing` / `spring` / `timing` - the two animation kinds: time-bounded
//!   eases for paging commits, critically-damped springs for the dots

pub mod easing;
pub mod engine;
pub mod gesture;
pub mod interpolate;
pub mod pagination;
pub mod spring;
pub mod timing;
pub mod transform;

pub use engine::{CarouselEngine, Settlement};
pub use gesture::DragTracker;
pub use pagination::{DotState, PaginationIndicator};
pub use transform::{transform, CardTransform};
