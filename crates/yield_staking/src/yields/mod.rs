//! Yield analytics.
//!
//! Stateless and side-effect free: callers pass principal and rate inputs and
//! get figures back. Nothing here reads the clock or touches pool state.

pub mod compounding;
pub mod metrics;
pub mod optimal;
pub mod projection;

pub use compounding::CompoundingPeriod;
pub use metrics::{calculate_yield_metrics, YieldMetrics};
pub use optimal::{calculate_optimal_compound_period, OptimalCompounding, PeriodApy};
pub use projection::{project_yields, ProjectionPoint, YieldProjection};
