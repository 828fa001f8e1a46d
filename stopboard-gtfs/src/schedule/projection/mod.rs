mod projection_policy;
mod stop_time_projector;

pub use projection_policy::{ProjectionPolicy, RouteSelection, StopCanonicalization};
pub use stop_time_projector::{project_stop_times, ProjectedStopTime, Projection};
