//! Short fixed sequences of model calls used by the travel demos.

pub mod chat;
pub mod route;
pub mod travel;

pub use chat::TravelGuide;
pub use route::{route, RoutedAnswer};
pub use travel::{plan_trip, TripPlan};
