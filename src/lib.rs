//! Interactive exploration of bikeshare trip data for chicago, new york city
//! and washington.
//!
//! A [`Session`] asks for a city and optional month/day filters, loads the
//! city's CSV through [`TripLoader`], prints the time, station, duration and
//! user reports, and optionally pages through the raw trips.

pub mod aggregation;
pub mod collector;
pub mod console;
pub mod error;
pub mod loader;
pub mod raw_view;
pub mod report;
pub mod schema;
pub mod selection;
pub mod session;

pub use console::Console;
pub use error::{BikeshareError, Result};
pub use loader::{TripLoader, TripTable};
pub use selection::{City, DayFilter, FilterSelection, MonthFilter, CITY_DATA};
pub use session::Session;
