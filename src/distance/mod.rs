//! Distance measurement between display points

mod calculator;

pub use self::calculator::{Distance, DistanceCalculator, MIN_LATITUDE_FACTOR};
