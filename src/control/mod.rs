//! Closed-loop control — keeps the sensor inside its usable dynamic range.

pub mod ranging;
