//! Network conditions for network traces.

mod direction;
mod open;
mod shunt_compensator;
mod step_limit;

pub use direction::DirectionCondition;
pub use open::{stop_at_open, OpenCondition};
pub use shunt_compensator::ShuntCompensatorCondition;
pub use step_limit::{EquipmentStepLimitCondition, EquipmentTypeStepLimitCondition};
