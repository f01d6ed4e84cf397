//! Relative undesirability of a slot for a particular doctor.
//!
//! Rules are additive and floored at zero only after all of them apply:
//! leadership +3, satellite +1 (+2 more for the evening) minus the doctor's
//! Rosebud preference, and +2 for any evening shift on a Friday.

use super::domain::{Doctor, Period, ShiftSlot, Site};

const LEADERSHIP: i32 = 3;
const SATELLITE: i32 = 1;
const SATELLITE_EVENING: i32 = 2;
const FRIDAY_EVENING: i32 = 2;

pub fn penalty(slot: &ShiftSlot, doctor: &Doctor, is_friday: bool) -> u32 {
    let mut points = 0i32;

    if slot.is_leadership {
        points += LEADERSHIP;
    }

    if slot.site == Site::Satellite {
        points += SATELLITE;
        if slot.period == Period::Pm {
            points += SATELLITE_EVENING;
        }
        points -= i32::from(doctor.rosebud_preference);
    }

    if is_friday && slot.period == Period::Pm {
        points += FRIDAY_EVENING;
    }

    points.max(0).unsigned_abs()
}
