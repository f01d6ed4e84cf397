use super::domain::{Period, ShiftSlot, Site};
use chrono::Weekday;

const BLUE_AM: ShiftSlot = ShiftSlot::new("Frankston Blue AM", Site::Main, Period::Am, true);
const YELLOW_AM: ShiftSlot = ShiftSlot::new("Frankston Yellow AM", Site::Main, Period::Am, false);
const PINK_AM: ShiftSlot = ShiftSlot::new("Frankston Pink AM", Site::Main, Period::Am, false);
const BROWN_AM: ShiftSlot = ShiftSlot::new("Frankston Brown AM", Site::Main, Period::Am, false);
const EPIC_AM: ShiftSlot = ShiftSlot::new("Frankston EPIC AM", Site::Main, Period::Am, false);
const GREEN_PM: ShiftSlot = ShiftSlot::new("Frankston Green PM", Site::Main, Period::Pm, true);
const ORANGE_PM: ShiftSlot = ShiftSlot::new("Frankston Orange PM", Site::Main, Period::Pm, false);
const PINK_PM: ShiftSlot = ShiftSlot::new("Frankston Pink PM", Site::Main, Period::Pm, false);
const BROWN_PM: ShiftSlot = ShiftSlot::new("Frankston Brown PM", Site::Main, Period::Pm, false);
const RED_AM: ShiftSlot = ShiftSlot::new("Rosebud Red AM", Site::Satellite, Period::Am, false);
const RED_PM: ShiftSlot = ShiftSlot::new("Rosebud Red PM", Site::Satellite, Period::Pm, false);

/// Priority order: earlier slots get first pick of the day's doctors.
const WEEKDAY_SLOTS: [ShiftSlot; 11] = [
    BLUE_AM, YELLOW_AM, PINK_AM, BROWN_AM, EPIC_AM, GREEN_PM, ORANGE_PM, PINK_PM, BROWN_PM,
    RED_AM, RED_PM,
];

/// Weekends always staff Yellow and Orange as the ordinary roles; no Rosebud PM.
const WEEKEND_SLOTS: [ShiftSlot; 5] = [BLUE_AM, YELLOW_AM, GREEN_PM, ORANGE_PM, RED_AM];

pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

pub fn required_shifts(day: Weekday) -> &'static [ShiftSlot] {
    if is_weekend(day) {
        &WEEKEND_SLOTS
    } else {
        &WEEKDAY_SLOTS
    }
}

/// Every distinct slot the catalog can produce, weekday order.
pub fn all_shifts() -> &'static [ShiftSlot] {
    &WEEKDAY_SLOTS
}
