//! Dose priority functions.

use crate::seal::domain::{VaccinationDetails, VaccinationEvent};

/// Ranks doses for truncation. Higher priorities are kept first.
///
/// Implemented for closures taking the same arguments, so a deployment
/// can rank doses by date or brand without a new type.
pub trait DosePriority: Send + Sync {
    /// Returns the priority of `dose`, given its `event` and every event in
    /// the message.
    fn priority(
        &self,
        events: &[VaccinationEvent],
        event: &VaccinationEvent,
        dose: &VaccinationDetails,
    ) -> i64;
}

/// Ranks doses by their dose number.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoseNumberPriority;

impl DosePriority for DoseNumberPriority {
    fn priority(
        &self,
        _: &[VaccinationEvent],
        _: &VaccinationEvent,
        dose: &VaccinationDetails,
    ) -> i64 {
        i64::from(dose.dose_number)
    }
}

impl<F> DosePriority for F
where
    F: Fn(&[VaccinationEvent], &VaccinationEvent, &VaccinationDetails) -> i64 + Send + Sync,
{
    fn priority(
        &self,
        events: &[VaccinationEvent],
        event: &VaccinationEvent,
        dose: &VaccinationDetails,
    ) -> i64 {
        self(events, event, dose)
    }
}
