//! Truncation of over-long vaccination histories.

use super::{DoseNumberPriority, DosePriority};
use crate::seal::{
    domain::{AdditionalInformation, PovMessage, VaccinationDetails, Vds, keys},
    policy::TruncationPolicy,
    ports::Preprocessor,
};
use std::cmp::Reverse;
use std::convert::Infallible;
use tracing::debug;

/// Event and dose counts before and after truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationStats {
    /// Configured maximum dose count.
    pub max_doses: usize,
    /// Events before truncation.
    pub original_event_count: usize,
    /// Doses before truncation.
    pub original_dose_count: usize,
    /// Events after truncation.
    pub truncated_event_count: usize,
    /// Doses after truncation.
    pub truncated_dose_count: usize,
}

impl TruncationStats {
    /// Returns `true` when truncation removed doses.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.original_dose_count != self.truncated_dose_count
    }

    /// Writes the statistics under the truncation keys.
    pub fn record(&self, info: &mut AdditionalInformation) {
        info.insert(keys::IS_TRUNCATED, self.is_truncated());
        info.insert(keys::MAX_DOSES, self.max_doses);
        info.insert(keys::ORIGINAL_EVENT_COUNT, self.original_event_count);
        info.insert(keys::ORIGINAL_DOSE_COUNT, self.original_dose_count);
        info.insert(keys::TRUNCATED_EVENT_COUNT, self.truncated_event_count);
        info.insert(keys::TRUNCATED_DOSE_COUNT, self.truncated_dose_count);
    }
}

/// A dose paired with its event and position in the flattened history.
struct RankedDose<'a> {
    event_index: usize,
    encounter: usize,
    priority: i64,
    dose: &'a VaccinationDetails,
}

/// Preprocessor that keeps at most `max_doses` doses of highest priority.
///
/// Kept doses are presented in ascending dose-number order, grouped under
/// their original events. Each event is placed where its lowest kept dose
/// falls in that order. Events left without doses are dropped. Equal
/// priorities are broken by encounter order, so the result is fully
/// determined by the input.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::domain::{
///     AdditionalInformation, PersonIdentification, PovMessage, Sex, VaccinationDetails,
///     VaccinationEvent, Vds, VdsHeader,
/// };
/// use visible_seal::seal::policy::TruncationPolicy;
/// use visible_seal::seal::ports::Preprocessor;
/// use visible_seal::seal::preprocess::DoseTruncator;
///
/// let dose = |n| VaccinationDetails::new("2021-03-03", n, "AUS", "GP", "A1");
/// let event = VaccinationEvent::new("RA01", "XM68M6", "Comirnaty")
///     .with_dose(dose(1))
///     .with_dose(dose(2))
///     .with_dose(dose(3));
/// let message = PovMessage::new("U1", PersonIdentification::new("DOE  JANE", Sex::Female))
///     .with_event(event);
/// let mut vds = Vds::new(VdsHeader::new("icao.vacc", "AUS"), message);
/// let mut info = AdditionalInformation::new();
///
/// let truncator = DoseTruncator::new(TruncationPolicy::max_doses(2));
/// truncator.process(&mut vds, &mut info).expect("infallible");
///
/// let kept: Vec<i32> = vds.message().vaccination_events[0]
///     .vaccination_details
///     .iter()
///     .map(|d| d.dose_number)
///     .collect();
/// assert_eq!(kept, vec![2, 3]);
/// assert_eq!(info.get_bool("IsTruncated"), Some(true));
/// ```
#[derive(Debug, Clone)]
pub struct DoseTruncator<P = DoseNumberPriority> {
    policy: TruncationPolicy,
    priority: P,
}

impl DoseTruncator {
    /// Creates a truncator ranking doses by dose number.
    #[must_use]
    pub const fn new(policy: TruncationPolicy) -> Self {
        Self {
            policy,
            priority: DoseNumberPriority,
        }
    }
}

impl<P: DosePriority> DoseTruncator<P> {
    /// Creates a truncator with a custom priority function.
    #[must_use]
    pub const fn with_priority(policy: TruncationPolicy, priority: P) -> Self {
        Self { policy, priority }
    }

    /// Returns the truncation policy.
    #[must_use]
    pub const fn policy(&self) -> &TruncationPolicy {
        &self.policy
    }

    /// Truncates the message in place.
    ///
    /// Returns `None`, leaving the message untouched, when truncation is
    /// disabled or the message already fits.
    pub fn truncate(&self, message: &mut PovMessage) -> Option<TruncationStats> {
        let max_doses = self.policy.max_doses;
        let original_dose_count = message.dose_count();
        if !self.policy.is_active() || original_dose_count <= max_doses {
            return None;
        }
        let original_event_count = message.event_count();

        let events = &message.vaccination_events;
        let mut ranked: Vec<RankedDose<'_>> = events
            .iter()
            .enumerate()
            .flat_map(|(event_index, event)| {
                event
                    .vaccination_details
                    .iter()
                    .map(move |dose| (event_index, event, dose))
            })
            .enumerate()
            .map(|(encounter, (event_index, event, dose))| RankedDose {
                event_index,
                encounter,
                priority: self.priority.priority(events, event, dose),
                dose,
            })
            .collect();

        ranked.sort_by_key(|entry| (Reverse(entry.priority), entry.encounter));
        ranked.truncate(max_doses);
        ranked.sort_by_key(|entry| (entry.dose.dose_number, entry.encounter));

        // Events appear in the order their lowest kept dose does.
        let mut event_order: Vec<usize> = Vec::new();
        for entry in &ranked {
            if !event_order.contains(&entry.event_index) {
                event_order.push(entry.event_index);
            }
        }

        let regrouped: Vec<_> = event_order
            .into_iter()
            .filter_map(|event_index| {
                let kept: Vec<VaccinationDetails> = ranked
                    .iter()
                    .filter(|entry| entry.event_index == event_index)
                    .map(|entry| entry.dose.clone())
                    .collect();
                events
                    .get(event_index)
                    .map(|event| event.with_details(kept))
            })
            .collect();

        message.vaccination_events = regrouped;

        Some(TruncationStats {
            max_doses,
            original_event_count,
            original_dose_count,
            truncated_event_count: message.event_count(),
            truncated_dose_count: message.dose_count(),
        })
    }
}

impl<P: DosePriority> Preprocessor for DoseTruncator<P> {
    type Error = Infallible;

    fn process(&self, vds: &mut Vds, info: &mut AdditionalInformation) -> Result<(), Self::Error> {
        if let Some(stats) = self.truncate(vds.message_mut()) {
            stats.record(info);
            debug!(
                max_doses = stats.max_doses,
                original_doses = stats.original_dose_count,
                kept_doses = stats.truncated_dose_count,
                original_events = stats.original_event_count,
                kept_events = stats.truncated_event_count,
                "truncated vaccination history"
            );
        }
        Ok(())
    }
}
