//! Unit tests for the seal document types.

use super::fixtures::valid_vds;
use crate::seal::domain::{
    AdditionalInformation, IssuedSignature, PersonIdentification, Sex, Vds, VdsSignature,
};
use eyre::{Result, ensure};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn seals_decode_from_short_keys() -> Result<()> {
    let vds: Vds = serde_json::from_value(json!({
        "data": {
            "hdr": { "t": "icao.vacc", "v": 1, "is": "AUS" },
            "msg": {
                "uvci": "U32870",
                "pid": { "n": "SMITH  JOHN", "i": "PA0941262", "sex": "M" },
                "ve": [{
                    "des": "XM68M6", "nam": "Comirnaty", "dis": "RA01",
                    "vd": [{ "dvc": "2021-03-03", "seq": 1, "ctr": "AUS",
                             "adm": "General Practitioner", "lot": "A1", "dvn": "2021-04-03" }]
                }]
            }
        },
        "sig": { "alg": "ES256", "cer": "Q0VSVA", "sigvl": "U0lH", "kid": "key-1" }
    }))?;

    ensure!(vds.header().kind.as_deref() == Some("icao.vacc"));
    ensure!(vds.message().person_identification.parsed_sex() == Some(Sex::Male));
    ensure!(vds.message().dose_count() == 1);
    let details = &vds.message().vaccination_events[0].vaccination_details[0];
    ensure!(details.due_date_of_next_dose.as_deref() == Some("2021-04-03"));
    let signature = vds.signature.as_ref().map(|entry| &entry.extensions);
    ensure!(signature.and_then(|extensions| extensions.get("kid")) == Some(&json!("key-1")));
    Ok(())
}

#[rstest]
fn missing_fields_decode_as_absent() -> Result<()> {
    let vds: Vds = serde_json::from_value(json!({
        "data": { "hdr": {}, "msg": { "ve": [{ "vd": [{}] }] } }
    }))?;

    ensure!(vds.header().kind.is_none());
    ensure!(vds.header().version == 0);
    ensure!(vds.message().uvci.is_none());
    ensure!(vds.message().person_identification == PersonIdentification::default());
    ensure!(vds.message().vaccination_events[0].vaccination_details[0].dose_number == 0);
    ensure!(vds.signature.is_none());
    Ok(())
}

#[rstest]
fn signing_overlays_an_existing_signature(valid_vds: Vds) {
    let mut vds = valid_vds.with_signature(
        VdsSignature::default()
            .with_extension("kid", json!("key-1"))
            .with_extension("alg", json!("stale")),
    );

    vds.apply_signature(IssuedSignature::new("ES256", "Q0VSVA", "U0lH"));

    let signature = vds.signature.expect("signature should be set");
    assert_eq!(signature.algorithm.as_deref(), Some("ES256"));
    assert_eq!(signature.value.as_deref(), Some("U0lH"));
    assert_eq!(signature.extensions.get("kid"), Some(&json!("key-1")));
}

#[rstest]
fn signing_creates_a_missing_signature(mut valid_vds: Vds) {
    valid_vds.apply_signature(IssuedSignature::new("ES256", "Q0VSVA", "U0lH"));

    assert_eq!(
        valid_vds.signature,
        Some(VdsSignature::from(IssuedSignature::new("ES256", "Q0VSVA", "U0lH")))
    );
}

#[rstest]
#[case::female("F", Some(Sex::Female))]
#[case::male("M", Some(Sex::Male))]
#[case::unspecified("X", Some(Sex::Unspecified))]
#[case::lowercase("m", None)]
#[case::unknown("Q", None)]
fn sex_codes_parse(#[case] code: &str, #[case] expected: Option<Sex>) {
    assert_eq!(Sex::try_from(code).ok(), expected);
}

#[rstest]
fn sex_codes_are_listed_in_order() {
    assert_eq!(Sex::codes(), vec!["F", "M", "X"]);
}

#[rstest]
fn additional_information_round_trips_typed_values() {
    let mut info = AdditionalInformation::new().with("IsTruncated", true);
    let previous = info.insert("MaxDoses", 3);

    assert!(previous.is_none());
    assert_eq!(info.get_bool("IsTruncated"), Some(true));
    assert_eq!(info.get_u64("MaxDoses"), Some(3));
    assert_eq!(info.get_bool("MaxDoses"), None);
    assert_eq!(info.len(), 2);
    let keys: Vec<&String> = info.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, ["IsTruncated", "MaxDoses"]);
}

#[rstest]
fn additional_information_counts_its_entries() {
    let empty = AdditionalInformation::new();
    let filled = AdditionalInformation::new()
        .with("Locale", "en-AU")
        .with("MaxDoses", 3);

    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);
    assert!(!filled.is_empty());
    assert_eq!(filled.len(), 2);
}
