//! JSON string encoding of seals.

use crate::seal::{domain::Vds, error::EncodingError, ports::StringEncoder};

/// Encodes seals as compact JSON with the ICAO short keys.
///
/// The signing payload is the `data` node alone; the barcode payload is
/// the whole seal including its signature. Absent optional fields are
/// omitted and field order follows the type definitions, so equal seals
/// always encode to equal strings.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::adapters::JsonStringEncoder;
/// use visible_seal::seal::domain::{PersonIdentification, PovMessage, Sex, Vds, VdsHeader};
/// use visible_seal::seal::ports::StringEncoder;
///
/// let message = PovMessage::new("U1", PersonIdentification::new("DOE  JANE", Sex::Female));
/// let vds = Vds::new(VdsHeader::new("icao.vacc", "AUS"), message);
///
/// let payload = JsonStringEncoder.encode_for_signing(&vds).expect("encodable");
/// assert!(payload.starts_with(r#"{"hdr":{"t":"icao.vacc","v":1,"is":"AUS"}"#));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStringEncoder;

impl StringEncoder for JsonStringEncoder {
    fn encode_for_signing(&self, vds: &Vds) -> Result<String, EncodingError> {
        Ok(serde_json::to_string(&vds.data)?)
    }

    fn encode_for_barcode(&self, vds: &Vds) -> Result<String, EncodingError> {
        Ok(serde_json::to_string(vds)?)
    }
}
