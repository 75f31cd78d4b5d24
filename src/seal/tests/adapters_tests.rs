//! Unit tests for encoders, signers and renderers.

use super::fixtures::valid_vds;
use crate::seal::{
    adapters::{
        BarcodeFormat, BarcodeOnlyDocumentRenderer, DemoSigner, HtmlDocumentRenderer,
        JsonStringEncoder, PayloadBarcodeRenderer,
    },
    domain::{AdditionalInformation, BarcodeResult, IssuedSignature, Vds, keys},
    error::RenderError,
    ports::{BarcodeRenderer, DocumentRenderer, Signer, StringEncoder},
};
use camino::Utf8PathBuf;
use eyre::{Result, ensure, eyre};
use rstest::rstest;

const SIGNING_PAYLOAD: &str = concat!(
    r#"{"hdr":{"t":"icao.vacc","v":1,"is":"AUS"},"#,
    r#""msg":{"uvci":"U32870","pid":{"n":"SMITH  JOHN","dob":"1980-01-31","sex":"M"},"#,
    r#""ve":[{"des":"XM68M6","nam":"Comirnaty","dis":"RA01","vd":["#,
    r#"{"dvc":"2021-03-03","seq":1,"ctr":"AUS","adm":"General Practitioner","lot":"LOT1"},"#,
    r#"{"dvc":"2021-03-03","seq":2,"ctr":"AUS","adm":"General Practitioner","lot":"LOT2"}"#,
    r#"]}]}}"#
);

fn signed(mut vds: Vds) -> Vds {
    vds.apply_signature(IssuedSignature::new("ES256", "Q0VSVA", "U0lH"));
    vds
}

fn text_barcode(text: &str) -> BarcodeResult {
    BarcodeResult::new(text.as_bytes().to_vec(), "text")
}

// ============================================================================
// Encoding
// ============================================================================

#[rstest]
fn signing_payload_is_the_data_node(valid_vds: Vds) -> Result<()> {
    let payload = JsonStringEncoder.encode_for_signing(&signed(valid_vds))?;

    ensure!(payload == SIGNING_PAYLOAD, "payload was {payload}");
    Ok(())
}

#[rstest]
fn barcode_payload_wraps_data_and_signature(valid_vds: Vds) -> Result<()> {
    let payload = JsonStringEncoder.encode_for_barcode(&signed(valid_vds))?;

    let expected = format!(
        r#"{{"data":{SIGNING_PAYLOAD},"sig":{{"alg":"ES256","cer":"Q0VSVA","sigvl":"U0lH"}}}}"#
    );
    ensure!(payload == expected, "payload was {payload}");
    Ok(())
}

#[rstest]
fn unsigned_barcode_payload_omits_signature(valid_vds: Vds) -> Result<()> {
    let payload = JsonStringEncoder.encode_for_barcode(&valid_vds)?;

    ensure!(!payload.contains("\"sig\""));
    Ok(())
}

#[rstest]
fn equal_seals_encode_identically(valid_vds: Vds) -> Result<()> {
    let first = JsonStringEncoder.encode_for_barcode(&valid_vds)?;
    let second = JsonStringEncoder.encode_for_barcode(&valid_vds.clone())?;

    ensure!(first == second);
    Ok(())
}

// ============================================================================
// Barcodes
// ============================================================================

#[rstest]
#[case::canonical("text")]
#[case::upper("TEXT")]
#[case::short("txt")]
fn text_format_names_parse(#[case] name: &str) {
    assert_eq!(BarcodeFormat::parse(name).ok(), Some(BarcodeFormat::Text));
}

#[rstest]
#[case::png("png")]
#[case::svg("svg")]
#[case::empty("")]
fn other_format_names_are_unsupported(#[case] name: &str) {
    assert!(matches!(
        BarcodeFormat::parse(name),
        Err(RenderError::UnsupportedFormat(found)) if found == name
    ));
}

#[rstest]
fn payload_renderer_emits_the_barcode_payload(valid_vds: Vds) -> Result<()> {
    let vds = signed(valid_vds);
    let renderer = PayloadBarcodeRenderer::new().with_format_name("Text")?;

    let barcode = renderer.render(&vds)?;

    ensure!(barcode.format == "text");
    ensure!(barcode.as_text() == Some(JsonStringEncoder.encode_for_barcode(&vds)?.as_str()));
    Ok(())
}

#[rstest]
fn payload_renderer_rejects_raster_formats() {
    let result = PayloadBarcodeRenderer::new().with_format_name("png");

    assert!(matches!(result, Err(RenderError::UnsupportedFormat(_))));
}

// ============================================================================
// Documents
// ============================================================================

#[rstest]
fn barcode_only_document_is_the_barcode(valid_vds: Vds) -> Result<()> {
    let info = AdditionalInformation::new().with("Locale", "en-AU");

    let document = BarcodeOnlyDocumentRenderer.render(
        valid_vds.clone(),
        text_barcode("PAYLOAD"),
        info.clone(),
    )?;

    ensure!(document.bytes == b"PAYLOAD");
    ensure!(document.format == "text");
    ensure!(document.vds == valid_vds);
    ensure!(document.additional_information == info);
    Ok(())
}

#[rstest]
fn built_in_certificate_shows_holder_and_doses(valid_vds: Vds) -> Result<()> {
    let html = HtmlDocumentRenderer::new().render_html(
        &signed(valid_vds),
        &text_barcode("PAYLOAD"),
        &AdditionalInformation::new(),
    )?;

    ensure!(html.contains("SMITH  JOHN"));
    ensure!(html.contains("1980-01-31"));
    ensure!(html.contains("Comirnaty (RA01)"));
    ensure!(html.contains("LOT2"));
    ensure!(html.contains("Barcode format: text (7 bytes)"));
    ensure!(html.contains("PAYLOAD"));
    ensure!(!html.contains("recorded doses"));
    Ok(())
}

#[rstest]
fn built_in_certificate_reports_truncation(valid_vds: Vds) -> Result<()> {
    let info = AdditionalInformation::new()
        .with(keys::IS_TRUNCATED, true)
        .with(keys::ORIGINAL_DOSE_COUNT, 5)
        .with(keys::TRUNCATED_DOSE_COUNT, 2);

    let html = HtmlDocumentRenderer::new().render_html(&valid_vds, &text_barcode("P"), &info)?;

    ensure!(html.contains("Showing 2 of"));
    ensure!(html.contains("5 recorded doses."));
    Ok(())
}

#[rstest]
fn certificate_values_are_html_escaped(mut valid_vds: Vds) -> Result<()> {
    valid_vds.data.message.person_identification.name = Some("<b>SMITH & SONS".to_owned());
    let renderer =
        HtmlDocumentRenderer::new().with_template("icao.vacc.1", "{{ vds.data.msg.pid.n }}");

    let html = renderer.render_html(&valid_vds, &text_barcode("P"), &AdditionalInformation::new())?;

    ensure!(html == "&lt;b&gt;SMITH &amp; SONS", "rendered {html}");
    Ok(())
}

#[rstest]
#[case::unknown_type("icao.test", 1, "icao.test.1")]
#[case::unknown_version("icao.vacc", 2, "icao.vacc.2")]
fn unmatched_seal_has_no_template(
    mut valid_vds: Vds,
    #[case] kind: &str,
    #[case] version: i32,
    #[case] key: &str,
) {
    valid_vds.data.header.kind = Some(kind.to_owned());
    valid_vds.data.header.version = version;

    let result = HtmlDocumentRenderer::new().render(
        valid_vds,
        text_barcode("P"),
        AdditionalInformation::new(),
    );

    assert!(matches!(result, Err(RenderError::MissingTemplate(found)) if found == key));
}

#[rstest]
fn default_template_serves_unmatched_seals(mut valid_vds: Vds) -> Result<()> {
    valid_vds.data.header.kind = Some("icao.test".to_owned());
    let renderer = HtmlDocumentRenderer::new().with_default_template("{{ vds.data.hdr.t }}");
    ensure!(renderer.has_template("icao.test.1"));

    let document = renderer.render(valid_vds, text_barcode("P"), AdditionalInformation::new())?;

    ensure!(document.format == "html");
    ensure!(document.bytes == b"icao.test");
    Ok(())
}

#[rstest]
fn template_syntax_errors_are_reported(valid_vds: Vds) {
    let renderer = HtmlDocumentRenderer::new().with_template("icao.vacc.1", "{% if %}");

    let result =
        renderer.render_html(&valid_vds, &text_barcode("P"), &AdditionalInformation::new());

    assert!(matches!(result, Err(RenderError::Template(_))));
}

#[rstest]
fn templates_load_from_files(valid_vds: Vds) -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = Utf8PathBuf::from_path_buf(dir.path().join("pov.html"))
        .map_err(|path| eyre!("non UTF-8 temp path: {}", path.display()))?;
    std::fs::write(&path, "<p>{{ vds.data.msg.uvci }}</p>")?;

    let renderer = HtmlDocumentRenderer::new().with_template_file("icao.vacc.1", &path)?;
    let html = renderer.render_html(&valid_vds, &text_barcode("P"), &AdditionalInformation::new())?;

    ensure!(html == "<p>U32870</p>");
    Ok(())
}

#[rstest]
fn missing_template_file_is_a_read_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.html"))
        .map_err(|path| eyre!("non UTF-8 temp path: {}", path.display()))?;

    let result = HtmlDocumentRenderer::new().with_template_file("icao.vacc.1", &path);

    ensure!(matches!(result, Err(RenderError::Read(_))));
    Ok(())
}

// ============================================================================
// Signing
// ============================================================================

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn demo_signer_returns_fixed_values(valid_vds: Vds) -> Result<()> {
    let issued = DemoSigner.sign(&valid_vds).await?;

    let demonstration =
        IssuedSignature::new(DemoSigner::ALGORITHM, DemoSigner::CERTIFICATE, DemoSigner::VALUE);
    ensure!(issued == demonstration);
    Ok(())
}
