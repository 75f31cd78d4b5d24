//! Unit tests for the issuance pipeline.

use super::fixtures::{event_with_doses, valid_vds, vds_with_events};
use crate::seal::{
    adapters::{BarcodeOnlyDocumentRenderer, DemoSigner, PayloadBarcodeRenderer},
    domain::{
        AdditionalInformation, BarcodeResult, IssuedSignature, SealOutcome, Vds, VdsSignature,
        keys,
    },
    error::{PipelineStage, RenderError, SignerError},
    policy::{TruncationPolicy, ValidationPolicy},
    ports::{BarcodeRenderer, NoopPreprocessor, Preprocessor, Signer, signer::SignerResult},
    preprocess::DoseTruncator,
    services::SealGenerator,
    validation::PolicyValidator,
};
use async_trait::async_trait;
use eyre::{Result, ensure, eyre};
use mockall::{mock, predicate::always};
use rstest::rstest;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tracing::{
    Subscriber,
    span::{Attributes, Id},
};
use tracing_subscriber::{
    Layer,
    layer::{Context, SubscriberExt},
};

mock! {
    pub SigningService {}

    #[async_trait]
    impl Signer for SigningService {
        async fn sign(&self, vds: &Vds) -> SignerResult<IssuedSignature>;
    }
}

/// Barcode renderer that always fails.
struct BrokenBarcodeRenderer;

impl BarcodeRenderer for BrokenBarcodeRenderer {
    fn render(&self, _: &Vds) -> Result<BarcodeResult, RenderError> {
        Err(RenderError::UnsupportedFormat("png".to_owned()))
    }
}

/// Preprocessor that always fails.
struct BrokenPreprocessor;

impl Preprocessor for BrokenPreprocessor {
    type Error = std::io::Error;

    fn process(&self, _: &mut Vds, _: &mut AdditionalInformation) -> Result<(), Self::Error> {
        Err(std::io::Error::other("transform unavailable"))
    }
}

/// Layer recording the name of every span opened while it is installed.
#[derive(Clone, Default)]
struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

impl SpanNames {
    fn recorded(&self) -> Vec<&'static str> {
        self.0.lock().expect("span name lock").clone()
    }
}

impl<S: Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &Attributes<'_>, _: &Id, _: Context<'_, S>) {
        self.0
            .lock()
            .expect("span name lock")
            .push(attrs.metadata().name());
    }
}

fn issued() -> IssuedSignature {
    IssuedSignature::new("ES256", "Q0VSVA", "U0lH")
}

fn signing_once() -> MockSigningService {
    let mut signer = MockSigningService::new();
    signer
        .expect_sign()
        .with(always())
        .times(1)
        .returning(|_| Ok(issued()));
    signer
}

fn never_signing() -> MockSigningService {
    let mut signer = MockSigningService::new();
    signer.expect_sign().never();
    signer
}

fn generator<P, S, B>(
    policy: ValidationPolicy,
    preprocessor: P,
    signer: S,
    barcode_renderer: B,
) -> SealGenerator<PolicyValidator, P, S, B, BarcodeOnlyDocumentRenderer>
where
    P: Preprocessor,
    S: Signer,
    B: BarcodeRenderer,
{
    let validator = PolicyValidator::with_policy(policy).expect("consistent policy");
    SealGenerator::new(
        Arc::new(validator),
        Arc::new(preprocessor),
        Arc::new(signer),
        Arc::new(barcode_renderer),
        Arc::new(BarcodeOnlyDocumentRenderer),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn valid_seal_is_signed_once_and_rendered(valid_vds: Vds) -> Result<()> {
    let seal = generator(
        ValidationPolicy::default(),
        NoopPreprocessor,
        signing_once(),
        PayloadBarcodeRenderer::new(),
    );

    let outcome = seal.run(valid_vds, AdditionalInformation::new()).await?;

    let document = outcome
        .document()
        .ok_or_else(|| eyre!("expected an issued seal"))?;
    let signature = document
        .vds
        .signature
        .as_ref()
        .ok_or_else(|| eyre!("issued seal should be signed"))?;
    ensure!(signature.algorithm.as_deref() == Some("ES256"));
    ensure!(signature.certificate.as_deref() == Some("Q0VSVA"));
    ensure!(signature.value.as_deref() == Some("U0lH"));
    ensure!(document.format == "text");
    ensure!(document.bytes == document.barcode.bytes);
    let text = document
        .barcode
        .as_text()
        .ok_or_else(|| eyre!("text barcode should be UTF-8"))?;
    ensure!(text.contains(r#""sig":{"alg":"ES256","cer":"Q0VSVA","sigvl":"U0lH"}"#));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signature_extensions_survive_signing(valid_vds: Vds) -> Result<()> {
    let vds = valid_vds.with_signature(
        VdsSignature::default().with_extension("kid", json!("key-2024")),
    );
    let seal = generator(
        ValidationPolicy::default(),
        NoopPreprocessor,
        signing_once(),
        PayloadBarcodeRenderer::new(),
    );

    let outcome = seal.run(vds, AdditionalInformation::new()).await?;

    let signature = outcome
        .vds()
        .signature
        .as_ref()
        .ok_or_else(|| eyre!("issued seal should be signed"))?;
    ensure!(signature.extensions.get("kid") == Some(&json!("key-2024")));
    ensure!(signature.value.as_deref() == Some("U0lH"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_seal_is_rejected_without_signing(mut valid_vds: Vds) -> Result<()> {
    valid_vds.data.message.uvci = None;
    valid_vds.data.header.version = 2;
    let seal = generator(
        ValidationPolicy::default(),
        NoopPreprocessor,
        never_signing(),
        PayloadBarcodeRenderer::new(),
    );

    let outcome = seal
        .run(valid_vds, AdditionalInformation::new().with("Locale", "en-AU"))
        .await?;

    ensure!(!outcome.is_issued());
    ensure!(outcome.messages().len() == 2);
    ensure!(outcome.vds().signature.is_none());
    ensure!(outcome.additional_information().contains_key("Locale"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signer_failure_names_the_sign_stage(valid_vds: Vds) -> Result<()> {
    let mut signer = MockSigningService::new();
    signer
        .expect_sign()
        .times(1)
        .returning(|_| Err(SignerError::unavailable("connection refused")));
    let seal = generator(
        ValidationPolicy::default(),
        NoopPreprocessor,
        signer,
        PayloadBarcodeRenderer::new(),
    );

    let err = seal
        .run(valid_vds, AdditionalInformation::new())
        .await
        .err()
        .ok_or_else(|| eyre!("signing failure should abort the run"))?;

    ensure!(err.stage() == PipelineStage::Sign);
    ensure!(err.to_string().contains("connection refused"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn barcode_failure_names_the_barcode_stage(valid_vds: Vds) -> Result<()> {
    let seal = generator(
        ValidationPolicy::default(),
        NoopPreprocessor,
        signing_once(),
        BrokenBarcodeRenderer,
    );

    let err = seal
        .run(valid_vds, AdditionalInformation::new())
        .await
        .err()
        .ok_or_else(|| eyre!("barcode failure should abort the run"))?;

    ensure!(err.stage() == PipelineStage::RenderBarcode);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn preprocessing_failure_stops_before_validation(valid_vds: Vds) -> Result<()> {
    let seal = generator(
        ValidationPolicy::default(),
        BrokenPreprocessor,
        never_signing(),
        PayloadBarcodeRenderer::new(),
    );

    let err = seal
        .run(valid_vds, AdditionalInformation::new())
        .await
        .err()
        .ok_or_else(|| eyre!("preprocessing failure should abort the run"))?;

    ensure!(err.stage() == PipelineStage::Preprocess);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fail_fast_rejection_is_a_validation_fault(mut valid_vds: Vds) -> Result<()> {
    valid_vds.data.message.uvci = None;
    let policy = ValidationPolicy {
        fail_fast: true,
        ..ValidationPolicy::default()
    };
    let seal = generator(policy, NoopPreprocessor, never_signing(), PayloadBarcodeRenderer::new());

    let err = seal
        .run(valid_vds, AdditionalInformation::new())
        .await
        .err()
        .ok_or_else(|| eyre!("fail-fast validation should abort the run"))?;

    ensure!(err.stage() == PipelineStage::Validate);
    ensure!(err.to_string().contains("The field data.message.uvci is required."));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn validation_sees_the_truncated_seal() -> Result<()> {
    let mut vds = vds_with_events(vec![
        event_with_doses("RA01", &[1, 2]),
        event_with_doses("RA02", &[3]),
    ]);
    // Dose number 0 is invalid but has the lowest priority, so it is dropped.
    vds.data.message.vaccination_events[0].vaccination_details[0].dose_number = 0;
    let seal = generator(
        ValidationPolicy::default(),
        DoseTruncator::new(TruncationPolicy::max_doses(2)),
        signing_once(),
        PayloadBarcodeRenderer::new(),
    );

    let outcome = seal.run(vds, AdditionalInformation::new()).await?;

    ensure!(outcome.is_issued(), "messages: {:?}", outcome.messages());
    let info = outcome.additional_information();
    ensure!(info.get_bool(keys::IS_TRUNCATED) == Some(true));
    ensure!(info.get_u64(keys::ORIGINAL_DOSE_COUNT) == Some(3));
    ensure!(info.get_u64(keys::TRUNCATED_DOSE_COUNT) == Some(2));
    ensure!(outcome.vds().message().dose_count() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generator_clones_share_collaborators(valid_vds: Vds) -> Result<()> {
    let seal = generator(
        ValidationPolicy::default(),
        NoopPreprocessor,
        DemoSigner,
        PayloadBarcodeRenderer::new(),
    );
    let copy = seal.clone();

    let first = seal.run(valid_vds.clone(), AdditionalInformation::new()).await?;
    let second = copy.run(valid_vds, AdditionalInformation::new()).await?;

    ensure!(first == second);
    ensure!(matches!(first, SealOutcome::Issued(_)));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn each_stage_runs_in_its_own_span(valid_vds: Vds) -> Result<()> {
    let names = SpanNames::default();
    let subscriber = tracing_subscriber::registry().with(names.clone());
    let _guard = tracing::subscriber::set_default(subscriber);
    let seal = generator(
        ValidationPolicy::default(),
        NoopPreprocessor,
        signing_once(),
        PayloadBarcodeRenderer::new(),
    );

    seal.run(valid_vds, AdditionalInformation::new()).await?;

    ensure!(
        names.recorded()
            == [
                "seal_issuance",
                "preprocess",
                "validate",
                "sign",
                "render_barcode",
                "render_document",
            ],
        "unexpected spans: {:?}",
        names.recorded()
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn rejected_seal_never_opens_a_signing_span(valid_vds: Vds) -> Result<()> {
    let mut vds = valid_vds;
    vds.message_mut().uvci = None;
    let names = SpanNames::default();
    let subscriber = tracing_subscriber::registry().with(names.clone());
    let _guard = tracing::subscriber::set_default(subscriber);
    let seal = generator(
        ValidationPolicy::default(),
        NoopPreprocessor,
        never_signing(),
        PayloadBarcodeRenderer::new(),
    );

    let outcome = seal.run(vds, AdditionalInformation::new()).await?;

    ensure!(!outcome.is_issued());
    ensure!(names.recorded() == ["seal_issuance", "preprocess", "validate"]);
    Ok(())
}

#[rstest]
fn noop_preprocessor_leaves_the_seal_untouched(valid_vds: Vds) -> Result<()> {
    let mut vds = valid_vds.clone();
    let mut info = AdditionalInformation::new();

    NoopPreprocessor.process(&mut vds, &mut info)?;

    ensure!(vds == valid_vds);
    ensure!(info.is_empty());
    Ok(())
}
