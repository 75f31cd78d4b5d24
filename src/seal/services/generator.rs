//! Seal issuance orchestration.
//!
//! Provides [`SealGenerator`], which runs one seal through preprocessing,
//! validation, signing, barcode rendering and document rendering.

use crate::seal::{
    domain::{AdditionalInformation, Rejection, SealOutcome, Vds},
    error::{PipelineError, PipelineResult, PipelineStage},
    ports::{BarcodeRenderer, DocumentRenderer, Preprocessor, Signer, VdsValidator},
};
use std::sync::Arc;
use tracing::{Instrument, debug, error, info, info_span, instrument};

/// Issuance pipeline over its five collaborators.
///
/// A run moves through `preprocessed → validated → signed → barcode
/// rendered → document rendered`. A seal with validation failures leaves
/// after validation as [`SealOutcome::Rejected`] and is never signed.
/// Collaborator faults end the run with a [`PipelineError`] naming the
/// stage; they are not retried.
pub struct SealGenerator<V, P, S, B, D>
where
    V: VdsValidator,
    P: Preprocessor,
    S: Signer,
    B: BarcodeRenderer,
    D: DocumentRenderer,
{
    validator: Arc<V>,
    preprocessor: Arc<P>,
    signer: Arc<S>,
    barcode_renderer: Arc<B>,
    document_renderer: Arc<D>,
}

impl<V, P, S, B, D> Clone for SealGenerator<V, P, S, B, D>
where
    V: VdsValidator,
    P: Preprocessor,
    S: Signer,
    B: BarcodeRenderer,
    D: DocumentRenderer,
{
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
            preprocessor: Arc::clone(&self.preprocessor),
            signer: Arc::clone(&self.signer),
            barcode_renderer: Arc::clone(&self.barcode_renderer),
            document_renderer: Arc::clone(&self.document_renderer),
        }
    }
}

impl<V, P, S, B, D> SealGenerator<V, P, S, B, D>
where
    V: VdsValidator,
    P: Preprocessor,
    S: Signer,
    B: BarcodeRenderer,
    D: DocumentRenderer,
{
    /// Creates a generator from its collaborators.
    #[must_use]
    pub const fn new(
        validator: Arc<V>,
        preprocessor: Arc<P>,
        signer: Arc<S>,
        barcode_renderer: Arc<B>,
        document_renderer: Arc<D>,
    ) -> Self {
        Self {
            validator,
            preprocessor,
            signer,
            barcode_renderer,
            document_renderer,
        }
    }

    /// Issues one seal.
    ///
    /// Each stage runs in its own span nested under `seal_issuance`. The
    /// signing call is the only suspension point.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when a collaborator fails, or when the
    /// validator raises in fail-fast mode. No partial result is returned.
    #[instrument(name = "seal_issuance", skip_all)]
    pub async fn run(
        &self,
        mut vds: Vds,
        mut info: AdditionalInformation,
    ) -> PipelineResult<SealOutcome> {
        info_span!("preprocess").in_scope(|| {
            debug!("preprocessing seal");
            self.preprocessor
                .process(&mut vds, &mut info)
                .map_err(|err| fault(PipelineStage::Preprocess, err))?;
            debug!("seal preprocessed");
            Ok::<_, PipelineError>(())
        })?;

        let messages = info_span!("validate").in_scope(|| {
            debug!("validating seal");
            let found = self
                .validator
                .validate(&vds)
                .map_err(|err| fault(PipelineStage::Validate, err))?;
            debug!(failures = found.len(), "seal validated");
            Ok::<_, PipelineError>(found)
        })?;
        if !messages.is_empty() {
            info!(failures = messages.len(), "seal rejected before signing");
            return Ok(SealOutcome::Rejected(Rejection {
                vds,
                additional_information: info,
                messages,
            }));
        }

        let issued = async {
            debug!("requesting signature");
            let signed = self
                .signer
                .sign(&vds)
                .await
                .map_err(|err| fault(PipelineStage::Sign, err))?;
            debug!("seal signed");
            Ok::<_, PipelineError>(signed)
        }
        .instrument(info_span!("sign"))
        .await?;
        vds.apply_signature(issued);

        let barcode = info_span!("render_barcode").in_scope(|| {
            debug!("rendering barcode");
            let rendered = self
                .barcode_renderer
                .render(&vds)
                .map_err(|err| fault(PipelineStage::RenderBarcode, err))?;
            debug!(format = %rendered.format, "barcode rendered");
            Ok::<_, PipelineError>(rendered)
        })?;

        let document = info_span!("render_document").in_scope(|| {
            debug!("rendering document");
            let rendered = self
                .document_renderer
                .render(vds, barcode, info)
                .map_err(|err| fault(PipelineStage::RenderDocument, err))?;
            debug!(format = %rendered.format, "document rendered");
            Ok::<_, PipelineError>(rendered)
        })?;
        info!(format = %document.format, "seal issued");

        Ok(SealOutcome::Issued(Box::new(document)))
    }
}

fn fault(
    stage: PipelineStage,
    err: impl std::error::Error + Send + Sync + 'static,
) -> PipelineError {
    error!(%stage, error = %err, "seal issuance failed");
    PipelineError::at(stage, err)
}
