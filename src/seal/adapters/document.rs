//! Document renderers.

use crate::seal::{
    domain::{AdditionalInformation, BarcodeResult, DocumentResult, Vds},
    error::RenderError,
    policy::read_utf8_file,
    ports::DocumentRenderer,
};
use camino::Utf8Path;
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Built-in proof-of-vaccination certificate template.
const POV_CERTIFICATE_TEMPLATE: &str = include_str!("templates/pov_certificate.html");

/// Template key of the built-in certificate.
pub const POV_CERTIFICATE_KEY: &str = "icao.vacc.1";

/// Document renderer whose document is the barcode itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarcodeOnlyDocumentRenderer;

impl DocumentRenderer for BarcodeOnlyDocumentRenderer {
    fn render(
        &self,
        vds: Vds,
        barcode: BarcodeResult,
        info: AdditionalInformation,
    ) -> Result<DocumentResult, RenderError> {
        Ok(DocumentResult {
            bytes: barcode.bytes.clone(),
            format: barcode.format.clone(),
            barcode,
            vds,
            additional_information: info,
        })
    }
}

/// Barcode details exposed to templates.
#[derive(Debug, Serialize)]
struct BarcodeView<'a> {
    format: &'a str,
    byte_length: usize,
    text: Option<&'a str>,
}

/// Renders seals into HTML certificates with minijinja templates.
///
/// Templates are selected by the key `"{type}.{version}"` taken from the
/// seal header, and their output is HTML-escaped. A default template, when
/// set, serves every key without a template of its own. Templates see
/// `vds` (the seal with ICAO short keys), `barcode` (`format`,
/// `byte_length` and `text`) and `additional_information`.
///
/// # Examples
///
/// ```
/// use visible_seal::seal::adapters::HtmlDocumentRenderer;
///
/// let renderer = HtmlDocumentRenderer::new()
///     .with_template("icao.test.1", "<p>{{ vds.data.msg.uvci }}</p>");
/// assert!(renderer.has_template("icao.vacc.1"));
/// assert!(renderer.has_template("icao.test.1"));
/// assert!(!renderer.has_template("icao.other.1"));
/// ```
#[derive(Debug)]
pub struct HtmlDocumentRenderer {
    environment: Environment<'static>,
    templates: BTreeMap<String, String>,
    default_template: Option<String>,
}

impl HtmlDocumentRenderer {
    /// Creates a renderer holding the built-in certificate template.
    #[must_use]
    pub fn new() -> Self {
        let mut environment = Environment::new();
        environment.set_auto_escape_callback(|_| AutoEscape::Html);
        Self {
            environment,
            templates: BTreeMap::new(),
            default_template: None,
        }
        .with_template(POV_CERTIFICATE_KEY, POV_CERTIFICATE_TEMPLATE)
    }

    /// Registers a template for a seal type and version key.
    #[must_use]
    pub fn with_template(mut self, key: impl Into<String>, source: impl Into<String>) -> Self {
        self.templates.insert(key.into(), source.into());
        self
    }

    /// Sets the template used for keys without a template of their own.
    #[must_use]
    pub fn with_default_template(mut self, source: impl Into<String>) -> Self {
        self.default_template = Some(source.into());
        self
    }

    /// Registers a template read from a file.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Read` if the file cannot be read.
    pub fn with_template_file(
        self,
        key: impl Into<String>,
        path: &Utf8Path,
    ) -> Result<Self, RenderError> {
        let source = read_utf8_file(path)?;
        Ok(self.with_template(key, source))
    }

    /// Returns `true` if a template serves the key.
    #[must_use]
    pub fn has_template(&self, key: &str) -> bool {
        self.templates.contains_key(key) || self.default_template.is_some()
    }

    /// Returns the template key for a seal.
    #[must_use]
    pub fn template_key(vds: &Vds) -> String {
        let header = vds.header();
        format!(
            "{}.{}",
            header.kind.as_deref().unwrap_or_default(),
            header.version
        )
    }

    /// Renders the HTML text of a certificate.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::MissingTemplate` if no template serves the
    /// seal, or `RenderError::Template` if rendering fails.
    pub fn render_html(
        &self,
        vds: &Vds,
        barcode: &BarcodeResult,
        info: &AdditionalInformation,
    ) -> Result<String, RenderError> {
        let key = Self::template_key(vds);
        let source = self
            .templates
            .get(&key)
            .or_else(|| self.default_template.as_ref())
            .ok_or_else(|| RenderError::MissingTemplate(key.clone()))?;

        let barcode_view = BarcodeView {
            format: &barcode.format,
            byte_length: barcode.bytes.len(),
            text: barcode.as_text(),
        };
        let html = self.environment.render_named_str(
            &key,
            source,
            context! {
                vds => vds,
                barcode => barcode_view,
                additional_information => info,
            },
        )?;
        debug!(template = %key, bytes = html.len(), "rendered certificate");
        Ok(html)
    }
}

impl Default for HtmlDocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentRenderer for HtmlDocumentRenderer {
    fn render(
        &self,
        vds: Vds,
        barcode: BarcodeResult,
        info: AdditionalInformation,
    ) -> Result<DocumentResult, RenderError> {
        let html = self.render_html(&vds, &barcode, &info)?;
        Ok(DocumentResult {
            bytes: html.into_bytes(),
            format: "html".to_owned(),
            barcode,
            vds,
            additional_information: info,
        })
    }
}
