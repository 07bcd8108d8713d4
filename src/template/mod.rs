//! Poster templates: the layout strategies and their registry.
//!
//! A template consumes an upright photo buffer plus its [`ShotMeta`] and
//! produces a finished poster canvas. The set of templates is fixed at
//! process start: [`TemplateRegistry::builtin`] wires the two shipping
//! layouts, and the registry is read-only afterwards — unknown ids resolve
//! silently to the default rather than erroring, so a stale template id in a
//! saved command line still produces a poster.
//!
//! Shared parameter formatting lives here as free functions; the templates
//! own only their layout math.

mod blur;
mod classic;

pub use blur::BlurBackgroundTemplate;
pub use classic::ClassicTemplate;

use crate::metadata::{ShotMeta, UNKNOWN};
use image::RgbaImage;
use serde::Serialize;

/// A poster layout strategy.
///
/// Implementations are pure functions of their inputs: no shared mutable
/// state, safe to invoke concurrently across independent renders.
pub trait PosterTemplate: Send + Sync {
    /// Stable lowercase-hyphenated identifier.
    fn id(&self) -> &'static str;
    /// Human-readable name.
    fn name(&self) -> &'static str;
    /// One-line description.
    fn description(&self) -> &'static str;
    /// Compose the poster. Consumes the photo buffer.
    fn render(&self, photo: RgbaImage, meta: &ShotMeta) -> RgbaImage;
}

/// Template metadata for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Immutable-after-init mapping of template id → strategy.
///
/// Registration happens only during startup wiring; afterwards the registry
/// is handed out by shared reference and never mutated, so concurrent reads
/// need no synchronization. Insertion order is preserved for listings.
pub struct TemplateRegistry {
    templates: Vec<Box<dyn PosterTemplate>>,
    default_id: &'static str,
}

impl TemplateRegistry {
    /// An empty registry with the given fallback id. Startup wiring only.
    pub fn new(default_id: &'static str) -> Self {
        Self {
            templates: Vec::new(),
            default_id,
        }
    }

    /// The registry with both shipping templates, defaulting to `classic`.
    pub fn builtin() -> Self {
        let mut registry = Self::new("classic");
        registry.register(Box::new(ClassicTemplate));
        registry.register(Box::new(BlurBackgroundTemplate));
        registry
    }

    /// Add a template. Startup wiring only — never called post-init.
    pub fn register(&mut self, template: Box<dyn PosterTemplate>) {
        self.templates.push(template);
    }

    /// Look up a template by id, silently falling back to the default.
    ///
    /// Panics only if the registry was built without its own default — a
    /// wiring bug, not a runtime condition.
    pub fn resolve(&self, id: &str) -> &dyn PosterTemplate {
        if let Some(t) = self.templates.iter().find(|t| t.id() == id) {
            return t.as_ref();
        }
        tracing::warn!(requested = id, default = self.default_id, "unknown template, using default");
        self.templates
            .iter()
            .find(|t| t.id() == self.default_id)
            .map(|t| t.as_ref())
            .expect("registry contains its default template")
    }

    /// Template metadata in registration order.
    pub fn list(&self) -> Vec<TemplateInfo> {
        self.templates
            .iter()
            .map(|t| TemplateInfo {
                id: t.id(),
                name: t.name(),
                description: t.description(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Parameter formatting shared by all templates
// ---------------------------------------------------------------------------

/// "50 mm" / "50.0 mm" → "50mm"; sentinel → "?mm".
pub fn format_focal_length(focal: &str) -> String {
    if focal == UNKNOWN {
        return "?mm".to_string();
    }
    let compact: String = focal.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(number) = compact.strip_suffix(".0mm") {
        format!("{number}mm")
    } else if let Some(number) = compact.strip_suffix(".0") {
        number.to_string()
    } else {
        compact
    }
}

/// "1/250 sec" / "1/250" → "1/250s"; sentinel → "?s".
pub fn format_shutter_speed(shutter: &str) -> String {
    if shutter == UNKNOWN {
        return "?s".to_string();
    }
    let mut s = shutter.replace(" sec", "s").replace("sec", "s");
    if !s.ends_with('s') {
        s.push('s');
    }
    s
}

/// "ISO 100" / "100" → "100"; sentinel → "?".
pub fn format_iso(iso: &str) -> String {
    if iso == UNKNOWN {
        return "?".to_string();
    }
    iso.replace("ISO ", "").replace("ISO", "").trim().to_string()
}

/// Camera model for display; the sentinel reads "Unknown Camera".
pub fn format_camera_model(meta: &ShotMeta) -> String {
    if meta.camera_model == UNKNOWN || meta.camera_model.is_empty() {
        "Unknown Camera".to_string()
    } else {
        meta.camera_model.clone()
    }
}

/// The single parameter line: `"<focal>  <aperture>  <shutter>  ISO <iso>"`.
pub fn params_line(meta: &ShotMeta) -> String {
    let aperture = if meta.aperture == UNKNOWN {
        "f/?".to_string()
    } else {
        meta.aperture.clone()
    };
    format!(
        "{}  {}  {}  ISO {}",
        format_focal_length(&meta.focal_length),
        aperture,
        format_shutter_speed(&meta.shutter_speed),
        format_iso(&meta.iso),
    )
}
