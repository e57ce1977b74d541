//! # Render Session
//!
//! Caller-side state for an interactive tool: the current settings, the
//! noise field built from their seed, and the compositor. The core
//! functions only ever borrow from here.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tracing::{debug, info};

use crate::{
    composition::{tint_filters, Background, LayerCompositor, LayerDescriptor, LayerPresenter, Scene},
    config::Settings,
    content::Content,
    error::Result,
    export::{GeometryExporter, VectorDocument},
    geometry::Bounds,
    noise::SeededNoise,
    presets::{apply_preset, ColorProfile},
};

/// Settings plus the noise field derived from them
pub struct RenderSession {
    settings: Settings,
    noise: SeededNoise,
    compositor: LayerCompositor,
    exports: ExportSlot,
}

impl RenderSession {
    pub fn new(settings: Settings) -> Self {
        Self::with_compositor(settings, LayerCompositor::new())
    }

    /// Create a session with a custom compositor (e.g. extra algorithms)
    pub fn with_compositor(settings: Settings, compositor: LayerCompositor) -> Self {
        let noise = SeededNoise::new(settings.noise_seed);
        Self {
            settings,
            noise,
            compositor,
            exports: ExportSlot::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn noise(&self) -> &SeededNoise {
        &self.noise
    }

    pub fn compositor(&self) -> &LayerCompositor {
        &self.compositor
    }

    /// Edit the settings in place
    ///
    /// If the edit changes the seed, the noise field is rebuilt before this
    /// returns, so no render ever sees a stale generator.
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Settings),
    {
        edit(&mut self.settings);
        self.sync_noise();
    }

    pub fn set_seed(&mut self, seed: i64) {
        self.update(|settings| settings.noise_seed = seed);
    }

    /// Apply a named preset; on error the settings are left unchanged
    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        let mut next = self.settings.clone();
        apply_preset(name, &mut next)?;
        self.settings = next;
        self.sync_noise();
        info!("Applied preset '{}'", name);
        Ok(())
    }

    pub fn apply_color_profile(&mut self, profile: ColorProfile) {
        profile.apply(&mut self.settings);
    }

    /// Restore default settings and the default noise field
    pub fn reset(&mut self) {
        self.settings = Settings::default();
        self.sync_noise();
    }

    fn sync_noise(&mut self) {
        if self.noise.seed() != self.settings.noise_seed {
            info!(
                "Rebuilding noise field: seed {} -> {}",
                self.noise.seed(),
                self.settings.noise_seed
            );
            self.noise = SeededNoise::new(self.settings.noise_seed);
        }
    }

    /// Layer stack for the current settings
    pub fn compose(&self, content: Option<&Content>, bounds: Bounds) -> Vec<LayerDescriptor> {
        self.compositor.compose(content, &self.settings, bounds, &self.noise)
    }

    /// Compose and hand the stack to a presentation adapter
    pub fn present<P: LayerPresenter>(
        &self,
        presenter: &mut P,
        content: Option<&Content>,
        bounds: Bounds,
    ) -> P::Output {
        let layers = self.compose(content, bounds);
        let filters = tint_filters(&self.settings);
        presenter.present(&Scene {
            layers: &layers,
            bounds,
            background: Background::from_settings(&self.settings),
            global_blend: self.settings.global_blend,
            filters: &filters,
        })
    }

    /// Vector document for the current settings
    pub fn export(&self, content: Option<&Content>, bounds: Bounds) -> VectorDocument {
        GeometryExporter::new(&self.compositor).export(content, &self.settings, bounds, &self.noise)
    }

    /// Start an export that may finish asynchronously (e.g. rasterizing)
    ///
    /// Issuing a new ticket supersedes every earlier one.
    pub fn begin_export(&self) -> ExportTicket {
        self.exports.issue()
    }
}

impl Default for RenderSession {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// Single-flight guard for export requests
///
/// Only the most recently issued ticket may deliver its artifact. Tickets
/// can be moved to another thread together with the work they guard.
#[derive(Debug, Clone, Default)]
pub struct ExportSlot {
    latest: Arc<AtomicU64>,
}

impl ExportSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding all outstanding ones
    pub fn issue(&self) -> ExportTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        ExportTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }
}

/// Permission to deliver one export result
#[derive(Debug)]
pub struct ExportTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl ExportTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether no newer export has been requested since this one
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// Hand back `artifact` if this ticket is still current, dropping it
    /// otherwise
    pub fn deliver<T>(self, artifact: T) -> Option<T> {
        if self.is_current() {
            Some(artifact)
        } else {
            debug!("Dropping superseded export #{}", self.generation);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        composition::{CssPresenter, LayerKind},
        config::{Channel, TextStyle},
    };

    #[test]
    fn test_seed_change_rebuilds_noise() {
        let mut session = RenderSession::default();
        assert_eq!(session.noise().seed(), 42);

        session.set_seed(7);
        assert_eq!(session.noise().seed(), 7);
        assert_eq!(session.settings().noise_seed, 7);

        let fresh = SeededNoise::new(7);
        assert_eq!(session.noise().query(3.3, 1.7), fresh.query(3.3, 1.7));
    }

    #[test]
    fn test_noise_kept_when_seed_unchanged() {
        let mut session = RenderSession::default();
        session.update(|s| s.intensity = 10.0);
        assert_eq!(session.noise().seed(), 42);
        assert_eq!(session.settings().intensity, 10.0);
    }

    #[test]
    fn test_failed_preset_leaves_settings() {
        let mut session = RenderSession::default();
        let before = session.settings().clone();
        assert!(session.apply_preset("sparkle").is_err());
        assert_eq!(session.settings(), &before);

        session.apply_preset("vhs").unwrap();
        assert_eq!(session.settings().algorithm, "wave");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut session = RenderSession::default();
        session.set_seed(1000);
        session.apply_color_profile(ColorProfile::Cmy);
        session.reset();

        assert_eq!(session.settings(), &Settings::default());
        assert_eq!(session.noise().seed(), 42);
    }

    #[test]
    fn test_compose_present_and_export_agree() {
        let session = RenderSession::default();
        let content = Content::from_text("RGB", &TextStyle::default());
        let bounds = Bounds::default();

        let layers = session.compose(content.as_ref(), bounds);
        let scene = session.present(&mut CssPresenter, content.as_ref(), bounds);
        let document = session.export(content.as_ref(), bounds);

        assert_eq!(layers.len(), scene.layers.len());
        assert_eq!(layers.len(), document.groups.len());
        assert_eq!(document.groups[1].kind, LayerKind::Channel(Channel::Red));
    }

    #[test]
    fn test_newer_export_supersedes_older() {
        let session = RenderSession::default();

        let first = session.begin_export();
        let second = session.begin_export();

        assert!(!first.is_current());
        assert!(second.is_current());
        assert_eq!(first.deliver("stale"), None);
        assert_eq!(second.deliver("fresh"), Some("fresh"));
    }

    #[test]
    fn test_ticket_across_threads() {
        let slot = ExportSlot::new();
        let ticket = slot.issue();

        let handle = std::thread::spawn(move || ticket.deliver(1u8));
        assert_eq!(handle.join().unwrap(), Some(1));
    }
}
