//! Clock state to icon

use crate::clock::WallClock;
use crate::host::IconHost;
use crate::state::ClockState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tickmark_render::{title_for, ClockFace, FaceRasterizer, IconRasterizer, RenderError};
use tickmark_theme::Palette;

/// What a successful render put on screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFrame {
    pub face: ClockFace,
    pub title: String,
    /// Palette entry name the face was drawn in
    pub color: String,
}

/// Formats the current time for a state and hands the bitmap to the host
pub struct IconRenderer {
    palette: Arc<Palette>,
    clock: Arc<dyn WallClock>,
    host: Arc<dyn IconHost>,
    rasterizer: Arc<dyn FaceRasterizer>,
    frames: AtomicU64,
}

impl IconRenderer {
    /// Renderer drawing with the built-in bitmap font
    pub fn new(palette: Arc<Palette>, clock: Arc<dyn WallClock>, host: Arc<dyn IconHost>) -> Self {
        Self {
            palette,
            clock,
            host,
            rasterizer: Arc::new(IconRasterizer::new()),
            frames: AtomicU64::new(0),
        }
    }

    pub fn with_rasterizer(mut self, rasterizer: Arc<dyn FaceRasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn clock(&self) -> &Arc<dyn WallClock> {
        &self.clock
    }

    /// Number of frames handed to the host so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Render `state` at the current time.
    ///
    /// Host failures are logged and do not fail the render; the bitmap and
    /// title are still considered delivered.
    pub fn render(&self, state: &ClockState) -> Result<RenderedFrame, RenderError> {
        let now = self.clock.now();
        let entry = self.palette.wrapped(state.color_index);
        let face = ClockFace::format(&now, state.hour12);
        let icon = self.rasterizer.rasterize(&face, entry.color)?;
        let title = title_for(&now);

        if let Err(err) = self.host.set_icon(&icon) {
            tracing::warn!("icon update failed: {err}");
        }
        if let Err(err) = self.host.set_title(&title) {
            tracing::warn!("title update failed: {err}");
        }
        self.frames.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(face = %face, color = %entry.name, %title, "rendered icon");
        Ok(RenderedFrame {
            face,
            title,
            color: entry.name.clone(),
        })
    }

    /// Render, logging and skipping this cycle on failure
    pub fn render_or_skip(&self, state: &ClockState) -> Option<RenderedFrame> {
        match self.render(state) {
            Ok(frame) => Some(frame),
            Err(err) => {
                tracing::warn!("skipping render: {err}");
                None
            }
        }
    }
}

impl std::fmt::Debug for IconRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconRenderer")
            .field("palette", &self.palette.len())
            .field("frames", &self.frames())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::AnchoredClock;
    use crate::error::HostError;
    use chrono::NaiveDate;
    use std::sync::Mutex;
    use tickmark_core::Color;
    use tickmark_render::RgbaImage;
    use tickmark_theme::ColorScheme;

    struct NoFont;

    impl FaceRasterizer for NoFont {
        fn rasterize(&self, _face: &ClockFace, _color: Color) -> tickmark_render::Result<RgbaImage> {
            Err(RenderError::FontUnavailable)
        }
    }

    #[derive(Default)]
    struct FailingTitles {
        icons: Mutex<usize>,
    }

    impl IconHost for FailingTitles {
        fn set_icon(&self, _icon: &RgbaImage) -> Result<(), HostError> {
            *self.icons.lock().unwrap() += 1;
            Ok(())
        }

        fn set_title(&self, _title: &str) -> Result<(), HostError> {
            Err(HostError::Unavailable("no title bar".into()))
        }
    }

    fn renderer(host: Arc<dyn IconHost>) -> IconRenderer {
        let at = NaiveDate::from_ymd_opt(2024, 7, 4)
            .unwrap()
            .and_hms_opt(18, 5, 12)
            .unwrap();
        IconRenderer::new(
            Arc::new(Palette::from_specs(&["white", "grey", "black"]).unwrap()),
            Arc::new(AnchoredClock::new(at)),
            host,
        )
    }

    #[test]
    fn frame_reflects_state() {
        let renderer = renderer(Arc::new(crate::host::NullHost));

        let frame = renderer
            .render(&ClockState::new(1, true, ColorScheme::Light))
            .unwrap();
        assert_eq!(frame.face.to_string(), "06:05 PM");
        assert_eq!(frame.color, "grey");
        assert_eq!(frame.title, "2024-07-04");

        let frame = renderer
            .render(&ClockState::new(2, false, ColorScheme::Light))
            .unwrap();
        assert_eq!(frame.face.to_string(), "18:05");
        assert_eq!(frame.color, "black");
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn host_failures_do_not_fail_the_render() {
        let host = Arc::new(FailingTitles::default());
        let renderer = renderer(host.clone());
        assert!(renderer
            .render_or_skip(&ClockState::new(0, true, ColorScheme::Dark))
            .is_some());
        assert_eq!(*host.icons.lock().unwrap(), 1);
    }

    #[test]
    fn rasterizer_failure_skips_the_frame() {
        let host = Arc::new(FailingTitles::default());
        let renderer = renderer(host.clone()).with_rasterizer(Arc::new(NoFont));

        let state = ClockState::new(0, false, ColorScheme::Light);
        assert_eq!(renderer.render(&state), Err(RenderError::FontUnavailable));
        assert!(renderer.render_or_skip(&state).is_none());
        assert_eq!(*host.icons.lock().unwrap(), 0);
        assert_eq!(renderer.frames(), 0);
    }
}
