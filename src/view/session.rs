use std::time::Duration;

use crate::{
    animation::player::{Player, Track},
    assets::library::load,
    assets::records::{FrameRecords, SequenceRecords},
    clock::segments::ClockState,
    clock::source::ClockSource,
    config::ViewConfig,
    foundation::core::Viewport,
    foundation::error::SpriteClockResult,
    render::compositor::{self, PaintStats},
    render::surface::RenderSurface,
    view::scheduler::{Firing, RepaintRequest, Scheduler, Trigger, TriggerControl},
};

/// The animated view: loaded tracks, the clock blink, their triggers and the
/// pending-redraw flag.
///
/// A view only exists once loading succeeded, so a failed load never reaches
/// the animated state.
#[derive(Debug)]
pub struct SpriteClockView {
    config: ViewConfig,
    player: Player,
    clock: ClockState,
    scheduler: Scheduler,
    repaint: RepaintRequest,
}

impl SpriteClockView {
    #[tracing::instrument(skip_all)]
    pub fn load(
        frames: &FrameRecords,
        sequences: &SequenceRecords,
        config: ViewConfig,
    ) -> SpriteClockResult<Self> {
        config.validate()?;
        let animation = load(frames, sequences)?;
        let scheduler = Scheduler::new(&config);

        let mut view = Self {
            config,
            player: Player::new(animation),
            clock: ClockState::default(),
            scheduler,
            repaint: RepaintRequest::default(),
        };
        view.repaint.request();
        Ok(view)
    }

    /// Load from the two JSON documents.
    pub fn from_json(
        frames_json: &str,
        sequence_json: &str,
        config: ViewConfig,
    ) -> SpriteClockResult<Self> {
        let frames = FrameRecords::from_json_str(frames_json)?;
        let sequences = SequenceRecords::from_json_str(sequence_json)?;
        Self::load(&frames, &sequences, config)
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn clock_state(&self) -> ClockState {
        self.clock
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run one trigger's handler. Returns whether it asked for a redraw.
    ///
    /// Use this when an external timer drives the view; [`Self::advance_to`]
    /// does the same from virtual time.
    pub fn on_trigger(&mut self, trigger: Trigger) -> bool {
        let (repaint, control) =
            dispatch(&mut self.player, &mut self.clock, &mut self.repaint, trigger);
        if control == TriggerControl::Disable {
            self.scheduler.disable(trigger);
        }
        repaint
    }

    /// Deliver every firing due up to `now` (time since the view started).
    pub fn advance_to(&mut self, now: Duration) -> Vec<Firing> {
        let Self {
            player,
            clock,
            scheduler,
            repaint,
            ..
        } = self;
        scheduler.advance_to(now, |f| dispatch(player, clock, repaint, f.trigger).1)
    }

    /// Whether a redraw was requested since the last call; clears the request.
    pub fn take_repaint(&mut self) -> bool {
        self.repaint.take()
    }

    pub fn is_running(&self, track: Track) -> bool {
        self.player.is_running(track)
    }

    pub fn render(
        &self,
        surface: &mut dyn RenderSurface,
        viewport: Viewport,
        clock: &dyn ClockSource,
    ) -> SpriteClockResult<PaintStats> {
        compositor::paint(
            surface,
            viewport,
            &self.player,
            self.clock,
            clock.now(),
            &self.config,
        )
    }
}

/// Advance a track or flip the colon, and request a redraw when anything changed.
fn dispatch(
    player: &mut Player,
    clock: &mut ClockState,
    repaint: &mut RepaintRequest,
    trigger: Trigger,
) -> (bool, TriggerControl) {
    let (changed, control) = match trigger {
        Trigger::Track(track) => {
            let out = player.on_tick(track);
            let control = if out.stopped {
                TriggerControl::Disable
            } else {
                TriggerControl::Continue
            };
            (out.repaint, control)
        }
        Trigger::Colon => {
            let visible = clock.toggle();
            tracing::trace!(visible, "colon toggled");
            (true, TriggerControl::Continue)
        }
    };
    if changed {
        repaint.request();
    }
    (changed, control)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::records::LayerRecord;
    use crate::clock::source::{FixedClock, HhMm};
    use crate::foundation::error::{LoadError, SpriteClockError};
    use crate::render::surface::DisplayList;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn frames(n: usize) -> FrameRecords {
        FrameRecords(vec![vec![LayerRecord::new("#ffffff", "M0,0 L5,0 L5,5 Z")]; n])
    }

    #[test]
    fn failed_load_yields_no_view() {
        let bad = FrameRecords(vec![vec![LayerRecord::new("not-a-color", "M0,0 L1,1")]]);
        let err = SpriteClockView::load(&bad, &SequenceRecords::default(), ViewConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            SpriteClockError::Load(LoadError::MalformedLayer { .. })
        ));

        let err = SpriteClockView::from_json("[[]]", "[[0, 3]]", ViewConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SpriteClockError::Load(LoadError::InvalidIndex { index: 3, .. })
        ));
    }

    #[test]
    fn stopped_tracks_lose_their_trigger() {
        let mut view = SpriteClockView::load(
            &frames(3),
            &SequenceRecords(vec![vec![0, 1, 2], vec![2, 1]]),
            ViewConfig::default(),
        )
        .unwrap();

        // overlay: 110 -> index 1, 220 -> stops
        view.advance_to(ms(250));
        assert!(!view.is_running(Track::Overlay));
        assert!(!view.scheduler().is_enabled(Trigger::Track(Track::Overlay)));

        let fired = view.advance_to(ms(2000));
        assert!(
            fired
                .iter()
                .all(|f| f.trigger != Trigger::Track(Track::Overlay))
        );
        assert!(!view.is_running(Track::Base));
        assert!(view.scheduler().is_enabled(Trigger::Colon));
    }

    #[test]
    fn colon_toggles_once_per_second() {
        let mut view =
            SpriteClockView::load(&frames(1), &SequenceRecords::default(), ViewConfig::default())
                .unwrap();
        assert!(view.clock_state().colon_visible);
        view.advance_to(ms(999));
        assert!(view.clock_state().colon_visible);
        view.advance_to(ms(1000));
        assert!(!view.clock_state().colon_visible);
        view.advance_to(ms(3000));
        assert!(!view.clock_state().colon_visible);
    }

    #[test]
    fn repaint_requests_coalesce_between_renders() {
        let mut view = SpriteClockView::load(
            &frames(2),
            &SequenceRecords(vec![vec![0, 1, 0, 1]]),
            ViewConfig::default(),
        )
        .unwrap();
        assert!(view.take_repaint());
        assert!(!view.take_repaint());

        let fired = view.advance_to(ms(500));
        assert!(fired.len() > 1);
        assert!(view.take_repaint());
        assert!(!view.take_repaint());
    }

    #[test]
    fn external_trigger_matches_virtual_time() {
        let mut view = SpriteClockView::load(
            &frames(2),
            &SequenceRecords(vec![vec![0], vec![1]]),
            ViewConfig::default(),
        )
        .unwrap();
        assert!(view.on_trigger(Trigger::Track(Track::Overlay)));
        assert!(!view.scheduler().is_enabled(Trigger::Track(Track::Overlay)));
        assert!(!view.on_trigger(Trigger::Track(Track::Overlay)));

        let mut dl = DisplayList::new();
        let stats = view
            .render(
                &mut dl,
                Viewport::new(800.0, 600.0),
                &FixedClock(HhMm::parse("0000").unwrap()),
            )
            .unwrap();
        assert_eq!(stats.base_layers, 1);
        assert_eq!(stats.overlay_layers, 0);
    }
}
