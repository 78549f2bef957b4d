//! Display controller
//!
//! Owns every piece of core state and runs the per-tick sequence:
//! expire notifications, gather inputs, select a face, advance the
//! marquee. Link events are applied between ticks and become visible on
//! the next one.

use embedded_hal::delay::DelayNs;

use crate::config::{DisplayConfig, MAX_NOTIFICATIONS, TRANSITION_DIM_MS};
use crate::face::Face;
use crate::marquee::{char_window, Marquee};
use crate::notification::{NotificationItem, NotificationQueue};
use crate::scheduler::{Decision, ModeScheduler, TickInputs};
use crate::state::{LinkEvent, LinkStatus};
use crate::traits::FaceRenderer;
use crate::weather::{Forecast, ForecastEntry, WeatherCache, WeatherSnapshot};
use crate::Millis;

/// Read-only snapshot of what a face needs to draw itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceView<'a> {
    /// Time of the tick being rendered
    pub now_ms: Millis,
    /// Notification being shown
    pub notification: Option<&'a NotificationItem>,
    /// 1-based position of that notification and the queue length
    pub position: Option<(usize, usize)>,
    /// Weather to show, live or cached
    pub weather: Option<&'a WeatherSnapshot>,
    /// Weather comes from the cache rather than the live link
    pub weather_from_cache: bool,
    /// Age of cached weather; `None` while live
    pub weather_age_ms: Option<Millis>,
    /// Live forecast entries, empty when there are none
    pub forecast: &'a [ForecastEntry],
    /// Visible part of the city name
    pub city: &'a str,
    /// Link status
    pub link: LinkStatus,
}

/// Orchestration core for one display
pub struct Controller<const C: usize = MAX_NOTIFICATIONS> {
    config: DisplayConfig,
    scheduler: ModeScheduler,
    queue: NotificationQueue<C>,
    cache: WeatherCache,
    marquee: Marquee,
    link: LinkStatus,
    forecast: Forecast,
}

impl<const C: usize> Controller<C> {
    /// Create a controller; the first tick always redraws
    pub fn new(config: DisplayConfig) -> Self {
        Self {
            scheduler: ModeScheduler::new(&config),
            queue: NotificationQueue::new(config.notifications),
            cache: WeatherCache::new(config.weather),
            marquee: Marquee::new(),
            link: LinkStatus::new(),
            forecast: Forecast::new(),
            config,
        }
    }

    /// Apply a link event
    ///
    /// Returns the notification evicted to make room, if any.
    pub fn handle_event(&mut self, event: LinkEvent, now: Millis) -> Option<NotificationItem> {
        self.link.apply(&event);

        match event {
            LinkEvent::Notification(item) => {
                let evicted = self.queue.push(item, now);
                self.scheduler.mark_dirty();
                evicted
            }
            LinkEvent::Weather {
                current,
                location,
                mut forecast,
                entries,
            } => {
                if entries >= 1 {
                    self.cache.update(current.with_location(&location), now);
                }
                forecast.truncate(usize::from(self.link.weather_entries.saturating_sub(1)));
                self.forecast = forecast;
                self.scheduler.mark_dirty();
                None
            }
            LinkEvent::Disconnected => {
                // Forecast is only shown from the live link
                self.forecast.clear();
                self.scheduler.mark_dirty();
                None
            }
            LinkEvent::Connected => {
                self.scheduler.mark_dirty();
                None
            }
            // Picked up by the scheduler on the next tick
            LinkEvent::Navigation(_) => None,
        }
    }

    /// Run one control-loop tick
    pub fn tick(&mut self, now: Millis) -> Decision {
        let navigating = self.link.navigating();
        self.queue.expire(now, navigating);

        let inputs = self.inputs(now);
        let decision = self.scheduler.update(now, &inputs, &self.config.faces);

        if decision.face == Face::Weather {
            if decision.face_changed {
                self.marquee.reset(now);
            }
            let (weather, _) = shown_weather(&self.cache, &self.link, now);
            let city = weather.map_or("", |w| w.city.as_str());
            // Picked up by the redraw rule on the next tick
            if self.marquee.update(city, now, &self.config.scroll) {
                self.scheduler.mark_dirty();
            }
        }

        decision
    }

    /// Scheduler inputs for the current state
    pub fn inputs(&self, now: Millis) -> TickInputs {
        let navigating = self.link.navigating();
        TickInputs {
            connection_active: self.link.connected,
            navigation_active: self.link.navigation_active,
            notification_active: self.queue.has_active(now, navigating),
            weather_available: self.cache.has_data(self.link.weather_live(), now),
            forecast_available: self.link.forecast_live(),
        }
    }

    /// Data for the renderer
    pub fn view(&self, now: Millis) -> FaceView<'_> {
        let (weather, weather_from_cache) = shown_weather(&self.cache, &self.link, now);
        let width = usize::from(self.config.scroll.visible_chars);
        let city = match weather {
            Some(w) if self.marquee.text() == w.city.as_str() => self.marquee.window(width),
            Some(w) => char_window(&w.city, 0, width),
            None => "",
        };

        FaceView {
            now_ms: now,
            notification: self.queue.active(),
            position: self.queue.position(),
            weather,
            weather_from_cache,
            weather_age_ms: weather_from_cache.then(|| self.cache.age(now)).flatten(),
            forecast: &self.forecast,
            city,
            link: self.link,
        }
    }

    /// Draw the decided face if it needs a redraw
    ///
    /// Dims the panel for [`TRANSITION_DIM_MS`] first when the decision
    /// asks for a transition. Returns whether anything was drawn.
    pub fn present<R, D>(
        &self,
        decision: &Decision,
        now: Millis,
        renderer: &mut R,
        delay: &mut D,
    ) -> Result<bool, R::Error>
    where
        R: FaceRenderer,
        D: DelayNs,
    {
        if !decision.redraw {
            return Ok(false);
        }

        if decision.transition {
            renderer.set_dimmed(true)?;
            delay.delay_ms(TRANSITION_DIM_MS);
            renderer.set_dimmed(false)?;
        }

        renderer.render(decision.face, &self.view(now))?;
        Ok(true)
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Face scheduler
    pub fn scheduler(&self) -> &ModeScheduler {
        &self.scheduler
    }

    /// Notification queue
    pub fn queue(&self) -> &NotificationQueue<C> {
        &self.queue
    }

    /// Weather cache
    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// Link status
    pub fn link(&self) -> &LinkStatus {
        &self.link
    }
}

/// Weather to show and whether it came from the cache
fn shown_weather<'a>(
    cache: &'a WeatherCache,
    link: &LinkStatus,
    now: Millis,
) -> (Option<&'a WeatherSnapshot>, bool) {
    if link.weather_live() {
        (cache.latest(), false)
    } else {
        let cached = cache.get_cached(now);
        (cached, cached.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;
    use crate::face::FaceSet;
    use heapless::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Dim(bool),
        Render(Face),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call, 16>,
    }

    impl FaceRenderer for Recorder {
        type Error = ();

        fn set_dimmed(&mut self, dimmed: bool) -> Result<(), ()> {
            self.calls.push(Call::Dim(dimmed)).map_err(|_| ())
        }

        fn render(&mut self, face: Face, _view: &FaceView<'_>) -> Result<(), ()> {
            self.calls.push(Call::Render(face)).map_err(|_| ())
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.ns += u64::from(ns);
        }
    }

    fn controller() -> Controller {
        Controller::new(DisplayConfig::default())
    }

    fn controller_with(faces: &[Face]) -> Controller {
        let config = DisplayConfig {
            faces: FaceConfig::new(FaceSet::from_faces(faces)),
            ..DisplayConfig::default()
        };
        Controller::new(config)
    }

    fn note(title: &str, now: Millis) -> LinkEvent {
        LinkEvent::Notification(NotificationItem::new("Chat", title, "hi", now))
    }

    const FORECAST: [ForecastEntry; 4] = [
        ForecastEntry::new(19, 23, 12, 1),
        ForecastEntry::new(16, 20, 10, 3),
        ForecastEntry::new(14, 17, 9, 4),
        ForecastEntry::new(17, 21, 11, 2),
    ];

    /// Weather update with `forecast` forecast entries
    fn weather(city: &str, forecast: usize) -> LinkEvent {
        LinkEvent::weather(
            WeatherSnapshot::new(18, 22, 11, 800, city),
            "",
            &FORECAST[..forecast],
        )
    }

    #[test]
    fn test_notification_interrupts_and_expires() {
        let mut ctl = controller();
        assert_eq!(ctl.tick(0).face, Face::Time);

        assert!(ctl.handle_event(note("a", 1_000), 1_000).is_none());
        let decision = ctl.tick(1_000);
        assert_eq!(decision.face, Face::Notification);
        assert!(decision.redraw);

        assert_eq!(ctl.tick(6_999).face, Face::Notification);
        assert_eq!(ctl.tick(7_000).face, Face::Time);
        assert!(ctl.queue().is_empty());
    }

    #[test]
    fn test_queued_notifications_show_in_turn() {
        let mut ctl = controller();
        ctl.handle_event(note("a", 0), 0);
        ctl.handle_event(note("b", 100), 100);
        ctl.tick(100);
        assert_eq!(ctl.view(100).position, Some((2, 2)));
        assert_eq!(ctl.view(100).notification.map(|n| n.title()), Some("b"));

        // "b" times out, "a" gets a fresh display window
        ctl.tick(6_100);
        assert_eq!(ctl.view(6_100).notification.map(|n| n.title()), Some("a"));
        assert_eq!(ctl.tick(12_099).face, Face::Notification);
        assert_eq!(ctl.tick(12_100).face, Face::Time);
    }

    #[test]
    fn test_overflow_reports_eviction() {
        let mut ctl = controller();
        for i in 0..MAX_NOTIFICATIONS as u32 {
            assert!(ctl.handle_event(note("x", i), i).is_none());
        }
        let evicted = ctl.handle_event(note("late", 10), 10);
        assert_eq!(evicted.map(|n| n.received_ms()), Some(0));
        assert_eq!(ctl.queue().len(), MAX_NOTIFICATIONS);
    }

    #[test]
    fn test_navigation_shortens_notifications() {
        let mut ctl = controller();
        ctl.handle_event(LinkEvent::Connected, 0);
        ctl.handle_event(LinkEvent::Navigation(true), 0);
        assert_eq!(ctl.tick(500).face, Face::Navigation);

        ctl.handle_event(note("turn", 1_000), 1_000);
        assert_eq!(ctl.tick(3_999).face, Face::Notification);
        assert_eq!(ctl.tick(4_000).face, Face::Navigation);
    }

    #[test]
    fn test_live_then_cached_weather() {
        let mut ctl = controller();
        ctl.handle_event(LinkEvent::Connected, 0);
        ctl.handle_event(weather("Porto", 0), 0);

        let view = ctl.view(10);
        assert_eq!(view.weather.map(|w| w.temperature), Some(18));
        assert!(!view.weather_from_cache);
        assert_eq!(view.weather_age_ms, None);
        assert!(ctl.inputs(10).weather_available);
        assert!(!ctl.inputs(10).forecast_available);

        ctl.handle_event(LinkEvent::Disconnected, 1_000);
        let view = ctl.view(2_000);
        assert!(view.weather_from_cache);
        assert_eq!(view.weather_age_ms, Some(2_000));
        assert_eq!(view.city, "Porto");
        assert!(ctl.inputs(2_000).weather_available);

        let ttl = ctl.config().weather.max_age_ms;
        assert!(ctl.view(ttl).weather.is_none());
        assert!(!ctl.inputs(ttl).weather_available);
    }

    #[test]
    fn test_empty_weather_update_keeps_cache() {
        let mut ctl = controller();
        let empty = LinkEvent::Weather {
            current: WeatherSnapshot::new(18, 22, 11, 800, "Porto"),
            location: Default::default(),
            forecast: Default::default(),
            entries: 0,
        };
        ctl.handle_event(empty, 0);
        assert!(ctl.cache().latest().is_none());
        assert!(!ctl.inputs(0).weather_available);
    }

    #[test]
    fn test_forecast_joins_rotation() {
        let mut ctl = controller();
        ctl.handle_event(LinkEvent::Connected, 0);
        ctl.handle_event(weather("Porto", 2), 0);
        ctl.tick(0);
        assert_eq!(ctl.tick(20_000).face, Face::Weather);
        assert_eq!(ctl.tick(30_000).face, Face::Forecast);
        assert_eq!(ctl.tick(40_000).face, Face::Time);
    }

    #[test]
    fn test_forecast_entries_reach_view() {
        let mut ctl = controller();
        ctl.handle_event(LinkEvent::Connected, 0);
        ctl.handle_event(weather("Porto", 4), 0);

        let view = ctl.view(0);
        assert_eq!(view.forecast, &FORECAST[..]);
        assert_eq!(view.forecast[1].condition(), FORECAST[1].condition());

        // A shorter update replaces the whole forecast
        ctl.handle_event(weather("Porto", 1), 100);
        assert_eq!(ctl.view(100).forecast, &FORECAST[..1]);
    }

    #[test]
    fn test_disconnect_drops_forecast() {
        let mut ctl = controller();
        ctl.handle_event(LinkEvent::Connected, 0);
        ctl.handle_event(weather("Porto", 3), 0);
        ctl.handle_event(LinkEvent::Disconnected, 500);

        assert!(ctl.view(600).forecast.is_empty());
        assert!(!ctl.inputs(600).forecast_available);
        // Current weather survives in the cache
        assert!(ctl.view(600).weather.is_some());
    }

    #[test]
    fn test_location_name_replaces_provider_city() {
        let mut ctl = controller();
        ctl.handle_event(LinkEvent::Connected, 0);
        let event = LinkEvent::weather(WeatherSnapshot::new(18, 22, 11, 800, "Porto"), "Gaia", &[]);
        ctl.handle_event(event, 0);
        assert_eq!(ctl.view(0).city, "Gaia");

        ctl.handle_event(weather("Porto", 0), 100);
        assert_eq!(ctl.view(100).city, "Porto");
    }

    #[test]
    fn test_marquee_requests_redraw() {
        let mut ctl = controller_with(&[Face::Weather]);
        ctl.handle_event(weather("Santa Cruz de la Sierra", 0), 0);

        assert!(ctl.tick(0).redraw);
        assert!(!ctl.tick(100).redraw);
        assert!(!ctl.tick(2_000).redraw);
        assert_eq!(ctl.view(2_000).city, "Santa Cruz de la Sie");

        // The step at 2300 is drawn on the following tick
        assert!(!ctl.tick(2_300).redraw);
        assert!(ctl.tick(2_400).redraw);
        assert_eq!(ctl.view(2_400).city, "anta Cruz de la Sier");
    }

    #[test]
    fn test_present_skips_without_redraw() {
        let mut ctl = controller();
        let mut renderer = Recorder::default();
        let mut delay = CountingDelay::default();

        let decision = ctl.tick(0);
        assert_eq!(ctl.present(&decision, 0, &mut renderer, &mut delay), Ok(true));
        let decision = ctl.tick(100);
        assert_eq!(ctl.present(&decision, 100, &mut renderer, &mut delay), Ok(false));

        assert_eq!(renderer.calls.as_slice(), &[Call::Render(Face::Time)]);
        assert_eq!(delay.ns, 0);
    }

    #[test]
    fn test_present_dims_on_transition() {
        let mut ctl = controller();
        let mut renderer = Recorder::default();
        let mut delay = CountingDelay::default();

        ctl.handle_event(LinkEvent::Connected, 0);
        ctl.handle_event(LinkEvent::Navigation(true), 0);
        let decision = ctl.tick(0);
        ctl.present(&decision, 0, &mut renderer, &mut delay).unwrap();

        ctl.handle_event(LinkEvent::Navigation(false), 50);
        let decision = ctl.tick(100);
        assert_eq!(decision.face, Face::Time);
        assert!(decision.transition);
        ctl.present(&decision, 100, &mut renderer, &mut delay).unwrap();

        assert_eq!(
            renderer.calls.as_slice(),
            &[
                Call::Render(Face::Navigation),
                Call::Dim(true),
                Call::Dim(false),
                Call::Render(Face::Time),
            ]
        );
        assert_eq!(delay.ns, u64::from(TRANSITION_DIM_MS) * 1_000_000);
    }
}
