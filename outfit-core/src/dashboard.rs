//! Dashboard controller.
//!
//! [`DashboardState::reduce`] is a pure transition function: it never does I/O,
//! it only describes the work to do as [`Effect`]s. [`Dashboard`] owns the
//! current state, runs those effects as tasks and feeds their results back in
//! as actions.
//!
//! Every weather fetch and keyword derivation carries a request token. A result
//! is applied only if its token is still the newest one issued, so a slow
//! response can never overwrite a newer one.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    catalog::ImageCatalog,
    error::DashboardError,
    forecast::WeatherSource,
    generator::KeywordGenerator,
    keywords::derive_keywords,
    model::{
        DailyForecast, ImageCatalogEntry, KeywordRequest, OutfitKeywords, UserSettings,
        WeatherSnapshot,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-visible, non-fatal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn info(title: &str, message: String) -> Self {
        Self { level: NoticeLevel::Info, title: title.to_string(), message }
    }

    fn error(title: &str, message: &str) -> Self {
        Self { level: NoticeLevel::Error, title: title.to_string(), message: message.to_string() }
    }
}

/// Result of asking the platform for the user's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationOutcome {
    Available,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CitySearched(String),
    SettingsSaved(UserSettings),
    WeatherResolved { token: u64, result: Result<WeatherSnapshot, DashboardError> },
    KeywordsResolved { token: u64, result: Result<OutfitKeywords, DashboardError> },
    ImageCycled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchWeather { token: u64, city: String },
    DeriveKeywords { token: u64, request: KeywordRequest },
    Notify(Notice),
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: DashboardState,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    catalog: Arc<ImageCatalog>,
    settings: UserSettings,
    snapshot: Option<WeatherSnapshot>,
    keywords: Option<OutfitKeywords>,
    weather_phase: Phase,
    outfit_phase: Phase,
    matched: Vec<ImageCatalogEntry>,
    image_index: usize,
    weather_token: u64,
    keyword_token: u64,
}

impl DashboardState {
    pub fn new(catalog: Arc<ImageCatalog>, settings: UserSettings) -> Self {
        let matched = catalog.entries().to_vec();
        Self {
            catalog,
            settings,
            snapshot: None,
            keywords: None,
            weather_phase: Phase::Idle,
            outfit_phase: Phase::Idle,
            matched,
            image_index: 0,
            weather_token: 0,
            keyword_token: 0,
        }
    }

    pub fn reduce(&self, action: Action) -> Transition {
        let mut next = self.clone();
        let mut effects = Vec::new();

        match action {
            Action::CitySearched(query) => {
                let city = query.trim();
                if !city.is_empty() {
                    next.weather_token += 1;
                    next.weather_phase = Phase::Loading;
                    effects.push(Effect::FetchWeather {
                        token: next.weather_token,
                        city: city.to_string(),
                    });
                }
            }
            Action::SettingsSaved(settings) => {
                next.settings = settings;
                next.begin_derivation(&mut effects);
            }
            Action::WeatherResolved { token, result } => {
                if token != self.weather_token {
                    tracing::debug!(token, latest = self.weather_token, "discarding stale forecast");
                } else {
                    match result {
                        Ok(snapshot) => {
                            next.snapshot = Some(snapshot);
                            next.weather_phase = Phase::Ready;
                            next.begin_derivation(&mut effects);
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "forecast failed, keeping previous snapshot");
                            next.weather_phase = Phase::Error;
                            effects.push(Effect::Notify(Notice::error(
                                "Error",
                                "Failed to fetch weather data. Please try again.",
                            )));
                        }
                    }
                }
            }
            Action::KeywordsResolved { token, result } => {
                if token != self.keyword_token {
                    tracing::debug!(token, latest = self.keyword_token, "discarding stale keywords");
                } else {
                    match result {
                        Ok(keywords) => {
                            next.matched = self
                                .catalog
                                .match_outfits(self.settings.gender, self.settings.style);
                            next.keywords = Some(keywords);
                            next.outfit_phase = Phase::Ready;
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "falling back to the full catalogue");
                            next.matched = self.catalog.entries().to_vec();
                            next.keywords = None;
                            next.outfit_phase = Phase::Error;
                            effects.push(Effect::Notify(Notice::error(
                                "AI Error",
                                "Could not generate outfit keywords.",
                            )));
                        }
                    }
                    next.image_index = 0;
                }
            }
            Action::ImageCycled => {
                if !next.matched.is_empty() {
                    next.image_index = (next.image_index + 1) % next.matched.len();
                }
            }
        }

        Transition { state: next, effects }
    }

    fn begin_derivation(&mut self, effects: &mut Vec<Effect>) {
        let Some(today) = self.snapshot.as_ref().and_then(WeatherSnapshot::today) else {
            return;
        };

        let request = KeywordRequest {
            temperature: f64::from(today.avg_temp_c),
            gender: self.settings.gender,
            style: self.settings.style,
        };
        self.keyword_token += 1;
        self.outfit_phase = Phase::Loading;
        effects.push(Effect::DeriveKeywords { token: self.keyword_token, request });
    }

    pub fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }

    pub fn settings(&self) -> UserSettings {
        self.settings
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn keywords(&self) -> Option<&OutfitKeywords> {
        self.keywords.as_ref()
    }

    pub fn weather_phase(&self) -> Phase {
        self.weather_phase
    }

    pub fn outfit_phase(&self) -> Phase {
        self.outfit_phase
    }

    pub fn matched(&self) -> &[ImageCatalogEntry] {
        &self.matched
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn today(&self) -> Option<&DailyForecast> {
        self.snapshot.as_ref().and_then(WeatherSnapshot::today)
    }

    pub fn current_image(&self) -> Option<&ImageCatalogEntry> {
        self.matched.get(self.image_index)
    }

    /// True while the forecast, or the outfit for a shown forecast, is loading.
    pub fn is_busy(&self) -> bool {
        self.weather_phase == Phase::Loading
            || (self.outfit_phase == Phase::Loading && self.snapshot.is_some())
    }

    /// The six days after today, each with its catalogue tile.
    pub fn week_ahead(&self) -> Vec<(&DailyForecast, Option<&ImageCatalogEntry>)> {
        self.snapshot
            .iter()
            .flat_map(|s| s.forecast.iter().enumerate().skip(1))
            .map(|(offset, day)| (day, self.catalog.weekly_tile(offset)))
            .collect()
    }
}

/// City to show first, plus a notice when the user's location was unavailable.
pub fn initial_city(location: LocationOutcome, fallback_city: &str) -> (String, Option<Notice>) {
    let notice = match location {
        LocationOutcome::Available => None,
        LocationOutcome::Unavailable => {
            tracing::warn!("location unavailable, using {fallback_city}");
            Some(Notice::info(
                "Location Access",
                format!("Could not get your location. Showing weather for {fallback_city}."),
            ))
        }
    };
    (fallback_city.to_string(), notice)
}

/// Runs reducer effects against real collaborators.
#[derive(Debug)]
pub struct Dashboard {
    state: DashboardState,
    weather: Arc<dyn WeatherSource>,
    generator: Arc<dyn KeywordGenerator>,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    in_flight: usize,
    notices: Vec<Notice>,
}

impl Dashboard {
    pub fn new(
        state: DashboardState,
        weather: Arc<dyn WeatherSource>,
        generator: Arc<dyn KeywordGenerator>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, weather, generator, tx, rx, in_flight: 0, notices: Vec::new() }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Resolve the first city and start fetching it.
    pub fn start(&mut self, location: LocationOutcome, fallback_city: &str) {
        let (city, notice) = initial_city(location, fallback_city);
        if let Some(notice) = notice {
            self.notices.push(notice);
        }
        self.dispatch(Action::CitySearched(city));
    }

    pub fn dispatch(&mut self, action: Action) {
        let Transition { state, effects } = self.state.reduce(action);
        self.state = state;
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Notify(notice) => self.notices.push(notice),
            Effect::FetchWeather { token, city } => {
                tracing::info!(%city, token, "fetching forecast");
                let weather = Arc::clone(&self.weather);
                let tx = self.tx.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let fetch = tokio::spawn(async move { weather.forecast(&city).await });
                    let result = fetch.await.unwrap_or_else(|err| {
                        tracing::error!(token, error = %err, "forecast task failed");
                        Err(DashboardError::WeatherFetch(format!("Forecast task failed: {err}")))
                    });
                    if tx.send(Action::WeatherResolved { token, result }).is_err() {
                        tracing::debug!(token, "dashboard dropped before forecast arrived");
                    }
                });
            }
            Effect::DeriveKeywords { token, request } => {
                tracing::info!(temperature = request.temperature, token, "deriving outfit keywords");
                let generator = Arc::clone(&self.generator);
                let tx = self.tx.clone();
                self.in_flight += 1;
                tokio::spawn(async move {
                    let derive =
                        tokio::spawn(async move { derive_keywords(generator.as_ref(), &request).await });
                    let result = derive.await.unwrap_or_else(|err| {
                        tracing::error!(token, error = %err, "keyword task failed");
                        Err(DashboardError::ExternalService(format!("Keyword task failed: {err}")))
                    });
                    if tx.send(Action::KeywordsResolved { token, result }).is_err() {
                        tracing::debug!(token, "dashboard dropped before keywords arrived");
                    }
                });
            }
        }
    }

    /// Number of effects still running.
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    /// Wait for the next finished effect and apply it. Returns `false` when
    /// nothing is in flight.
    pub async fn next_resolution(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(action) => {
                self.in_flight -= 1;
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Apply results until no effect is in flight, including follow-ups.
    pub async fn settle(&mut self) {
        while self.next_resolution().await {}
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        forecast::{MockWeatherSource, synthesize},
        generator::offline::OfflineGenerator,
        model::{Gender, Style},
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::{collections::HashSet, time::Duration};

    fn catalog() -> Arc<ImageCatalog> {
        Arc::new(ImageCatalog::builtin().unwrap())
    }

    fn snapshot(city: &str) -> WeatherSnapshot {
        synthesize(city, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(), || 0.0)
    }

    fn keywords(text: &str) -> OutfitKeywords {
        OutfitKeywords { keywords: text.to_string() }
    }

    /// Drive a fresh state through search + forecast; returns it with the
    /// pending derivation token.
    fn with_forecast(settings: UserSettings) -> (DashboardState, u64) {
        let state = DashboardState::new(catalog(), settings);
        let state = state.reduce(Action::CitySearched("london".into())).state;
        let t = state.reduce(Action::WeatherResolved { token: 1, result: Ok(snapshot("london")) });
        let token = match t.effects.as_slice() {
            [Effect::DeriveKeywords { token, .. }] => *token,
            other => panic!("unexpected effects: {other:?}"),
        };
        (t.state, token)
    }

    #[test]
    fn search_starts_loading_and_requests_forecast() {
        let state = DashboardState::new(catalog(), UserSettings::default());
        let t = state.reduce(Action::CitySearched("  Paris ".into()));

        assert_eq!(t.state.weather_phase(), Phase::Loading);
        assert!(t.state.is_busy());
        assert_eq!(t.effects, vec![Effect::FetchWeather { token: 1, city: "Paris".into() }]);
    }

    #[test]
    fn blank_search_is_ignored() {
        let state = DashboardState::new(catalog(), UserSettings::default());
        let t = state.reduce(Action::CitySearched("   ".into()));
        assert!(t.effects.is_empty());
        assert_eq!(t.state.weather_phase(), Phase::Idle);
    }

    #[test]
    fn forecast_triggers_derivation_with_todays_average() {
        let settings = UserSettings { gender: Gender::Female, style: Style::Sporty };
        let state = DashboardState::new(catalog(), settings)
            .reduce(Action::CitySearched("london".into()))
            .state;
        let london = snapshot("london");
        let avg = london.forecast[0].avg_temp_c;

        let t = state.reduce(Action::WeatherResolved { token: 1, result: Ok(london) });

        assert_eq!(t.state.weather_phase(), Phase::Ready);
        assert_eq!(t.state.outfit_phase(), Phase::Loading);
        assert_eq!(t.state.snapshot().unwrap().country, "GB");
        assert_eq!(
            t.effects,
            vec![Effect::DeriveKeywords {
                token: 1,
                request: KeywordRequest {
                    temperature: f64::from(avg),
                    gender: Gender::Female,
                    style: Style::Sporty
                },
            }]
        );
    }

    #[test]
    fn stale_forecast_is_discarded() {
        let state = DashboardState::new(catalog(), UserSettings::default())
            .reduce(Action::CitySearched("london".into()))
            .state
            .reduce(Action::CitySearched("tokyo".into()))
            .state;

        let t = state.reduce(Action::WeatherResolved { token: 1, result: Ok(snapshot("london")) });
        assert!(t.effects.is_empty());
        assert!(t.state.snapshot().is_none());
        assert_eq!(t.state.weather_phase(), Phase::Loading);

        let t = t.state.reduce(Action::WeatherResolved { token: 2, result: Ok(snapshot("tokyo")) });
        assert_eq!(t.state.snapshot().unwrap().city, "Tokyo");
    }

    #[test]
    fn failed_forecast_keeps_previous_snapshot() {
        let (state, _) = with_forecast(UserSettings::default());
        let state = state.reduce(Action::CitySearched("paris".into())).state;

        let t = state.reduce(Action::WeatherResolved {
            token: 2,
            result: Err(DashboardError::WeatherFetch("timeout".into())),
        });

        assert_eq!(t.state.weather_phase(), Phase::Error);
        assert_eq!(t.state.snapshot().unwrap().city, "London");
        assert!(matches!(
            t.effects.as_slice(),
            [Effect::Notify(Notice { level: NoticeLevel::Error, .. })]
        ));
    }

    #[test]
    fn keywords_filter_catalogue_and_reset_cursor() {
        let settings = UserSettings { gender: Gender::Female, style: Style::Sporty };
        let (state, token) = with_forecast(settings);
        let state = state.reduce(Action::ImageCycled).state;
        assert_eq!(state.image_index(), 1);

        let t = state.reduce(Action::KeywordsResolved {
            token,
            result: Ok(keywords("Jacket Female Sporty Outfit")),
        });

        assert_eq!(t.state.outfit_phase(), Phase::Ready);
        assert_eq!(t.state.image_index(), 0);
        assert_eq!(t.state.current_image().unwrap().id, "outfit-2");
        assert!(!t.state.is_busy());
    }

    #[test]
    fn keyword_failure_shows_full_catalogue_with_notice() {
        let (state, token) = with_forecast(UserSettings::default());
        let t = state.reduce(Action::KeywordsResolved {
            token,
            result: Err(DashboardError::ExternalService("bad schema".into())),
        });

        assert_eq!(t.state.outfit_phase(), Phase::Error);
        assert_eq!(t.state.matched().len(), t.state.catalog().len());
        assert_eq!(t.effects.len(), 1);
    }

    #[test]
    fn late_response_from_older_request_is_ignored() {
        let (state, first) = with_forecast(UserSettings::default());
        let newer = UserSettings { gender: Gender::Female, style: Style::Sweet };
        let t = state.reduce(Action::SettingsSaved(newer));
        let second = match t.effects.as_slice() {
            [Effect::DeriveKeywords { token, request }] => {
                assert_eq!(request.style, Style::Sweet);
                *token
            }
            other => panic!("unexpected effects: {other:?}"),
        };
        assert!(second > first);

        let state = t
            .state
            .reduce(Action::KeywordsResolved { token: second, result: Ok(keywords("new")) })
            .state
            .reduce(Action::KeywordsResolved { token: first, result: Ok(keywords("old")) })
            .state;

        assert_eq!(state.keywords().unwrap().keywords, "new");
        assert_eq!(state.current_image().unwrap().id, "outfit-5");
    }

    #[test]
    fn settings_without_forecast_only_update_settings() {
        let state = DashboardState::new(catalog(), UserSettings::default());
        let settings = UserSettings { gender: Gender::Neutral, style: Style::Business };
        let t = state.reduce(Action::SettingsSaved(settings));
        assert!(t.effects.is_empty());
        assert_eq!(t.state.settings(), settings);
    }

    #[test]
    fn cycling_visits_each_image_once_per_lap() {
        let mut state = DashboardState::new(catalog(), UserSettings::default());
        let len = state.matched().len();
        let mut seen = HashSet::new();

        for _ in 0..len {
            assert!(seen.insert(state.current_image().unwrap().id.clone()));
            state = state.reduce(Action::ImageCycled).state;
        }

        assert_eq!(seen.len(), len);
        assert_eq!(state.image_index(), 0);
    }

    #[test]
    fn cycling_empty_catalogue_is_a_no_op() {
        let state = DashboardState::new(Arc::new(ImageCatalog::new(Vec::new())), UserSettings::default());
        let state = state.reduce(Action::ImageCycled).state;
        assert_eq!(state.image_index(), 0);
        assert!(state.current_image().is_none());
    }

    #[test]
    fn week_ahead_skips_today() {
        let (state, _) = with_forecast(UserSettings::default());
        let week = state.week_ahead();
        assert_eq!(week.len(), 6);
        assert_eq!(week[0].0, &state.snapshot().unwrap().forecast[1]);
        assert_eq!(week[0].1.unwrap().id, "outfit-4");
    }

    #[test]
    fn initial_city_always_uses_fallback() {
        let (city, notice) = initial_city(LocationOutcome::Available, "Taipei");
        assert_eq!(city, "Taipei");
        assert!(notice.is_none());

        let (city, notice) = initial_city(LocationOutcome::Unavailable, "Taipei");
        assert_eq!(city, "Taipei");
        assert_eq!(
            notice.unwrap().message,
            "Could not get your location. Showing weather for Taipei."
        );
    }

    #[derive(Debug)]
    struct Unreachable;

    #[async_trait]
    impl KeywordGenerator for Unreachable {
        fn name(&self) -> &'static str {
            "unreachable"
        }

        async fn generate(&self, _request: &KeywordRequest) -> anyhow::Result<OutfitKeywords> {
            Err(anyhow::anyhow!("service unavailable"))
        }
    }

    /// Answers slowly for men, instantly for everyone else.
    #[derive(Debug)]
    struct SlowForMen;

    #[async_trait]
    impl KeywordGenerator for SlowForMen {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn generate(&self, request: &KeywordRequest) -> anyhow::Result<OutfitKeywords> {
            if request.gender == Gender::Male {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Ok(OutfitKeywords { keywords: format!("{} Outfit", request.gender) })
        }
    }

    /// Wraps a usable phrase in chatter over two lines.
    #[derive(Debug)]
    struct Chatty;

    #[async_trait]
    impl KeywordGenerator for Chatty {
        fn name(&self) -> &'static str {
            "chatty"
        }

        async fn generate(&self, _request: &KeywordRequest) -> anyhow::Result<OutfitKeywords> {
            Ok(OutfitKeywords { keywords: "Hoodie Female Sporty Outfit\n(hope this helps)".into() })
        }
    }

    #[derive(Debug)]
    struct Panicky;

    #[async_trait]
    impl KeywordGenerator for Panicky {
        fn name(&self) -> &'static str {
            "panicky"
        }

        async fn generate(&self, _request: &KeywordRequest) -> anyhow::Result<OutfitKeywords> {
            panic!("generator blew up")
        }
    }

    #[derive(Debug)]
    struct PanickyWeather;

    #[async_trait]
    impl WeatherSource for PanickyWeather {
        async fn forecast(&self, _city: &str) -> Result<WeatherSnapshot, DashboardError> {
            panic!("weather source blew up")
        }
    }

    fn dashboard(generator: Arc<dyn KeywordGenerator>, settings: UserSettings) -> Dashboard {
        Dashboard::new(
            DashboardState::new(catalog(), settings),
            Arc::new(MockWeatherSource::instant()),
            generator,
        )
    }

    #[tokio::test]
    async fn london_female_sporty_end_to_end() {
        let settings = UserSettings { gender: Gender::Female, style: Style::Sporty };
        let mut dash = dashboard(Arc::new(OfflineGenerator), settings);

        dash.dispatch(Action::CitySearched("london".into()));
        dash.settle().await;

        let state = dash.state();
        assert_eq!(dash.pending(), 0);
        assert_eq!(state.weather_phase(), Phase::Ready);
        assert_eq!(state.outfit_phase(), Phase::Ready);
        let snapshot = state.snapshot().unwrap();
        assert_eq!(snapshot.country, "GB");
        assert_eq!(snapshot.forecast.len(), 7);
        assert!(state.keywords().unwrap().keywords.ends_with("Female Sporty Outfit"));
        assert!(state.matched().iter().all(|m| {
            let hint = m.image_hint.to_lowercase();
            hint.contains("female") && hint.contains("sporty")
        }));
        assert!(dash.take_notices().is_empty());
    }

    #[tokio::test]
    async fn start_without_location_shows_fallback_city_and_notice() {
        let mut dash = dashboard(Arc::new(OfflineGenerator), UserSettings::default());
        dash.start(LocationOutcome::Unavailable, "Taipei");
        dash.settle().await;

        assert_eq!(dash.state().snapshot().unwrap().country, "TW");
        let notices = dash.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Info);
    }

    #[tokio::test]
    async fn generator_outage_degrades_to_full_catalogue() {
        let mut dash = dashboard(Arc::new(Unreachable), UserSettings::default());
        dash.dispatch(Action::CitySearched("tokyo".into()));
        dash.settle().await;

        let state = dash.state();
        assert_eq!(state.weather_phase(), Phase::Ready);
        assert_eq!(state.outfit_phase(), Phase::Error);
        assert_eq!(state.matched().len(), state.catalog().len());
        let notices = dash.take_notices();
        assert_eq!(notices[0].title, "AI Error");
    }

    #[tokio::test]
    async fn newest_derivation_wins_even_if_older_finishes_last() {
        let mut dash = dashboard(Arc::new(SlowForMen), UserSettings::default());
        dash.dispatch(Action::CitySearched("paris".into()));
        // Apply the forecast; this starts the slow (Male) derivation.
        assert!(dash.next_resolution().await);

        dash.dispatch(Action::SettingsSaved(UserSettings {
            gender: Gender::Female,
            style: Style::Sweet,
        }));
        dash.settle().await;

        assert_eq!(dash.state().keywords().unwrap().keywords, "Female Outfit");
        assert_eq!(dash.state().settings().gender, Gender::Female);
    }

    #[tokio::test]
    async fn multiline_keywords_are_used_as_given() {
        let settings = UserSettings { gender: Gender::Female, style: Style::Sporty };
        let mut dash = dashboard(Arc::new(Chatty), settings);
        dash.dispatch(Action::CitySearched("london".into()));
        dash.settle().await;

        let state = dash.state();
        assert_eq!(state.outfit_phase(), Phase::Ready);
        assert_eq!(
            state.keywords().unwrap().keywords,
            "Hoodie Female Sporty Outfit\n(hope this helps)"
        );
        let ids: Vec<&str> = state.matched().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["outfit-2"]);
        assert!(dash.take_notices().is_empty());
    }

    #[tokio::test]
    async fn panicking_generator_still_settles() {
        let mut dash = dashboard(Arc::new(Panicky), UserSettings::default());
        dash.dispatch(Action::CitySearched("tokyo".into()));
        let settled = tokio::time::timeout(Duration::from_secs(2), dash.settle()).await;

        assert!(settled.is_ok(), "settle hung with {} task(s) pending", dash.pending());
        assert_eq!(dash.pending(), 0);
        let state = dash.state();
        assert_eq!(state.weather_phase(), Phase::Ready);
        assert_eq!(state.outfit_phase(), Phase::Error);
        assert_eq!(state.matched().len(), state.catalog().len());
        let notices = dash.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "AI Error");
    }

    #[tokio::test]
    async fn panicking_weather_source_still_settles() {
        let mut dash = Dashboard::new(
            DashboardState::new(catalog(), UserSettings::default()),
            Arc::new(PanickyWeather),
            Arc::new(OfflineGenerator),
        );
        dash.dispatch(Action::CitySearched("tokyo".into()));
        let settled = tokio::time::timeout(Duration::from_secs(2), dash.settle()).await;

        assert!(settled.is_ok(), "settle hung with {} task(s) pending", dash.pending());
        assert_eq!(dash.state().weather_phase(), Phase::Error);
        assert!(dash.state().snapshot().is_none());
        let notices = dash.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "Error");
    }
}
