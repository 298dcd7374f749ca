//! Application state management
//!
//! This module holds the current view, the fetched data, and every
//! user-driven selection. Key handling mutates state synchronously and
//! raises request flags; the event loop in main performs the async work
//! those flags ask for and calls back into the load methods here.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};

use crate::cli::{StartTab, StartupConfig};
use crate::data::{sample_response, DataClient, District, Record, RecordFilter};
use crate::metrics::{
    self, build_comparison, comparison_candidates, CompareScope, Comparison, Metric,
    TrendGranularity,
};

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while the first fetch runs
    Loading,
    /// List of districts with search and state filtering
    DistrictList,
    /// Detail view for the selected district
    DistrictDetail,
}

/// Tabs within the district detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    /// Latest monthly figures
    Current,
    /// Ranking against other districts
    Compare,
    /// Historical series
    Trends,
}

impl DetailTab {
    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Current => "Current",
            DetailTab::Compare => "Compare",
            DetailTab::Trends => "Trends",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            DetailTab::Current => DetailTab::Compare,
            DetailTab::Compare => DetailTab::Trends,
            DetailTab::Trends => DetailTab::Current,
        }
    }
}

impl From<StartTab> for DetailTab {
    fn from(tab: StartTab) -> Self {
        match tab {
            StartTab::Current => DetailTab::Current,
            StartTab::Compare => DetailTab::Compare,
            StartTab::Trends => DetailTab::Trends,
        }
    }
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Districts derived from the last broad fetch, in first-seen order
    pub districts: Vec<District>,
    /// Distinct state names available for filtering, ascending
    pub available_states: Vec<String>,
    /// Index of the selected row within the visible (filtered) list
    pub selected_index: usize,
    /// Live search text matched against district names
    pub search_input: String,
    /// Whether keystrokes currently edit the search text
    pub search_active: bool,
    /// Restricts the list to one state when set
    pub state_filter: Option<String>,
    /// The district open in the detail view
    pub selected_district: Option<District>,
    /// Monthly records fetched for the selected district
    pub district_records: Vec<Record>,
    /// Active tab in the detail view
    pub detail_tab: DetailTab,
    /// Vertical scroll offset within the detail body, clamped at render
    pub detail_scroll: u16,
    /// Index into [`Metric::TREND`] for the trends tab
    pub trend_metric_index: usize,
    /// Time bucketing on the trends tab
    pub trend_granularity: TrendGranularity,
    /// Financial-year filter on the trends tab; None shows all years
    pub trend_year: Option<String>,
    /// Index into [`Metric::ALL`] for the compare tab
    pub compare_metric_index: usize,
    /// Candidate scope on the compare tab
    pub compare_scope: CompareScope,
    /// Built comparison for the compare tab, once loaded
    pub comparison: Option<Comparison>,
    /// Transient notice shown in the status line (mostly errors)
    pub status_message: Option<String>,
    /// Timestamp of last data refresh
    pub last_refresh: Option<DateTime<Local>>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating a district-list refresh has been requested
    pub refresh_requested: bool,
    /// Flag indicating the selected district's records need (re)loading
    pub detail_load_requested: bool,
    /// Flag indicating the comparison needs (re)building
    pub comparison_load_requested: bool,
    /// Serving the built-in sample dataset instead of the live API
    pub demo: bool,
    /// District named on the command line, opened after the first load
    pending_district: Option<String>,
    client: DataClient,
}

impl App {
    /// Creates a new App instance around a data client
    pub fn new(client: DataClient) -> Self {
        Self {
            state: AppState::Loading,
            should_quit: false,
            districts: Vec::new(),
            available_states: Vec::new(),
            selected_index: 0,
            search_input: String::new(),
            search_active: false,
            state_filter: None,
            selected_district: None,
            district_records: Vec::new(),
            detail_tab: DetailTab::Current,
            detail_scroll: 0,
            trend_metric_index: 0,
            trend_granularity: TrendGranularity::Monthly,
            trend_year: None,
            compare_metric_index: 0,
            compare_scope: CompareScope::AllDistricts,
            comparison: None,
            status_message: None,
            last_refresh: None,
            show_help: false,
            refresh_requested: false,
            detail_load_requested: false,
            comparison_load_requested: false,
            demo: false,
            pending_district: None,
            client,
        }
    }

    /// Creates a new App instance with CLI startup options applied.
    pub fn with_startup_config(client: DataClient, config: StartupConfig) -> Self {
        let mut app = Self::new(client);
        app.state_filter = config.state;
        app.pending_district = config.district;
        app.detail_tab = DetailTab::from(config.tab);
        app.demo = config.demo;
        app
    }

    /// The districts currently visible in the list, after the state
    /// filter and the search text are applied. Search matches district
    /// or state name, case-insensitively.
    pub fn visible_districts(&self) -> Vec<&District> {
        let needle = self.search_input.to_lowercase();
        self.districts
            .iter()
            .filter(|d| match &self.state_filter {
                Some(state) => &d.state_name == state,
                None => true,
            })
            .filter(|d| {
                needle.is_empty()
                    || d.district_name.to_lowercase().contains(&needle)
                    || d.state_name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// The metric charted on the trends tab.
    pub fn trend_metric(&self) -> Metric {
        Metric::TREND[self.trend_metric_index % Metric::TREND.len()]
    }

    /// The metric ranked on the compare tab.
    pub fn compare_metric(&self) -> Metric {
        Metric::ALL[self.compare_metric_index % Metric::ALL.len()]
    }

    /// Loads the district list, either from the sample dataset or the
    /// live API. A set state filter narrows the upstream query itself.
    /// Transitions out of Loading and applies any pending district jump
    /// from the command line.
    pub async fn load_districts(&mut self) {
        let result = if self.demo {
            let mut response = sample_response();
            if let Some(state) = &self.state_filter {
                response.records.retain(|r| &r.state_name == state);
            }
            Ok(response)
        } else {
            let mut filter = RecordFilter::default();
            if let Some(state) = &self.state_filter {
                filter = filter.with_state(state.as_str());
            }
            self.client.fetch_records(&filter).await
        };

        match result {
            Ok(response) => {
                self.districts = metrics::unique_districts(&response.records);
                // The full state list only comes out of an unfiltered fetch
                if self.state_filter.is_none() {
                    self.available_states = metrics::state_names(&response.records);
                }
                self.last_refresh = Some(Local::now());
                self.status_message = None;
            }
            Err(err) => {
                self.status_message = Some(format!("Error: {err}"));
            }
        }

        let visible = self.visible_districts().len();
        if self.selected_index >= visible {
            self.selected_index = visible.saturating_sub(1);
        }

        if self.state == AppState::Loading {
            self.state = AppState::DistrictList;
        }

        if let Some(name) = self.pending_district.take() {
            self.open_district_by_name(&name);
        }
    }

    /// Opens a district named on the command line, matching
    /// case-insensitively within the active state filter.
    fn open_district_by_name(&mut self, name: &str) {
        let found = self
            .districts
            .iter()
            .filter(|d| match &self.state_filter {
                Some(state) => &d.state_name == state,
                None => true,
            })
            .find(|d| d.district_name.eq_ignore_ascii_case(name))
            .cloned();

        match found {
            Some(district) => self.open_district(district),
            None => {
                self.status_message = Some(format!("District not found: {name}"));
            }
        }
    }

    fn open_district(&mut self, district: District) {
        self.selected_district = Some(district);
        self.district_records.clear();
        self.comparison = None;
        self.trend_year = None;
        self.detail_scroll = 0;
        self.state = AppState::DistrictDetail;
        self.detail_load_requested = true;
        if self.detail_tab == DetailTab::Compare {
            self.comparison_load_requested = true;
        }
    }

    /// Loads the monthly history of the selected district.
    pub async fn load_district_data(&mut self) {
        let Some(district) = self.selected_district.clone() else {
            return;
        };

        let result = if self.demo {
            Ok(demo_district_records(&district))
        } else {
            let filter = RecordFilter::default()
                .with_district(district.district_name.as_str())
                .with_state(district.state_name.as_str());
            self.client
                .fetch_records(&filter)
                .await
                .map(|response| response.records)
        };

        match result {
            Ok(records) => {
                if records.is_empty() {
                    self.status_message = Some(format!("No data for {}", district.district_name));
                } else {
                    self.status_message = None;
                }
                self.district_records = records;
                self.last_refresh = Some(Local::now());
            }
            Err(err) => {
                self.status_message = Some(format!("Error: {err}"));
            }
        }
    }

    /// Builds the comparison for the compare tab: the selected district's
    /// latest value for the chosen metric, ranked against candidate
    /// districts' latest values fetched per district.
    pub async fn load_comparison(&mut self) {
        let Some(district) = self.selected_district.clone() else {
            return;
        };
        let metric = self.compare_metric();
        let Some(current) = metrics::latest_record(&self.district_records) else {
            self.comparison = None;
            return;
        };

        let candidates = comparison_candidates(&self.districts, &district, self.compare_scope);
        if candidates.is_empty() {
            self.comparison = None;
            self.status_message = Some("No districts to compare against".to_string());
            return;
        }

        let values: Vec<(String, f64)> = if self.demo {
            candidates
                .iter()
                .filter_map(|candidate| {
                    metrics::latest_record(&demo_district_records(candidate))
                        .map(|record| (candidate.district_name.clone(), metric.value(&record)))
                })
                .collect()
        } else {
            self.client
                .fetch_districts_batch(&candidates)
                .await
                .into_iter()
                .filter_map(|(candidate, records)| {
                    metrics::latest_record(&records)
                        .map(|record| (candidate.district_name, metric.value(&record)))
                })
                .collect()
        };

        self.comparison = build_comparison(metric.value(&current), &values);
        if self.comparison.is_none() {
            self.status_message = Some("No comparison data available".to_string());
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit (from any view; types into an active search instead)
    /// - `/`: Start a district name search in the list
    /// - `s`: Cycle the state filter (list) or comparison scope (compare)
    /// - `Up`/`k`, `Down`/`j`: Move the list selection
    /// - `Enter`: Open the selected district
    /// - `Tab` or `1`-`3`: Switch detail tabs
    /// - `m`, `g`, `y`: Cycle metric, granularity, year on the active tab
    /// - `r`: Refresh data, `c`: clear the response cache
    /// - `?`: Toggle the help overlay, `Esc`: back / cancel
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // An active search captures printable keys before anything else
        if self.search_active && self.state == AppState::DistrictList {
            match key_event.code {
                KeyCode::Esc => {
                    self.search_active = false;
                    self.search_input.clear();
                    self.selected_index = 0;
                }
                KeyCode::Enter => {
                    self.search_active = false;
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                    self.selected_index = 0;
                }
                KeyCode::Up => {
                    self.move_selection_up();
                }
                KeyCode::Down => {
                    self.move_selection_down();
                }
                KeyCode::Char(c) => {
                    self.search_input.push(c);
                    self.selected_index = 0;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading => {
                // Only quit is allowed during loading
                if key_event.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
            }
            AppState::DistrictList => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Enter => {
                    let selected = self
                        .visible_districts()
                        .get(self.selected_index)
                        .map(|d| (*d).clone());
                    if let Some(district) = selected {
                        self.open_district(district);
                    }
                }
                KeyCode::Char('/') => {
                    self.search_active = true;
                }
                KeyCode::Char('s') | KeyCode::Char('S') => {
                    self.cycle_state_filter();
                }
                KeyCode::Char('r') => {
                    self.refresh_requested = true;
                }
                KeyCode::Char('c') => {
                    self.clear_cache();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::DistrictDetail => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.state = AppState::DistrictList;
                    self.status_message = None;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.detail_scroll = self.detail_scroll.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.detail_scroll = self.detail_scroll.saturating_add(1);
                }
                KeyCode::Tab => {
                    self.detail_tab = self.detail_tab.next();
                    self.detail_scroll = 0;
                    self.request_comparison_if_missing();
                }
                KeyCode::Char('1') => {
                    self.detail_tab = DetailTab::Current;
                    self.detail_scroll = 0;
                }
                KeyCode::Char('2') => {
                    self.detail_tab = DetailTab::Compare;
                    self.detail_scroll = 0;
                    self.request_comparison_if_missing();
                }
                KeyCode::Char('3') => {
                    self.detail_tab = DetailTab::Trends;
                    self.detail_scroll = 0;
                }
                KeyCode::Char('m') => match self.detail_tab {
                    DetailTab::Trends => {
                        self.trend_metric_index =
                            (self.trend_metric_index + 1) % Metric::TREND.len();
                    }
                    DetailTab::Compare => {
                        self.compare_metric_index =
                            (self.compare_metric_index + 1) % Metric::ALL.len();
                        self.comparison = None;
                        self.comparison_load_requested = true;
                    }
                    DetailTab::Current => {}
                },
                KeyCode::Char('g') if self.detail_tab == DetailTab::Trends => {
                    self.trend_granularity = self.trend_granularity.toggled();
                }
                KeyCode::Char('y') if self.detail_tab == DetailTab::Trends => {
                    self.cycle_trend_year();
                }
                KeyCode::Char('s') if self.detail_tab == DetailTab::Compare => {
                    self.compare_scope = self.compare_scope.toggled();
                    self.comparison = None;
                    self.comparison_load_requested = true;
                }
                KeyCode::Char('r') => {
                    self.detail_load_requested = true;
                    self.comparison = None;
                    self.request_comparison_if_missing();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Moves the selection up in the list, wrapping to bottom if at top
    fn move_selection_up(&mut self) {
        let count = self.visible_districts().len();
        if count == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = count - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Moves the selection down in the list, wrapping to top if at bottom
    fn move_selection_down(&mut self) {
        let count = self.visible_districts().len();
        if count == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % count;
    }

    /// Advances the state filter through every available state and back
    /// to unfiltered. Each step refetches, so the list reflects the
    /// upstream data for that state rather than a local subset.
    fn cycle_state_filter(&mut self) {
        if self.available_states.is_empty() {
            if self.state_filter.take().is_some() {
                self.refresh_requested = true;
            }
            return;
        }
        self.state_filter = match &self.state_filter {
            None => Some(self.available_states[0].clone()),
            Some(current) => match self.available_states.iter().position(|s| s == current) {
                Some(i) if i + 1 < self.available_states.len() => {
                    Some(self.available_states[i + 1].clone())
                }
                _ => None,
            },
        };
        self.selected_index = 0;
        self.refresh_requested = true;
    }

    /// Advances the trends year filter through the district's financial
    /// years (newest first) and back to all years.
    fn cycle_trend_year(&mut self) {
        let years = metrics::financial_years(&self.district_records);
        if years.is_empty() {
            return;
        }
        self.trend_year = match &self.trend_year {
            None => Some(years[0].clone()),
            Some(current) => match years.iter().position(|y| y == current) {
                Some(i) if i + 1 < years.len() => Some(years[i + 1].clone()),
                _ => None,
            },
        };
    }

    fn request_comparison_if_missing(&mut self) {
        if self.detail_tab == DetailTab::Compare && self.comparison.is_none() {
            self.comparison_load_requested = true;
        }
    }

    /// Drops every cached response and reports how many entries went.
    fn clear_cache(&mut self) {
        let dropped = self.client.cache_stats().entries;
        self.client.clear_cache();
        self.status_message = Some(format!("Cache cleared ({dropped} entries dropped)"));
    }
}

/// Sample records for one district, used by demo mode.
fn demo_district_records(district: &District) -> Vec<Record> {
    sample_response()
        .records
        .into_iter()
        .filter(|r| {
            r.district_name == district.district_name && r.state_name == district.state_name
        })
        .collect()
}
