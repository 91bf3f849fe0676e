use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calendar::{countries, group_by_month, CalendarClient, MonthGroup};
use crate::types::{CalendarEventData, FullNameDay, WishStyle};

use super::{FinishedRequest, LoadState, PendingRequest, RequestSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarMode {
    #[default]
    Daily,
    Browse,
}

/// The "generate a wish" dialog opened from a name day.
#[derive(Debug, Default)]
pub struct WishModal {
    open: bool,
    name: String,
    style: WishStyle,
    wish: RequestSlot<String>,
}

impl WishModal {
    pub fn open(&mut self, name: &str) {
        self.name = name.trim().to_string();
        self.open = true;
    }

    /// Closing drops the generated text and any error; the style sticks.
    pub fn close(&mut self) {
        self.open = false;
        self.wish.reset();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> WishStyle {
        self.style
    }

    pub fn set_style(&mut self, style: WishStyle) {
        self.style = style;
    }

    pub fn state(&self) -> &LoadState<String> {
        self.wish.state()
    }
}

/// Global calendar page: daily events for a country and date, a full-year
/// name day browser, and the wish dialog.
pub struct GlobalCalendarView {
    client: CalendarClient,
    mode: CalendarMode,
    country: &'static str,
    date: NaiveDate,
    browse_country: &'static str,
    daily: RequestSlot<CalendarEventData>,
    browse: RequestSlot<Vec<FullNameDay>>,
    wish: WishModal,
}

fn supported_country(name: &str) -> anyhow::Result<&'static str> {
    countries::lookup(name).ok_or_else(|| anyhow::anyhow!("Unsupported country: '{}'", name.trim()))
}

impl GlobalCalendarView {
    pub fn new(client: CalendarClient, default_country: &str, today: NaiveDate) -> anyhow::Result<Self> {
        let country = supported_country(default_country)?;
        Ok(Self {
            client,
            mode: CalendarMode::Daily,
            country,
            date: today,
            browse_country: country,
            daily: RequestSlot::default(),
            browse: RequestSlot::default(),
            wish: WishModal::default(),
        })
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CalendarMode) {
        self.mode = mode;
    }

    pub fn country(&self) -> &'static str {
        self.country
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn browse_country(&self) -> &'static str {
        self.browse_country
    }

    pub fn select_country(&mut self, name: &str) -> anyhow::Result<()> {
        self.country = supported_country(name)?;
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn select_browse_country(&mut self, name: &str) -> anyhow::Result<()> {
        self.browse_country = supported_country(name)?;
        Ok(())
    }

    pub fn daily_state(&self) -> &LoadState<CalendarEventData> {
        self.daily.state()
    }

    pub fn browse_state(&self) -> &LoadState<Vec<FullNameDay>> {
        self.browse.state()
    }

    pub fn wish_modal(&self) -> &WishModal {
        &self.wish
    }

    pub fn wish_modal_mut(&mut self) -> &mut WishModal {
        &mut self.wish
    }

    /// First render: the daily page loads immediately, the browser waits.
    pub fn mount(&mut self) -> Option<PendingRequest<CalendarEventData>> {
        (self.mode == CalendarMode::Daily).then(|| self.begin_daily())
    }

    /// Mark daily events as loading for the selected country and date and
    /// return the request. The view stays usable while it runs; starting
    /// another daily load makes this one stale.
    pub fn begin_daily(&mut self) -> PendingRequest<CalendarEventData> {
        let (client, country, date) = (self.client.clone(), self.country, self.date);
        let pending = self
            .daily
            .start(async move { client.fetch_daily_events(country, date).await });
        info!(country, %date, request = pending.id(), "Loading daily events");
        pending
    }

    /// Returns whether the answer was applied (false when a newer request
    /// superseded it).
    pub fn apply_daily(&mut self, finished: FinishedRequest<CalendarEventData>) -> bool {
        self.daily.apply(finished)
    }

    /// `begin_daily` and `apply_daily` back to back.
    pub async fn load_daily(&mut self) -> bool {
        let finished = self.begin_daily().resolve().await;
        self.apply_daily(finished)
    }

    pub fn begin_all_name_days(&mut self) -> PendingRequest<Vec<FullNameDay>> {
        let (client, country) = (self.client.clone(), self.browse_country);
        let pending = self
            .browse
            .start(async move { client.fetch_all_name_days(country).await });
        info!(country, request = pending.id(), "Loading name day list");
        pending
    }

    pub fn apply_all_name_days(&mut self, finished: FinishedRequest<Vec<FullNameDay>>) -> bool {
        self.browse.apply(finished)
    }

    pub async fn load_all_name_days(&mut self) -> bool {
        let finished = self.begin_all_name_days().resolve().await;
        self.apply_all_name_days(finished)
    }

    /// Browse results bucketed by month; empty until a listing has loaded.
    pub fn grouped_name_days(&self) -> Vec<MonthGroup> {
        self.browse
            .state()
            .data()
            .map(|days| group_by_month(days))
            .unwrap_or_default()
    }

    /// Open the wish dialog for a celebrated name.
    pub fn open_wish(&mut self, name: &str) {
        self.wish.open(name);
    }

    /// Generate a wish for the dialog's name, localized to the daily country.
    /// `None` when the dialog is closed.
    pub fn begin_wish(&mut self) -> Option<PendingRequest<String>> {
        if !self.wish.is_open() {
            warn!("Wish requested while the wish dialog is closed");
            return None;
        }
        let client = self.client.clone();
        let (name, country, style) = (self.wish.name.clone(), self.country, self.wish.style);
        let pending = self
            .wish
            .wish
            .start(async move { client.generate_wish(&name, country, style).await });
        info!(country, %style, request = pending.id(), "Generating wish");
        Some(pending)
    }

    /// Dropped when the dialog was closed or a newer wish was requested meanwhile.
    pub fn apply_wish(&mut self, finished: FinishedRequest<String>) -> bool {
        self.wish.wish.apply(finished)
    }

    pub async fn generate_wish(&mut self) -> bool {
        match self.begin_wish() {
            Some(pending) => {
                let finished = pending.resolve().await;
                self.apply_wish(finished)
            }
            None => false,
        }
    }
}
