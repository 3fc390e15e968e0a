//! Screen state machine for the scan flow
//!
//! `main → scanning → result → main`, plus a camera overlay and modal
//! overlays that only exist on top of the main screen. Each scan gets a
//! ticket; an analysis that comes back after its scan was abandoned carries
//! a stale ticket and is dropped.

use chrono::{NaiveDate, NaiveTime};
use nutriscan_shared::{
    AnalysisOutcome, InlineImage, NewMeal, Overlay, Screen, SessionError, SessionSnapshot, Tab,
};
use std::collections::BTreeSet;
use tracing::debug;
use uuid::Uuid;

/// Meal type given to meals saved from a scan
pub const SCANNED_MEAL_TYPE: &str = "ของว่าง";

#[derive(Debug, Clone)]
struct ScanState {
    ticket: Uuid,
    image: String,
    outcome: Option<AnalysisOutcome>,
}

#[derive(Debug, Clone)]
pub struct UiSession {
    screen: Screen,
    tab: Tab,
    camera_open: bool,
    overlays: BTreeSet<Overlay>,
    selected_date: NaiveDate,
    scan: Option<ScanState>,
}

impl UiSession {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            screen: Screen::Main,
            tab: Tab::Home,
            camera_open: false,
            overlays: BTreeSet::new(),
            selected_date: today,
            scan: None,
        }
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[inline]
    pub fn tab(&self) -> Tab {
        self.tab
    }

    #[inline]
    pub fn camera_open(&self) -> bool {
        self.camera_open
    }

    #[inline]
    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn is_open(&self, overlay: Overlay) -> bool {
        self.overlays.contains(&overlay)
    }

    pub fn pending_analysis(&self) -> Option<&AnalysisOutcome> {
        self.scan.as_ref().and_then(|s| s.outcome.as_ref())
    }

    fn require_main(&self, action: &'static str) -> Result<(), SessionError> {
        if self.screen == Screen::Main {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                screen: self.screen,
            })
        }
    }

    pub fn open_overlay(&mut self, overlay: Overlay) -> Result<(), SessionError> {
        self.require_main("open an overlay")?;
        self.overlays.insert(overlay);
        Ok(())
    }

    pub fn close_overlay(&mut self, overlay: Overlay) {
        self.overlays.remove(&overlay);
    }

    /// Show the camera; the action sheet that launched it is closed
    pub fn open_camera(&mut self) -> Result<(), SessionError> {
        self.require_main("open the camera")?;
        self.overlays.remove(&Overlay::ActionSheet);
        self.camera_open = true;
        Ok(())
    }

    pub fn close_camera(&mut self) {
        self.camera_open = false;
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// `main → scanning`; returns the ticket the analysis must present
    pub fn begin_scan(&mut self, image: &InlineImage) -> Result<Uuid, SessionError> {
        match self.screen {
            Screen::Main => {}
            Screen::Scanning => return Err(SessionError::ScanInProgress),
            Screen::Result => {
                return Err(SessionError::InvalidTransition {
                    action: "start a scan",
                    screen: Screen::Result,
                })
            }
        }

        let ticket = Uuid::new_v4();
        self.camera_open = false;
        self.overlays.remove(&Overlay::ActionSheet);
        self.screen = Screen::Scanning;
        self.scan = Some(ScanState {
            ticket,
            image: image.to_data_uri(),
            outcome: None,
        });

        debug!(%ticket, "Scan started");
        Ok(ticket)
    }

    /// `scanning → result` if `ticket` is still current
    ///
    /// Returns whether the outcome was applied.
    pub fn complete_scan(&mut self, ticket: Uuid, outcome: AnalysisOutcome) -> bool {
        match self.scan.as_mut() {
            Some(scan) if self.screen == Screen::Scanning && scan.ticket == ticket => {
                scan.outcome = Some(outcome);
                self.screen = Screen::Result;
                true
            }
            _ => {
                debug!(%ticket, "Dropping stale scan result");
                false
            }
        }
    }

    /// `scanning → main` if `ticket` is still the running scan
    ///
    /// Used when the analysis never finished. Returns whether the scan was
    /// abandoned.
    pub fn abandon_scan(&mut self, ticket: Uuid) -> bool {
        let current = self.screen == Screen::Scanning
            && self.scan.as_ref().map(|s| s.ticket) == Some(ticket);
        if current {
            debug!(%ticket, "Scan abandoned");
            self.scan = None;
            self.screen = Screen::Main;
        }
        current
    }

    /// Meal that confirming the current result would insert
    ///
    /// Dated on the selected day at `time_of_day`.
    pub fn pending_meal(
        &self,
        meal_type: Option<String>,
        time_of_day: NaiveTime,
    ) -> Result<NewMeal, SessionError> {
        if self.screen != Screen::Result {
            return Err(SessionError::InvalidTransition {
                action: "confirm a scan",
                screen: self.screen,
            });
        }
        let scan = self.scan.as_ref().ok_or(SessionError::NoPendingAnalysis)?;
        let outcome = scan.outcome.as_ref().ok_or(SessionError::NoPendingAnalysis)?;
        let analysis = &outcome.analysis;

        Ok(NewMeal {
            meal_type: meal_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| SCANNED_MEAL_TYPE.to_string()),
            food_name: analysis.food_name.clone(),
            calories: analysis.calories.round() as i32,
            image: scan.image.clone(),
            timestamp: self.selected_date.and_time(time_of_day),
            tags: analysis.tags.clone(),
        })
    }

    /// `result → main` after the meal was stored; lands on the home tab
    pub fn finish_save(&mut self) {
        self.scan = None;
        self.screen = Screen::Main;
        self.tab = Tab::Home;
    }

    /// Build the meal and leave the result screen in one step
    pub fn confirm_save(
        &mut self,
        meal_type: Option<String>,
        time_of_day: NaiveTime,
    ) -> Result<NewMeal, SessionError> {
        let meal = self.pending_meal(meal_type, time_of_day)?;
        self.finish_save();
        Ok(meal)
    }

    /// `scanning | result → main`, discarding the scan
    pub fn back(&mut self) {
        if self.screen != Screen::Main {
            debug!(screen = ?self.screen, "Scan discarded");
        }
        self.scan = None;
        self.screen = Screen::Main;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            screen: self.screen,
            tab: self.tab,
            camera_open: self.camera_open,
            overlays: self.overlays.iter().copied().collect(),
            selected_date: self.selected_date,
            scan_ticket: self.scan.as_ref().map(|s| s.ticket),
            pending_analysis: self.pending_analysis().cloned(),
        }
    }
}
