// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user view state and the actions that change it.
//!
//! The page carries its section, so exactly one page and at most one
//! section are shown at a time. All changes go through
//! [`ViewState::update`].

use crate::models::{is_muscle_group, Role, UserView};
use crate::view::filter::{ClientFilter, GymFilter};
use dashmap::mapref::one::RefMut;
use dashmap::DashMap;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerSection {
    Clients,
    Exercises,
    Gym,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientSection {
    Training,
    Nutrition,
    Measurements,
    Stats,
    Gym,
}

/// A navigable section of either dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Trainer(TrainerSection),
    Client(ClientSection),
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Trainer(TrainerSection::Clients) => "clients",
            Section::Trainer(TrainerSection::Exercises) => "exercises",
            Section::Trainer(TrainerSection::Gym) => "gym",
            Section::Client(ClientSection::Training) => "training",
            Section::Client(ClientSection::Nutrition) => "nutrition",
            Section::Client(ClientSection::Measurements) => "measurements",
            Section::Client(ClientSection::Stats) => "stats",
            Section::Client(ClientSection::Gym) => "gym",
        }
    }

    /// Resolve a section name against the dashboard of `role`.
    ///
    /// `gym` exists on both dashboards.
    pub fn parse_for(role: Role, name: &str) -> Option<Self> {
        let section = match (role, name) {
            (Role::Trainer, "clients") => Section::Trainer(TrainerSection::Clients),
            (Role::Trainer, "exercises") => Section::Trainer(TrainerSection::Exercises),
            (Role::Trainer, "gym") => Section::Trainer(TrainerSection::Gym),
            (Role::Client, "training") => Section::Client(ClientSection::Training),
            (Role::Client, "nutrition") => Section::Client(ClientSection::Nutrition),
            (Role::Client, "measurements") => Section::Client(ClientSection::Measurements),
            (Role::Client, "stats") => Section::Client(ClientSection::Stats),
            (Role::Client, "gym") => Section::Client(ClientSection::Gym),
            _ => return None,
        };
        Some(section)
    }
}

/// The page on screen, with its active section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    TrainerDashboard(TrainerSection),
    ClientDashboard(ClientSection),
}

/// Which plan form is open in the client-detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerForm {
    Training,
    Nutrition,
}

/// One exercise row of the training-plan form being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftExercise {
    /// Narrows the exercise picker of this row.
    pub muscle_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub page: Page,
    pub login_open: bool,
    /// Client whose detail panel is open.
    pub selected_client: Option<Uuid>,
    pub trainer_form: Option<TrainerForm>,
    pub add_exercise_open: bool,
    pub measurement_form_open: bool,
    /// Exercise shown in the info modal.
    pub exercise_info: Option<Uuid>,
    pub draft_exercises: Vec<DraftExercise>,
    pub training_day: usize,
    pub nutrition_day: usize,
    pub client_filter: ClientFilter,
    pub gym_filter: GymFilter,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: Page::Home,
            login_open: false,
            selected_client: None,
            trainer_form: None,
            add_exercise_open: false,
            measurement_form_open: false,
            exercise_info: None,
            draft_exercises: Vec::new(),
            training_day: 0,
            nutrition_day: 0,
            client_filter: ClientFilter::All,
            gym_filter: GymFilter::All,
        }
    }
}

/// Every way the user can change what is on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    OpenLogin,
    CloseLogin,
    ShowSection(Section),
    ShowClientDetails(Uuid),
    HideClientDetails,
    ToggleTrainingForm,
    ToggleNutritionForm,
    ToggleAddExerciseForm,
    AddExerciseRow,
    RemoveExerciseRow(usize),
    SelectMuscleGroup { row: usize, muscle_group: Option<String> },
    SelectTrainingDay(usize),
    SelectNutritionDay(usize),
    ShowExerciseInfo(Uuid),
    CloseExerciseInfo,
    ToggleMeasurementForm,
    FilterClients(ClientFilter),
    FilterGym(GymFilter),
    /// A form was saved; close it and drop its draft.
    FormSubmitted,
}

impl ViewState {
    /// Landing state after sign-in: the role's dashboard at its first section.
    pub fn for_user(user: &UserView) -> Self {
        let page = match user.role {
            Role::Trainer => Page::TrainerDashboard(TrainerSection::Clients),
            Role::Client => Page::ClientDashboard(ClientSection::Training),
        };
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn section(&self) -> Option<Section> {
        match self.page {
            Page::Home => None,
            Page::TrainerDashboard(section) => Some(Section::Trainer(section)),
            Page::ClientDashboard(section) => Some(Section::Client(section)),
        }
    }

    /// Apply one action. Actions that do not fit the current page are ignored.
    pub fn update(&mut self, action: ViewAction) {
        match action {
            ViewAction::OpenLogin => self.login_open = self.page == Page::Home,
            ViewAction::CloseLogin => self.login_open = false,
            ViewAction::ShowSection(section) => {
                match (self.page, section) {
                    (Page::TrainerDashboard(_), Section::Trainer(s)) => {
                        self.page = Page::TrainerDashboard(s)
                    }
                    (Page::ClientDashboard(_), Section::Client(s)) => {
                        self.page = Page::ClientDashboard(s)
                    }
                    _ => return,
                }
                self.exercise_info = None;
            }
            ViewAction::ShowClientDetails(client_id) => {
                if self.is_trainer_page() {
                    self.selected_client = Some(client_id);
                    self.close_trainer_form();
                }
            }
            ViewAction::HideClientDetails => {
                self.selected_client = None;
                self.close_trainer_form();
            }
            ViewAction::ToggleTrainingForm => self.toggle_trainer_form(TrainerForm::Training),
            ViewAction::ToggleNutritionForm => self.toggle_trainer_form(TrainerForm::Nutrition),
            ViewAction::ToggleAddExerciseForm => {
                if self.is_trainer_page() {
                    self.add_exercise_open = !self.add_exercise_open;
                }
            }
            ViewAction::AddExerciseRow => {
                if self.trainer_form == Some(TrainerForm::Training) {
                    self.draft_exercises.push(DraftExercise::default());
                }
            }
            ViewAction::RemoveExerciseRow(row) => {
                if row < self.draft_exercises.len() {
                    self.draft_exercises.remove(row);
                }
            }
            ViewAction::SelectMuscleGroup { row, muscle_group } => {
                if let Some(draft) = self.draft_exercises.get_mut(row) {
                    draft.muscle_group = muscle_group.filter(|g| is_muscle_group(g));
                }
            }
            ViewAction::SelectTrainingDay(day) => self.training_day = day,
            ViewAction::SelectNutritionDay(day) => self.nutrition_day = day,
            ViewAction::ShowExerciseInfo(exercise_id) => {
                if self.page != Page::Home {
                    self.exercise_info = Some(exercise_id);
                }
            }
            ViewAction::CloseExerciseInfo => self.exercise_info = None,
            ViewAction::ToggleMeasurementForm => {
                if matches!(self.page, Page::ClientDashboard(_)) {
                    self.measurement_form_open = !self.measurement_form_open;
                }
            }
            ViewAction::FilterClients(filter) => self.client_filter = filter,
            ViewAction::FilterGym(filter) => self.gym_filter = filter,
            ViewAction::FormSubmitted => {
                self.close_trainer_form();
                self.add_exercise_open = false;
                self.measurement_form_open = false;
            }
        }
    }

    /// Whether this view is on the dashboard of `role`.
    pub fn fits_role(&self, role: Role) -> bool {
        matches!(
            (self.page, role),
            (Page::TrainerDashboard(_), Role::Trainer) | (Page::ClientDashboard(_), Role::Client)
        )
    }

    fn is_trainer_page(&self) -> bool {
        matches!(self.page, Page::TrainerDashboard(_))
    }

    /// Training and nutrition forms are mutually exclusive and need an open
    /// client-detail panel.
    fn toggle_trainer_form(&mut self, form: TrainerForm) {
        if self.selected_client.is_none() {
            return;
        }
        if self.trainer_form == Some(form) {
            self.close_trainer_form();
            return;
        }
        self.trainer_form = Some(form);
        self.draft_exercises = match form {
            TrainerForm::Training => vec![DraftExercise::default()],
            TrainerForm::Nutrition => Vec::new(),
        };
    }

    fn close_trainer_form(&mut self) {
        self.trainer_form = None;
        self.draft_exercises.clear();
    }
}

/// Flat form posted to `/ui`.
#[derive(Debug, Default, Deserialize)]
pub struct UiForm {
    pub action: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub index: Option<usize>,
    #[serde(default)]
    pub value: Option<String>,
}

impl UiForm {
    /// Decode into an action for a user of `role`.
    pub fn into_action(self, role: Role) -> Result<ViewAction, String> {
        let id = |id: Option<Uuid>| id.ok_or_else(|| format!("{} needs an id", self.action));
        let index = |index: Option<usize>| {
            index.ok_or_else(|| format!("{} needs an index", self.action))
        };
        let value = self.value.clone().filter(|v| !v.is_empty());

        let action = match self.action.as_str() {
            "open_login" => ViewAction::OpenLogin,
            "close_login" => ViewAction::CloseLogin,
            "show_section" => {
                let name = self.section.as_deref().unwrap_or_default();
                let section = Section::parse_for(role, name)
                    .ok_or_else(|| format!("unknown section '{name}'"))?;
                ViewAction::ShowSection(section)
            }
            "show_client_details" => ViewAction::ShowClientDetails(id(self.id)?),
            "hide_client_details" => ViewAction::HideClientDetails,
            "toggle_training_form" => ViewAction::ToggleTrainingForm,
            "toggle_nutrition_form" => ViewAction::ToggleNutritionForm,
            "toggle_add_exercise_form" => ViewAction::ToggleAddExerciseForm,
            "add_exercise_row" => ViewAction::AddExerciseRow,
            "remove_exercise_row" => ViewAction::RemoveExerciseRow(index(self.index)?),
            "select_muscle_group" => ViewAction::SelectMuscleGroup {
                row: index(self.index)?,
                muscle_group: value,
            },
            "select_training_day" => ViewAction::SelectTrainingDay(index(self.index)?),
            "select_nutrition_day" => ViewAction::SelectNutritionDay(index(self.index)?),
            "show_exercise_info" => ViewAction::ShowExerciseInfo(id(self.id)?),
            "close_exercise_info" => ViewAction::CloseExerciseInfo,
            "toggle_measurement_form" => ViewAction::ToggleMeasurementForm,
            "filter_clients" => {
                ViewAction::FilterClients(value.as_deref().unwrap_or("all").parse()?)
            }
            "filter_gym" => ViewAction::FilterGym(value.as_deref().unwrap_or("all").parse()?),
            other => return Err(format!("unknown action '{other}'")),
        };
        Ok(action)
    }
}

/// View state of every signed-in user, keyed by user id.
#[derive(Clone, Default)]
pub struct ViewRegistry {
    views: Arc<DashMap<Uuid, StoredView>>,
}

#[derive(Debug, Clone)]
struct StoredView {
    state: ViewState,
    touched: Instant,
}

impl StoredView {
    fn new(state: ViewState) -> Self {
        Self {
            state,
            touched: Instant::now(),
        }
    }
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh view for a user who just signed in.
    pub fn enter(&self, user: &UserView) -> ViewState {
        let state = ViewState::for_user(user);
        self.views.insert(user.id, StoredView::new(state.clone()));
        state
    }

    /// Current view of `user`, creating the landing view if there is none
    /// or if the stored one belongs to another role's dashboard.
    pub fn ensure(&self, user: &UserView) -> ViewState {
        self.entry_for(user).state.clone()
    }

    pub fn apply(&self, user: &UserView, action: ViewAction) -> ViewState {
        let mut entry = self.entry_for(user);
        entry.state.update(action);
        entry.state.clone()
    }

    pub fn get(&self, user_id: Uuid) -> Option<ViewState> {
        self.views.get(&user_id).map(|entry| entry.state.clone())
    }

    pub fn remove(&self, user_id: Uuid) {
        self.views.remove(&user_id);
    }

    /// Drop views not used for `max_idle`. Returns how many were dropped.
    pub fn prune_idle(&self, max_idle: Duration) -> usize {
        let before = self.views.len();
        self.views.retain(|_, entry| entry.touched.elapsed() < max_idle);
        before.saturating_sub(self.views.len())
    }

    fn entry_for(&self, user: &UserView) -> RefMut<'_, Uuid, StoredView> {
        let mut entry = self
            .views
            .entry(user.id)
            .or_insert_with(|| StoredView::new(ViewState::for_user(user)));
        if !entry.state.fits_role(user.role) {
            tracing::info!(
                user_id = %user.id,
                role = user.role.as_str(),
                "Resetting view after role change"
            );
            entry.state = ViewState::for_user(user);
        }
        entry.touched = Instant::now();
        entry
    }
}
