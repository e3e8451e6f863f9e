// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML rendering.
//!
//! Every fragment is rebuilt from typed data on each request and every
//! dynamic value goes through [`escape`]. Element ids and classes are the
//! ones the stylesheet and chart script look for.

use crate::models::{
    muscle_group_label, Exercise, GymMembership, GymVisit, Measurement, RelationshipStatus,
    TrainerClientRelationship, TrainingPlan, UserView, MUSCLE_GROUPS,
};
use crate::time_utils::{format_date_sr, format_time_sr};
use crate::view::dashboard::{ClientData, TrainerData};
use crate::view::filter::{ClientFilter, GymFilter};
use crate::view::state::{
    ClientSection, DraftExercise, Page, TrainerForm, TrainerSection, ViewState,
};
use chrono::NaiveDate;
use uuid::Uuid;

/// Number of rows in the measurement history table.
pub const MEASUREMENT_HISTORY_ROWS: usize = 5;

const CHART_LIBRARY_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `12.0` → `12`, `82.5` → `82.5`.
fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn optional_number(value: Option<f64>) -> String {
    value.map(number).unwrap_or_else(|| "-".to_string())
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

fn active(on: bool) -> &'static str {
    if on {
        " active"
    } else {
        ""
    }
}

fn selected(on: bool) -> &'static str {
    if on {
        " selected"
    } else {
        ""
    }
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        r#"<input type="hidden" name="{}" value="{}">"#,
        name,
        escape(value)
    )
}

/// One-button form posting a view action to `/ui`.
fn ui_button(action: &str, fields: &[(&str, String)], label: &str, class: &str) -> String {
    let extra: String = fields
        .iter()
        .map(|(name, value)| hidden(name, value))
        .collect();
    format!(
        r#"<form method="post" action="/ui" class="inline-form">{}{}<button type="submit" class="{}">{}</button></form>"#,
        hidden("action", action),
        extra,
        class,
        escape(label)
    )
}

/// One-button form posting to a write route.
fn post_button(path: &str, label: &str, class: &str) -> String {
    format!(
        r#"<form method="post" action="{}" class="inline-form"><button type="submit" class="{}">{}</button></form>"#,
        escape(path),
        class,
        escape(label)
    )
}

/// Full HTML document. `charts` is embedded for the chart script when given.
pub fn page(title: &str, body: &str, charts: Option<&str>) -> String {
    let scripts = match charts {
        Some(json) => format!(
            r#"<script type="application/json" id="chartData">{}</script>
<script src="{}"></script>
<script src="/assets/charts.js"></script>"#,
            json, CHART_LIBRARY_URL
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="sr">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
<link rel="stylesheet" href="/assets/app.css">
</head>
<body>
{}
{}
</body>
</html>
"#,
        escape(title),
        body,
        scripts
    )
}

// ─── Home ────────────────────────────────────────────────────

/// Login overlay contents for the home page.
#[derive(Debug, Default, Clone)]
pub struct LoginPrompt {
    pub open: bool,
    /// Full alert text, e.g. `Greška pri prijavi: ...`.
    pub error: Option<String>,
    pub notice: Option<String>,
}

pub fn home(login: &LoginPrompt) -> String {
    let overlay = if login.open {
        login_overlay(login)
    } else {
        String::new()
    };

    format!(
        r#"<div id="home" class="page active">
<header class="site-header"><span class="logo">FitZona</span>{}</header>
<section class="hero">
<h1>Treniraj pametnije</h1>
<p>Planovi treninga, ishrana i praćenje napretka na jednom mestu.</p>
</section>
</div>
{}"#,
        ui_button("open_login", &[], "Prijava", "btn-login"),
        overlay
    )
}

fn login_overlay(login: &LoginPrompt) -> String {
    let mut alerts = String::new();
    if let Some(error) = &login.error {
        alerts.push_str(&format!(
            r#"<div class="alert alert-error" role="alert">{}</div>"#,
            escape(error)
        ));
    }
    if let Some(notice) = &login.notice {
        alerts.push_str(&format!(
            r#"<div class="alert alert-info" role="status">{}</div>"#,
            escape(notice)
        ));
    }

    format!(
        r#"<div id="loginOverlay" class="login-overlay active">
<div class="login-box">
{}
{}
<h2>Prijava</h2>
<form id="loginForm" method="post" action="/auth/login">
<input type="text" name="username" placeholder="Korisničko ime ili e-mail" required>
<input type="password" name="password" placeholder="Lozinka" required>
<button type="submit" class="btn-primary">Prijavi se</button>
</form>
<h2>Registracija</h2>
<form id="signupForm" method="post" action="/auth/signup">
<input type="text" name="full_name" placeholder="Ime i prezime" required>
<input type="email" name="email" placeholder="E-mail" required>
<input type="password" name="password" placeholder="Lozinka" minlength="6" required>
<select name="role"><option value="client">Klijent</option><option value="trainer">Trener</option></select>
<button type="submit" class="btn-secondary">Registruj se</button>
</form>
</div>
</div>"#,
        ui_button("close_login", &[], "×", "btn-close"),
        alerts
    )
}

// ─── Shared dashboard pieces ─────────────────────────────────

fn dashboard_header(user: &UserView, nav: &str) -> String {
    format!(
        r#"<header class="dashboard-header">
<div class="user-info"><span class="avatar">{}</span><span id="userName">{}</span></div>
<nav class="dashboard-nav">{}</nav>
<form method="post" action="/auth/logout" class="inline-form"><button type="submit" class="btn-logout">Odjavi se</button></form>
</header>"#,
        escape(&initials(&user.name)),
        escape(&user.name),
        nav
    )
}

fn nav_button(section: &str, label: &str, current: bool) -> String {
    ui_button(
        "show_section",
        &[("section", section.to_string())],
        label,
        &format!("nav-btn{}", active(current)),
    )
}

fn exercise_modal(exercise: &Exercise) -> String {
    format!(
        r#"<div id="exerciseModal" class="modal active">
<div class="modal-content">
<h2>{}</h2>
<p class="muscle-group">{}</p>
<p class="exercise-description">{}</p>
{}
</div>
</div>"#,
        escape(&exercise.name),
        escape(muscle_group_label(&exercise.muscle_group)),
        escape(exercise.description_or_placeholder()),
        ui_button("close_exercise_info", &[], "Zatvori", "btn-secondary")
    )
}

fn info_button(exercise_id: Uuid) -> String {
    ui_button(
        "show_exercise_info",
        &[("id", exercise_id.to_string())],
        "Info",
        "btn-info",
    )
}

fn muscle_group_options(current: Option<&str>, any_label: Option<&str>) -> String {
    let mut options = String::new();
    if let Some(label) = any_label {
        options.push_str(&format!(
            r#"<option value=""{}>{}</option>"#,
            selected(current.is_none()),
            escape(label)
        ));
    }
    for (value, label) in MUSCLE_GROUPS {
        options.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            value,
            selected(current == Some(value)),
            label
        ));
    }
    options
}

// ─── Trainer dashboard ───────────────────────────────────────

pub fn trainer_dashboard(
    user: &UserView,
    state: &ViewState,
    data: &TrainerData,
    today: NaiveDate,
) -> String {
    let section = match state.page {
        Page::TrainerDashboard(section) => section,
        _ => TrainerSection::Clients,
    };

    let nav = [
        nav_button("clients", "Klijenti", section == TrainerSection::Clients),
        nav_button("exercises", "Vežbe", section == TrainerSection::Exercises),
        nav_button("gym", "Teretana", section == TrainerSection::Gym),
    ]
    .concat();

    let content = match section {
        TrainerSection::Clients => clients_section(state, data),
        TrainerSection::Exercises => exercises_section(state, &data.exercises),
        TrainerSection::Gym => gym_section(state.gym_filter, &data.members, today),
    };

    let modal = state
        .exercise_info
        .and_then(|id| data.exercise(id))
        .map(exercise_modal)
        .unwrap_or_default();

    format!(
        r#"<div id="trainerDashboard" class="page dashboard active">
{}
<main class="dashboard-content">
{}
</main>
</div>
{}"#,
        dashboard_header(user, &nav),
        content,
        modal
    )
}

fn clients_section(state: &ViewState, data: &TrainerData) -> String {
    let options: String = ClientFilter::ALL
        .iter()
        .map(|filter| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                filter.as_str(),
                selected(*filter == state.client_filter),
                filter.label()
            )
        })
        .collect();

    let shown = state.client_filter.apply(&data.clients);
    let cards = if shown.is_empty() {
        r#"<p class="empty-state">Nema klijenata za prikaz.</p>"#.to_string()
    } else {
        shown.into_iter().map(client_card).collect()
    };

    let details = state
        .selected_client
        .and_then(|id| data.client(id))
        .map(|client| client_details(state, client, data))
        .unwrap_or_default();

    format!(
        r#"<section id="trainerClients" class="dashboard-section active">
<div class="section-header">
<h2>Moji klijenti</h2>
<form method="post" action="/ui" class="filter-form">{}<select name="value" id="clientFilter">{}</select><button type="submit" class="btn-secondary">Filtriraj</button></form>
</div>
<div class="clients-grid">{}</div>
{}
</section>"#,
        hidden("action", "filter_clients"),
        options,
        cards,
        details
    )
}

fn client_card(relationship: &TrainerClientRelationship) -> String {
    let (name, email) = match &relationship.client {
        Some(profile) => (profile.display_name().to_string(), profile.email.clone()),
        None => ("Nepoznat klijent".to_string(), String::new()),
    };

    let mut actions = ui_button(
        "show_client_details",
        &[("id", relationship.client_id.to_string())],
        "Detalji",
        "btn-secondary",
    );
    if relationship.status == RelationshipStatus::WaitingPayment {
        actions.push_str(&post_button(
            &format!("/trainer/clients/{}/confirm-payment", relationship.id),
            "Potvrdi uplatu",
            "btn-confirm",
        ));
    }

    format!(
        r#"<div class="client-card" data-client-id="{}" data-status="{}">
<div class="client-avatar">{}</div>
<div class="client-info"><h3>{}</h3><p>{}</p></div>
<span class="client-status status-{}">{}</span>
<div class="client-actions">{}</div>
</div>"#,
        relationship.client_id,
        relationship.status.as_str(),
        escape(&initials(&name)),
        escape(&name),
        escape(&email),
        relationship.status.css_class(),
        relationship.status.label(),
        actions
    )
}

fn client_details(
    state: &ViewState,
    relationship: &TrainerClientRelationship,
    data: &TrainerData,
) -> String {
    let (name, email) = match &relationship.client {
        Some(profile) => (profile.display_name().to_string(), profile.email.clone()),
        None => ("Nepoznat klijent".to_string(), String::new()),
    };

    let status_options: String = RelationshipStatus::ALL
        .iter()
        .map(|status| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                status.as_str(),
                selected(*status == relationship.status),
                status.label()
            )
        })
        .collect();

    let plan_summary = match &data.selected_plan {
        Some(plan) => format!(
            r#"<p class="plan-summary">{} ({} dana)</p>"#,
            escape(plan.name.as_deref().unwrap_or("Plan treninga")),
            plan.training_days.len()
        ),
        None => r#"<p class="plan-summary empty-state">Nema aktivnog plana treninga.</p>"#
            .to_string(),
    };

    let form = match state.trainer_form {
        Some(TrainerForm::Training) => training_plan_form(
            relationship.client_id,
            &state.draft_exercises,
            &data.exercises,
        ),
        Some(TrainerForm::Nutrition) => nutrition_plan_form(relationship.client_id),
        None => String::new(),
    };

    format!(
        r#"<div id="clientDetails" class="client-details active">
<div class="details-header"><h2>{}</h2>{}</div>
<p class="client-email">{}</p>
<p>Status: <span class="client-status status-{}">{}</span></p>
<p>Uplata: {}</p>
<p>Početak članstva: {}</p>
{}
<form method="post" action="/trainer/clients/{}/status" class="status-form">
<select name="status">{}</select>
<label><input type="checkbox" name="payment_confirmed" value="true"{}> Plaćeno</label>
<button type="submit" class="btn-secondary">Sačuvaj status</button>
</form>
<div class="details-actions">{}{}</div>
{}
</div>"#,
        escape(&name),
        ui_button("hide_client_details", &[], "×", "btn-close"),
        escape(&email),
        relationship.status.css_class(),
        relationship.status.label(),
        if relationship.payment_confirmed {
            "Potvrđena"
        } else {
            "Nije potvrđena"
        },
        relationship
            .membership_start
            .map(format_date_sr)
            .unwrap_or_else(|| "-".to_string()),
        plan_summary,
        relationship.id,
        status_options,
        if relationship.payment_confirmed {
            " checked"
        } else {
            ""
        },
        ui_button(
            "toggle_training_form",
            &[],
            "Plan treninga",
            &form_button_class(state, TrainerForm::Training)
        ),
        ui_button(
            "toggle_nutrition_form",
            &[],
            "Plan ishrane",
            &form_button_class(state, TrainerForm::Nutrition)
        ),
        form
    )
}

fn form_button_class(state: &ViewState, form: TrainerForm) -> String {
    format!("btn-primary{}", active(state.trainer_form == Some(form)))
}

fn training_plan_form(
    client_id: Uuid,
    drafts: &[DraftExercise],
    exercises: &[Exercise],
) -> String {
    let rows: String = drafts
        .iter()
        .enumerate()
        .map(|(index, draft)| draft_row(index, draft, exercises))
        .collect();

    format!(
        r#"<div id="trainingPlanFormContainer" class="plan-form">
<h3>Novi plan treninga</h3>
<form id="trainingPlanForm" method="post" action="/trainer/plans">
{}
<input type="text" name="name" placeholder="Naziv plana">
</form>
<div id="exerciseRows">{}</div>
{}
<button type="submit" form="trainingPlanForm" class="btn-primary">Sačuvaj plan</button>
</div>"#,
        hidden("client_id", &client_id.to_string()),
        rows,
        ui_button("add_exercise_row", &[], "Dodaj vežbu", "btn-secondary")
    )
}

/// One editable exercise row. The row's inputs belong to the plan form
/// through the `form` attribute; its own buttons post view actions.
fn draft_row(index: usize, draft: &DraftExercise, exercises: &[Exercise]) -> String {
    let group = draft.muscle_group.as_deref();
    let choices: String = exercises
        .iter()
        .filter(|e| group.is_none_or(|g| e.muscle_group == g))
        .map(|e| format!(r#"<option value="{}">{}</option>"#, e.id, escape(&e.name)))
        .collect();

    format!(
        r#"<div class="exercise-row" data-row="{}">
<form method="post" action="/ui" class="inline-form">{}{}<select name="value">{}</select><button type="submit" class="btn-secondary">Izaberi</button></form>
<select name="exercise_id" form="trainingPlanForm" required>{}</select>
<input type="number" name="sets" form="trainingPlanForm" value="3" min="1" aria-label="Serije">
<input type="number" name="reps" form="trainingPlanForm" value="10" min="1" aria-label="Ponavljanja">
{}
</div>"#,
        index,
        hidden("action", "select_muscle_group"),
        hidden("index", &index.to_string()),
        muscle_group_options(group, Some("Sve grupe")),
        choices,
        ui_button(
            "remove_exercise_row",
            &[("index", index.to_string())],
            "Ukloni",
            "btn-remove"
        )
    )
}

fn nutrition_plan_form(client_id: Uuid) -> String {
    format!(
        r#"<div id="nutritionPlanFormContainer" class="plan-form">
<h3>Novi plan ishrane</h3>
<form id="nutritionPlanForm" method="post" action="/trainer/nutrition">
{}
<input type="number" name="day_number" placeholder="Dan" min="1" required>
<input type="number" name="calories" placeholder="Kalorije" min="0" required>
<input type="number" name="protein" placeholder="Proteini (g)" min="0" required>
<input type="number" name="carbs" placeholder="Ugljeni hidrati (g)" min="0" required>
<input type="number" name="fats" placeholder="Masti (g)" min="0" required>
<button type="submit" class="btn-primary">Sačuvaj plan ishrane</button>
</form>
</div>"#,
        hidden("client_id", &client_id.to_string())
    )
}

fn exercises_section(state: &ViewState, exercises: &[Exercise]) -> String {
    let form = if state.add_exercise_open {
        format!(
            r#"<form id="addExerciseForm" method="post" action="/trainer/exercises" class="exercise-form">
<input type="text" name="name" placeholder="Naziv vežbe" required>
<select name="muscle_group" required>{}</select>
<textarea name="description" placeholder="Opis"></textarea>
<button type="submit" class="btn-primary">Sačuvaj vežbu</button>
</form>"#,
            muscle_group_options(None, None)
        )
    } else {
        String::new()
    };

    let cards = if exercises.is_empty() {
        r#"<p class="empty-state">Nema vežbi.</p>"#.to_string()
    } else {
        exercises
            .iter()
            .map(|exercise| {
                format!(
                    r#"<div class="exercise-card" data-muscle-group="{}">
<h3>{}</h3>
<span class="muscle-group">{}</span>
{}
</div>"#,
                    escape(&exercise.muscle_group),
                    escape(&exercise.name),
                    escape(muscle_group_label(&exercise.muscle_group)),
                    info_button(exercise.id)
                )
            })
            .collect()
    };

    format!(
        r#"<section id="trainerExercises" class="dashboard-section active">
<div class="section-header"><h2>Vežbe</h2>{}</div>
{}
<div class="exercises-grid">{}</div>
</section>"#,
        ui_button(
            "toggle_add_exercise_form",
            &[],
            if state.add_exercise_open {
                "Otkaži"
            } else {
                "Dodaj vežbu"
            },
            "btn-primary"
        ),
        form,
        cards
    )
}

fn gym_section(filter: GymFilter, members: &[GymMembership], today: NaiveDate) -> String {
    let options: String = GymFilter::ALL
        .iter()
        .map(|f| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                f.as_str(),
                selected(*f == filter),
                f.label()
            )
        })
        .collect();

    let shown = filter.apply(members, today);
    let rows = if shown.is_empty() {
        r#"<tr><td colspan="7" class="empty-state">Nema članarina za prikaz.</td></tr>"#
            .to_string()
    } else {
        shown
            .into_iter()
            .map(|membership| member_row(membership, today))
            .collect()
    };

    format!(
        r#"<section id="trainerGym" class="dashboard-section active">
<div class="section-header">
<h2>Članarine</h2>
<form method="post" action="/ui" class="filter-form">{}<select name="value" id="gymFilter">{}</select><button type="submit" class="btn-secondary">Filtriraj</button></form>
</div>
<table class="gym-members-table">
<thead><tr><th>Član</th><th>Tip</th><th>Početak</th><th>Kraj</th><th>Preostalo</th><th>Status</th><th></th></tr></thead>
<tbody>{}</tbody>
</table>
</section>"#,
        hidden("action", "filter_gym"),
        options,
        rows
    )
}

fn days_left_text(days_left: i64) -> String {
    if days_left < 0 {
        format!("Istekla pre {} dana", -days_left)
    } else {
        format!("{} dana", days_left)
    }
}

fn member_row(membership: &GymMembership, today: NaiveDate) -> String {
    let status = membership.status(today);
    let name = membership
        .client
        .as_ref()
        .map(|p| p.display_name().to_string())
        .unwrap_or_else(|| "Nepoznat član".to_string());

    format!(
        r#"<tr class="member-row" data-status="{}"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><span class="membership-status {}">{}</span></td><td>{}</td></tr>"#,
        status.css_class(),
        escape(&name),
        escape(&membership.membership_type),
        format_date_sr(membership.start_date),
        format_date_sr(membership.end_date),
        days_left_text(membership.days_left(today)),
        status.css_class(),
        status.label(),
        post_button(
            &format!("/trainer/memberships/{}/renew", membership.id),
            "Obnovi",
            "btn-renew"
        )
    )
}

// ─── Client dashboard ────────────────────────────────────────

pub fn client_dashboard(
    user: &UserView,
    state: &ViewState,
    data: &ClientData,
    today: NaiveDate,
) -> String {
    let section = match state.page {
        Page::ClientDashboard(section) => section,
        _ => ClientSection::Training,
    };

    let nav = [
        nav_button("training", "Trening", section == ClientSection::Training),
        nav_button("nutrition", "Ishrana", section == ClientSection::Nutrition),
        nav_button("measurements", "Merenja", section == ClientSection::Measurements),
        nav_button("stats", "Statistika", section == ClientSection::Stats),
        nav_button("gym", "Teretana", section == ClientSection::Gym),
    ]
    .concat();

    let content = match section {
        ClientSection::Training => training_section(state.training_day, data.plan.as_ref()),
        ClientSection::Nutrition => nutrition_section(state.nutrition_day, data),
        ClientSection::Measurements => {
            measurements_section(state.measurement_form_open, &data.measurements, today)
        }
        ClientSection::Stats => stats_section(state.nutrition_day, data),
        ClientSection::Gym => client_gym_section(data, today),
    };

    let modal = state
        .exercise_info
        .and_then(|id| data.plan_exercise(id))
        .map(exercise_modal)
        .unwrap_or_default();

    format!(
        r#"<div id="clientDashboard" class="page dashboard active">
{}
<main class="dashboard-content">
{}
</main>
</div>
{}"#,
        dashboard_header(user, &nav),
        content,
        modal
    )
}

fn day_tabs(action: &str, labels: &[String], current: usize) -> String {
    let tabs: String = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            ui_button(
                action,
                &[("index", index.to_string())],
                label,
                &format!("day-tab{}", active(index == current)),
            )
        })
        .collect();
    format!(r#"<div class="day-tabs">{}</div>"#, tabs)
}

fn training_section(day_index: usize, plan: Option<&TrainingPlan>) -> String {
    let body = match plan {
        Some(plan) if !plan.training_days.is_empty() => {
            let current = if day_index < plan.training_days.len() {
                day_index
            } else {
                0
            };
            let labels: Vec<String> = plan.training_days.iter().map(|d| d.name.clone()).collect();
            let items: String = plan
                .day(current)
                .map(|day| {
                    day.training_exercises
                        .iter()
                        .map(|te| {
                            let (name, group) = match &te.exercise {
                                Some(e) => (e.name.as_str(), muscle_group_label(&e.muscle_group)),
                                None => ("Vežba", ""),
                            };
                            format!(
                                r#"<div class="exercise-item">
<div class="exercise-info"><h4>{}</h4><span class="muscle-group">{}</span></div>
<div class="exercise-sets">{} x {}</div>
{}
</div>"#,
                                escape(name),
                                escape(group),
                                te.sets,
                                te.reps,
                                info_button(te.exercise_id)
                            )
                        })
                        .collect()
                })
                .unwrap_or_default();

            format!(
                r#"<h2>{}</h2>
{}
<div class="exercise-list">{}</div>"#,
                escape(plan.name.as_deref().unwrap_or("Moj plan treninga")),
                day_tabs("select_training_day", &labels, current),
                items
            )
        }
        Some(_) => r#"<h2>Moj plan treninga</h2>
<p class="empty-state">Plan još nema dana treninga.</p>"#
            .to_string(),
        None => r#"<h2>Moj plan treninga</h2>
<p class="empty-state">Trener vam još nije dodelio plan treninga.</p>"#
            .to_string(),
    };

    format!(
        r#"<section id="clientTraining" class="dashboard-section active">
{}
</section>"#,
        body
    )
}

fn nutrition_section(day_index: usize, data: &ClientData) -> String {
    let plan = if data.nutrition.is_empty() {
        r#"<p class="empty-state">Trener vam još nije dodelio plan ishrane.</p>"#.to_string()
    } else {
        let current = if day_index < data.nutrition.len() {
            day_index
        } else {
            0
        };
        let labels: Vec<String> = data
            .nutrition
            .iter()
            .map(|day| format!("Dan {}", day.day_number))
            .collect();
        let card = data
            .nutrition_day(current)
            .map(|day| {
                format!(
                    r#"<div class="nutrition-card">
<div class="macro calories"><span class="macro-value">{}</span><span class="macro-label">kcal</span></div>
<div class="macro protein"><span class="macro-value">{}g</span><span class="macro-label">Proteini</span></div>
<div class="macro carbs"><span class="macro-value">{}g</span><span class="macro-label">Ugljeni hidrati</span></div>
<div class="macro fats"><span class="macro-value">{}g</span><span class="macro-label">Masti</span></div>
</div>"#,
                    day.calories, day.protein, day.carbs, day.fats
                )
            })
            .unwrap_or_default();
        format!(
            "{}\n{}",
            day_tabs("select_nutrition_day", &labels, current),
            card
        )
    };

    let rows: String = data
        .food_log
        .iter()
        .map(|entry| {
            format!(
                r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                format_time_sr(entry.meal_time),
                escape(&entry.food_name),
                optional_number(entry.calories),
                optional_number(entry.protein),
                optional_number(entry.carbs),
                optional_number(entry.fats)
            )
        })
        .collect();
    let total_calories: f64 = data.food_log.iter().filter_map(|e| e.calories).sum();

    format!(
        r#"<section id="clientNutrition" class="dashboard-section active">
<h2>Plan ishrane</h2>
{}
<h3>Današnji obroci</h3>
<table class="food-log-table">
<thead><tr><th>Vreme</th><th>Namirnica</th><th>kcal</th><th>P</th><th>UH</th><th>M</th></tr></thead>
<tbody>{}</tbody>
<tfoot><tr><td colspan="2">Ukupno</td><td>{}</td><td colspan="3"></td></tr></tfoot>
</table>
<form id="foodLogForm" method="post" action="/client/food" class="food-form">
<input type="text" name="food_name" placeholder="Namirnica" required>
<input type="number" step="any" name="calories" placeholder="kcal">
<input type="number" step="any" name="protein" placeholder="Proteini (g)">
<input type="number" step="any" name="carbs" placeholder="Ugljeni hidrati (g)">
<input type="number" step="any" name="fats" placeholder="Masti (g)">
<button type="submit" class="btn-primary">Dodaj obrok</button>
</form>
</section>"#,
        plan,
        rows,
        number(total_calories)
    )
}

fn measurements_section(
    form_open: bool,
    measurements: &[Measurement],
    today: NaiveDate,
) -> String {
    let form = if form_open {
        format!(
            r#"<form id="measurementForm" method="post" action="/client/measurements" class="measurement-form">
<input type="date" name="measurement_date" value="{}">
<input type="number" step="any" name="weight" placeholder="Težina (kg)">
<input type="number" step="any" name="waist" placeholder="Struk (cm)">
<input type="number" step="any" name="chest" placeholder="Grudi (cm)">
<input type="number" step="any" name="biceps" placeholder="Biceps (cm)">
<input type="number" step="any" name="thighs" placeholder="Butine (cm)">
<button type="submit" class="btn-primary">Sačuvaj merenje</button>
</form>"#,
            today.format("%Y-%m-%d")
        )
    } else {
        String::new()
    };

    let rows = if measurements.is_empty() {
        r#"<tr><td colspan="6" class="empty-state">Još nema merenja.</td></tr>"#.to_string()
    } else {
        measurements
            .iter()
            .take(MEASUREMENT_HISTORY_ROWS)
            .map(|m| {
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                    format_date_sr(m.measurement_date),
                    optional_number(m.weight),
                    optional_number(m.waist),
                    optional_number(m.chest),
                    optional_number(m.biceps),
                    optional_number(m.thighs)
                )
            })
            .collect()
    };

    format!(
        r#"<section id="clientMeasurements" class="dashboard-section active">
<div class="section-header"><h2>Merenja</h2>{}</div>
{}
<table class="measurements-table">
<thead><tr><th>Datum</th><th>Težina</th><th>Struk</th><th>Grudi</th><th>Biceps</th><th>Butine</th></tr></thead>
<tbody>{}</tbody>
</table>
</section>"#,
        ui_button(
            "toggle_measurement_form",
            &[],
            if form_open { "Otkaži" } else { "Novo merenje" },
            "btn-primary"
        ),
        form,
        rows
    )
}

fn weight_change(measurements: &[Measurement]) -> Option<f64> {
    let newest = measurements.iter().find_map(|m| m.weight)?;
    let oldest = measurements.iter().rev().find_map(|m| m.weight)?;
    Some(newest - oldest)
}

fn stats_section(nutrition_day: usize, data: &ClientData) -> String {
    let current_weight = data.measurements.iter().find_map(|m| m.weight);
    let change = weight_change(&data.measurements)
        .map(|delta| {
            if delta > 0.0 {
                format!("+{} kg", number(delta))
            } else {
                format!("{} kg", number(delta))
            }
        })
        .unwrap_or_else(|| "-".to_string());

    let macros = if data.nutrition_day(nutrition_day).is_some() {
        r#"<div class="chart-card"><h3>Makronutrijenti</h3><canvas id="macrosChart"></canvas></div>"#
    } else {
        ""
    };

    format!(
        r#"<section id="clientStats" class="dashboard-section active">
<h2>Statistika</h2>
<div class="stats-summary">
<div class="stat"><span class="stat-value">{}</span><span class="stat-label">Trenutna težina (kg)</span></div>
<div class="stat"><span class="stat-value">{}</span><span class="stat-label">Promena težine</span></div>
<div class="stat"><span class="stat-value">{}</span><span class="stat-label">Poslednji dolasci</span></div>
</div>
<div class="charts-grid">
<div class="chart-card"><h3>Težina</h3><canvas id="weightChart"></canvas></div>
<div class="chart-card"><h3>Struk</h3><canvas id="waistChart"></canvas></div>
<div class="chart-card"><h3>Obimi</h3><canvas id="measurementsChart"></canvas></div>
{}
<div class="chart-card"><h3>Dolasci po danima</h3><canvas id="visitsChart"></canvas></div>
</div>
</section>"#,
        optional_number(current_weight),
        change,
        data.visits.len(),
        macros
    )
}

fn visit_row(visit: &GymVisit) -> String {
    let check_out = visit
        .check_out_time
        .map(format_time_sr)
        .unwrap_or_else(|| "U teretani".to_string());
    let duration = visit
        .duration_minutes()
        .map(|minutes| format!("{} min", minutes))
        .unwrap_or_else(|| "-".to_string());

    format!(
        r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
        format_date_sr(visit.check_in_time.date_naive()),
        format_time_sr(visit.check_in_time),
        check_out,
        duration
    )
}

fn client_gym_section(data: &ClientData, today: NaiveDate) -> String {
    let membership = match data.current_membership() {
        Some(m) => {
            let status = m.status(today);
            format!(
                r#"<div class="membership-card {}">
<h3>{}</h3>
<p>{} - {}</p>
<p class="days-left">{}</p>
<span class="membership-status {}">{}</span>
</div>"#,
                status.css_class(),
                escape(&m.membership_type),
                format_date_sr(m.start_date),
                format_date_sr(m.end_date),
                days_left_text(m.days_left(today)),
                status.css_class(),
                status.label()
            )
        }
        None => r#"<div class="membership-card"><p class="empty-state">Nemate aktivnu članarinu.</p></div>"#
            .to_string(),
    };

    let action = match data.open_visit() {
        Some(visit) => post_button(
            &format!("/client/visits/{}/check-out", visit.id),
            "Odjavi odlazak",
            "btn-checkout",
        ),
        None => post_button("/client/check-in", "Prijavi dolazak", "btn-checkin"),
    };

    let rows = if data.visits.is_empty() {
        r#"<tr><td colspan="4" class="empty-state">Još nema dolazaka.</td></tr>"#.to_string()
    } else {
        data.visits.iter().map(visit_row).collect()
    };

    format!(
        r#"<section id="clientGym" class="dashboard-section active">
<h2>Teretana</h2>
{}
<div class="visit-actions">{}</div>
<table class="visits-table">
<thead><tr><th>Datum</th><th>Dolazak</th><th>Odlazak</th><th>Trajanje</th></tr></thead>
<tbody>{}</tbody>
</table>
</section>"#,
        membership, action, rows
    )
}
