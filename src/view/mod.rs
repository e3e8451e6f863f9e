// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! View layer: per-user state, filtering, chart data and HTML.

pub mod charts;
pub mod dashboard;
pub mod filter;
pub mod render;
pub mod state;

pub use charts::ClientCharts;
pub use dashboard::{load_client_data, load_trainer_data, ClientData, TrainerData};
pub use filter::{ClientFilter, GymFilter};
pub use render::LoginPrompt;
pub use state::{Page, Section, UiForm, ViewAction, ViewRegistry, ViewState};
