// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod data;
pub mod exercise_cache;
pub mod fixture_auth;
pub mod gotrue;
pub mod planning;
pub mod session;

pub use auth::{AuthIdentity, AuthProvider, AuthSession};
pub use data::DataService;
pub use exercise_cache::ExerciseCache;
pub use fixture_auth::FixtureAuth;
pub use gotrue::GoTrueClient;
pub use planning::{assign_training_plan, renew_membership, PlanAssignment, PlannedExercise};
pub use session::{
    SessionError, SessionEvent, SessionEventKind, SessionService, SignUpRequest, SignedIn,
    SignedUp,
};
