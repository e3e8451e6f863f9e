// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod exercise;
pub mod gym;
pub mod measurement;
pub mod nutrition;
pub mod profile;
pub mod relationship;
pub mod training;

pub use exercise::{
    is_muscle_group, muscle_group_label, Exercise, NewExercise, MUSCLE_GROUPS,
};
pub use gym::{GymMembership, GymVisit, MembershipStatus, NewGymMembership, NewGymVisit};
pub use measurement::{Measurement, NewMeasurement};
pub use nutrition::{FoodLogEntry, NewFoodEntry, NewNutritionPlan, NutritionPlan};
pub use profile::{NewProfile, Profile, Role, UserView};
pub use relationship::{RelationshipStatus, StatusUpdate, TrainerClientRelationship};
pub use training::{
    NewTrainingDay, NewTrainingExercise, NewTrainingPlan, TrainingDay, TrainingExercise,
    TrainingPlan,
};
