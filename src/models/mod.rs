// ABOUTME: Data model for plan generation: goals, athlete profile, skeleton, and audit records
// ABOUTME: Re-exports the model types used across the builder stages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

//! Plan generation data model

/// Goal and request types
pub mod goal;
/// Read-only athlete profile
pub mod profile;
/// Skeleton value types
pub mod skeleton;
/// Warning and correction records
pub mod validation;

pub use goal::{
    DistanceUnit, ExperienceLevel, GoalConfig, GoalPriority, GoalType, PlanGoals, PlanRequest,
    Terrain,
};
pub use profile::{AthleteProfile, ConsistencyTier, HeartRateZones, PaceRange};
pub use skeleton::{
    DayContent, GoalSplit, Intensity, Phase, PlanSettings, PlanSkeleton, SkeletonDay,
    SkeletonWeek, WorkoutType,
};
pub use validation::{
    ConflictType, ConflictWarning, CorrectionAction, CorrectionType, RealismConcern,
    RealismWarning, Severity, ValidationResult,
};
