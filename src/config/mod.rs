// ABOUTME: Configuration module for the strideplan crate
// ABOUTME: Re-exports plan generation configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strideplan

/// Plan generation configuration (progression, scheduling, guardrails)
pub mod plan;

pub use plan::{GuardrailLimits, PlanGenerationConfig, ProgressionLimits, SchedulingRules};
