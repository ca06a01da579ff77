//! Core types for ideabank

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Unique identifier for a project idea
pub type IdeaId = i64;

/// Tier 1 threshold: total_score >= 16
pub const TIER_1_MIN_SCORE: i64 = 16;
/// Tier 2 threshold: total_score >= 11 (below 16)
pub const TIER_2_MIN_SCORE: i64 = 11;

/// Resource type labels as the dashboard renders them (1/2/3)
pub const RESOURCE_TYPE_LABELS: &[(i64, &str)] = &[(1, "Internal"), (2, "External"), (3, "Mixed")];

/// A tracked project idea, as stored in `idea_store`.
///
/// `total_score` and `project_tier` are computed by the database (stored
/// generated columns) and are never written by application code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectIdea {
    pub id: IdeaId,
    pub project_name: String,
    pub category: String,
    pub priority_level: i64,
    pub size_score: i64,
    pub business_impact: i64,
    pub resource_type: i64,
    pub risk_level: i64,
    /// Sum of the five scored fields, derived by the store
    pub total_score: i64,
    /// 1..=3, derived from `total_score` by the store
    pub project_tier: i64,
    pub project_phase: ProjectPhase,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Lifecycle phase of a project idea
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectPhase {
    #[default]
    #[serde(rename = "Planning")]
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Completed")]
    Completed,
}

impl ProjectPhase {
    /// All phases in pipeline order
    pub const ALL: [ProjectPhase; 4] = [
        ProjectPhase::Planning,
        ProjectPhase::InProgress,
        ProjectPhase::OnHold,
        ProjectPhase::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectPhase::Planning => "Planning",
            ProjectPhase::InProgress => "In Progress",
            ProjectPhase::OnHold => "On Hold",
            ProjectPhase::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ProjectPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProjectPhase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Planning" => Ok(ProjectPhase::Planning),
            "In Progress" => Ok(ProjectPhase::InProgress),
            "On Hold" => Ok(ProjectPhase::OnHold),
            "Completed" => Ok(ProjectPhase::Completed),
            _ => Err(format!("Unknown project phase: {}", s)),
        }
    }
}

/// Requested artifact view. Forwarded to the dashboard as metadata; the
/// aggregation itself does not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    All,
    Priority,
    Category,
    Phase,
}

impl ViewType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::All => "all",
            ViewType::Priority => "priority",
            ViewType::Category => "category",
            ViewType::Phase => "phase",
        }
    }
}

impl std::str::FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "all" => Ok(ViewType::All),
            "priority" => Ok(ViewType::Priority),
            "category" => Ok(ViewType::Category),
            "phase" => Ok(ViewType::Phase),
            _ => Err(format!("Unknown view type: {}", s)),
        }
    }
}

/// Raw arguments for the add tool, exactly as they arrive on the wire.
/// Validation and default substitution happen in [`AddIdeaParams::validate`],
/// in one place, before any SQL runs.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AddIdeaParams {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority_level: Option<i64>,
    #[serde(default)]
    pub size_score: Option<i64>,
    #[serde(default)]
    pub business_impact: Option<i64>,
    #[serde(default)]
    pub resource_type: Option<i64>,
    #[serde(default)]
    pub risk_level: Option<i64>,
    #[serde(default)]
    pub project_phase: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A validated, fully-defaulted idea ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewIdea {
    pub project_name: String,
    pub category: String,
    pub priority_level: i64,
    pub size_score: i64,
    pub business_impact: i64,
    pub resource_type: i64,
    pub risk_level: i64,
    pub project_phase: ProjectPhase,
    pub notes: String,
}

impl AddIdeaParams {
    /// Check ranges, apply documented defaults, and produce a [`NewIdea`].
    pub fn validate(self) -> Result<NewIdea> {
        let project_name = require_text(self.project_name, "project_name")?;
        let category = require_text(self.category, "category")?;

        let priority_level = scored_field(self.priority_level, "priority_level", 4)?;
        let size_score = scored_field(self.size_score, "size_score", 3)?;
        let business_impact = scored_field(self.business_impact, "business_impact", 4)?;
        let resource_type = scored_field(self.resource_type, "resource_type", 3)?;
        let risk_level = scored_field(self.risk_level, "risk_level", 3)?;

        let project_phase = match self.project_phase {
            Some(ref s) => s.parse().map_err(TrackerError::Validation)?,
            None => ProjectPhase::default(),
        };

        Ok(NewIdea {
            project_name,
            category,
            priority_level,
            size_score,
            business_impact,
            resource_type,
            risk_level,
            project_phase,
            notes: self.notes.unwrap_or_default(),
        })
    }
}

fn require_text(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(TrackerError::Validation(format!(
            "Field '{}' must not be empty",
            field
        ))),
        None => Err(TrackerError::Validation(format!(
            "Missing required field '{}'",
            field
        ))),
    }
}

/// Scored fields all share a lower bound of 1 and a default of 1.
fn scored_field(value: Option<i64>, field: &str, max: i64) -> Result<i64> {
    match value {
        Some(v) if (1..=max).contains(&v) => Ok(v),
        Some(v) => Err(TrackerError::Validation(format!(
            "Field '{}' must be between 1 and {}, got {}",
            field, max, v
        ))),
        None => Ok(1),
    }
}

/// Filters for the get tool. Absent filters are omitted from the query
/// conjunction entirely, never defaulted to a wildcard.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct IdeaFilter {
    /// Case-sensitive substring match
    #[serde(default)]
    pub project_name: Option<String>,
    /// Exact match
    #[serde(default)]
    pub category: Option<String>,
    /// Exact match. Out-of-range values are passed through to the store and
    /// simply match nothing; the query path is intentionally permissive.
    #[serde(default)]
    pub project_tier: Option<i64>,
    /// Exact match on the phase label
    #[serde(default)]
    pub project_phase: Option<String>,
}

/// Arguments for the artifact tool
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ArtifactParams {
    #[serde(default)]
    pub view_type: Option<String>,
}

impl ArtifactParams {
    pub fn view_type(&self) -> Result<ViewType> {
        match self.view_type {
            Some(ref s) => s.parse().map_err(TrackerError::Validation),
            None => Ok(ViewType::default()),
        }
    }
}

/// Aggregate statistics over the whole portfolio.
///
/// Safe on an empty store: counts are zero and `average_score` is 0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PortfolioSummary {
    pub total_projects: i64,
    /// Projects with priority_level >= 3
    pub high_priority_projects: i64,
    pub average_score: f64,
    pub by_category: BTreeMap<String, i64>,
    pub by_phase: BTreeMap<String, i64>,
    pub by_risk_level: BTreeMap<String, i64>,
    /// Keyed by resource label (Internal/External/Mixed)
    pub by_resource_type: BTreeMap<String, i64>,
}
