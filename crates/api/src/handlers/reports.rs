//! Handlers for performance reports.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use scholaris_core::error::CoreError;
use scholaris_core::stats::{GenderCounts, PassFailReport, ScoredEntry};
use scholaris_core::types::DbId;
use scholaris_db::models::mark::ReportMark;
use scholaris_db::repositories::{MarkRepo, SequenceRepo, SubjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::school_classes::require_class;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Response for the class/subject/sequence report.
#[derive(Debug, Serialize)]
pub struct SubjectReport {
    /// Everyone enrolled in the class, marked or not.
    pub enrolment: GenderCounts,
    /// Pass/fail statistics over the students actually marked.
    pub statistics: PassFailReport,
    pub best_three: Vec<ReportMark>,
    pub last_three: Vec<ReportMark>,
    pub marks: Vec<ReportMark>,
}

/// GET /api/v1/reports/classes/{class_id}/subjects/{subject_id}/sequences/{sequence_id}
///
/// Pass/fail statistics for one class, subject, and sequence, with the
/// marks ranked best first. Percentages are null until at least one mark
/// of the matching gender exists.
pub async fn class_subject_sequence(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path((class_id, subject_id, sequence_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<Json<SubjectReport>> {
    let class = require_class(&state.pool, class_id).await?;
    SubjectRepo::find_by_id(&state.pool, subject_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id: subject_id,
        }))?;
    SequenceRepo::find_by_id(&state.pool, sequence_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sequence",
            id: sequence_id,
        }))?;

    let marks = MarkRepo::report_marks(&state.pool, class.id, subject_id, sequence_id).await?;

    let entries: Vec<ScoredEntry> = marks
        .iter()
        .map(|m| ScoredEntry {
            score: m.score,
            is_male: m.gender == "Male",
        })
        .collect();
    let statistics = PassFailReport::compute(&entries);

    let (total, male, female) = MarkRepo::class_enrolment(&state.pool, class.id).await?;
    let enrolment = GenderCounts {
        total,
        male,
        female,
    };

    // `marks` is ordered best first, so the head and tail are the podium
    // and the stragglers. With 3 or fewer marks the two lists coincide.
    let best_three: Vec<ReportMark> = marks.iter().take(3).cloned().collect();
    let mut last_three: Vec<ReportMark> = marks.iter().rev().take(3).cloned().collect();
    last_three.reverse();

    Ok(Json(SubjectReport {
        enrolment,
        statistics,
        best_three,
        last_three,
        marks,
    }))
}
