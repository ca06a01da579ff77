//! SQL operations over the `idea_store` table

use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::types::{
    IdeaFilter, NewIdea, PortfolioSummary, ProjectIdea, RESOURCE_TYPE_LABELS,
};

const IDEA_COLUMNS: &str = "id, project_name, category, priority_level, size_score, \
     business_impact, resource_type, risk_level, total_score, project_tier, \
     project_phase, notes, created_at, updated_at";

fn idea_from_row(row: &Row<'_>) -> rusqlite::Result<ProjectIdea> {
    let phase: String = row.get("project_phase")?;
    Ok(ProjectIdea {
        id: row.get("id")?,
        project_name: row.get("project_name")?,
        category: row.get("category")?,
        priority_level: row.get("priority_level")?,
        size_score: row.get("size_score")?,
        business_impact: row.get("business_impact")?,
        resource_type: row.get("resource_type")?,
        risk_level: row.get("risk_level")?,
        total_score: row.get("total_score")?,
        project_tier: row.get("project_tier")?,
        project_phase: phase.parse().unwrap_or_default(),
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Insert a validated idea and return the stored row, including the
/// store-computed `total_score` and `project_tier`. A CHECK violation fails
/// the whole insert; no partial row is persisted.
pub fn insert_idea(conn: &Connection, input: &NewIdea) -> Result<ProjectIdea> {
    let now = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO idea_store
            (project_name, category, priority_level, size_score, business_impact,
             resource_type, risk_level, project_phase, notes, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            input.project_name,
            input.category,
            input.priority_level,
            input.size_score,
            input.business_impact,
            input.resource_type,
            input.risk_level,
            input.project_phase.as_str(),
            input.notes,
            now,
            now,
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_idea(conn, id)
}

/// Get an idea by ID
pub fn get_idea(conn: &Connection, id: i64) -> Result<ProjectIdea> {
    let sql = format!("SELECT {} FROM idea_store WHERE id = ?", IDEA_COLUMNS);
    let idea = conn.query_row(&sql, params![id], idea_from_row)?;
    Ok(idea)
}

/// List ideas matching the conjunction of all supplied filters, in
/// store-native order. Each absent filter is omitted from the WHERE clause
/// entirely. Filter values are not range-checked here; an out-of-range tier
/// simply matches nothing.
pub fn list_ideas(conn: &Connection, filter: &IdeaFilter) -> Result<Vec<ProjectIdea>> {
    let mut sql = format!("SELECT {} FROM idea_store", IDEA_COLUMNS);

    let mut conditions: Vec<String> = vec![];
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![];

    if let Some(ref name) = filter.project_name {
        // instr() keeps the substring match case-sensitive; LIKE would fold
        // ASCII case.
        conditions.push("instr(project_name, ?) > 0".to_string());
        params.push(Box::new(name.clone()));
    }

    if let Some(ref category) = filter.category {
        conditions.push("category = ?".to_string());
        params.push(Box::new(category.clone()));
    }

    if let Some(tier) = filter.project_tier {
        conditions.push("project_tier = ?".to_string());
        params.push(Box::new(tier));
    }

    if let Some(ref phase) = filter.project_phase {
        conditions.push("project_phase = ?".to_string());
        params.push(Box::new(phase.clone()));
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|b| b.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let ideas = stmt
        .query_map(param_refs.as_slice(), idea_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(ideas)
}

/// All ideas ordered for the artifact view: priority first, total score as
/// tie-break, then id so full ties stay stable across calls.
pub fn list_ideas_prioritized(conn: &Connection) -> Result<Vec<ProjectIdea>> {
    let sql = format!(
        "SELECT {} FROM idea_store
         ORDER BY priority_level DESC, total_score DESC, id ASC",
        IDEA_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let ideas = stmt
        .query_map([], idea_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(ideas)
}

/// Aggregate statistics over every stored idea. Returns zeroed values for an
/// empty store; the average never divides by zero.
pub fn portfolio_summary(conn: &Connection) -> Result<PortfolioSummary> {
    let total_projects: i64 =
        conn.query_row("SELECT COUNT(*) FROM idea_store", [], |row| row.get(0))?;

    let high_priority_projects: i64 = conn.query_row(
        "SELECT COUNT(*) FROM idea_store WHERE priority_level >= 3",
        [],
        |row| row.get(0),
    )?;

    // AVG over zero rows is NULL in SQLite
    let average_score: f64 = conn.query_row(
        "SELECT COALESCE(AVG(total_score), 0.0) FROM idea_store",
        [],
        |row| row.get(0),
    )?;

    let mut summary = PortfolioSummary {
        total_projects,
        high_priority_projects,
        average_score,
        ..Default::default()
    };

    let mut stmt =
        conn.prepare("SELECT category, COUNT(*) FROM idea_store GROUP BY category")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
    for row in rows {
        let (category, count) = row?;
        summary.by_category.insert(category, count);
    }

    let mut stmt =
        conn.prepare("SELECT project_phase, COUNT(*) FROM idea_store GROUP BY project_phase")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
    for row in rows {
        let (phase, count) = row?;
        summary.by_phase.insert(phase, count);
    }

    let mut stmt =
        conn.prepare("SELECT risk_level, COUNT(*) FROM idea_store GROUP BY risk_level")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
    for row in rows {
        let (risk, count) = row?;
        summary.by_risk_level.insert(risk.to_string(), count);
    }

    let mut stmt =
        conn.prepare("SELECT resource_type, COUNT(*) FROM idea_store GROUP BY resource_type")?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
    for row in rows {
        let (resource, count) = row?;
        summary
            .by_resource_type
            .insert(resource_label(resource).to_string(), count);
    }

    Ok(summary)
}

fn resource_label(resource_type: i64) -> &'static str {
    RESOURCE_TYPE_LABELS
        .iter()
        .find(|(id, _)| *id == resource_type)
        .map(|(_, label)| *label)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AddIdeaParams, ProjectPhase};
    use pretty_assertions::assert_eq;

    fn open_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::storage::run_migrations(&conn).unwrap();
        conn
    }

    fn new_idea(name: &str, category: &str) -> NewIdea {
        AddIdeaParams {
            project_name: Some(name.to_string()),
            category: Some(category.to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    fn scored_idea(name: &str, p: i64, s: i64, b: i64, r: i64, k: i64) -> NewIdea {
        NewIdea {
            priority_level: p,
            size_score: s,
            business_impact: b,
            resource_type: r,
            risk_level: k,
            ..new_idea(name, "General")
        }
    }

    #[test]
    fn test_insert_returns_stored_row_with_defaults() {
        let conn = open_conn();
        let idea = insert_idea(&conn, &new_idea("Billing portal", "Finance")).unwrap();

        assert_eq!(idea.project_name, "Billing portal");
        assert_eq!(idea.category, "Finance");
        assert_eq!(idea.priority_level, 1);
        assert_eq!(idea.size_score, 1);
        assert_eq!(idea.business_impact, 1);
        assert_eq!(idea.resource_type, 1);
        assert_eq!(idea.risk_level, 1);
        assert_eq!(idea.total_score, 5);
        assert_eq!(idea.project_tier, 3);
        assert_eq!(idea.project_phase, ProjectPhase::Planning);
        assert_eq!(idea.notes, "");
        assert!(!idea.created_at.is_empty());
        assert_eq!(idea.created_at, idea.updated_at);
    }

    #[test]
    fn test_tier_thresholds() {
        let conn = open_conn();
        let cases = [
            ((4, 3, 4, 3, 3), 17, 1),
            ((3, 2, 3, 2, 2), 12, 2),
            ((2, 2, 2, 2, 2), 10, 3),
            ((4, 3, 4, 2, 3), 16, 1),
            ((3, 2, 2, 2, 2), 11, 2),
        ];
        for (i, ((p, s, b, r, k), total, tier)) in cases.into_iter().enumerate() {
            let idea =
                insert_idea(&conn, &scored_idea(&format!("idea-{}", i), p, s, b, r, k)).unwrap();
            assert_eq!(idea.total_score, total, "case {}", i);
            assert_eq!(idea.project_tier, tier, "case {}", i);
        }
    }

    #[test]
    fn test_list_no_filters_returns_all_rows() {
        let conn = open_conn();
        for name in ["one", "two", "three"] {
            insert_idea(&conn, &new_idea(name, "General")).unwrap();
        }
        let all = list_ideas(&conn, &IdeaFilter::default()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_list_filters_are_conjunctive() {
        let conn = open_conn();
        insert_idea(
            &conn,
            &NewIdea {
                project_phase: ProjectPhase::Completed,
                ..new_idea("alpha rollout", "Infra")
            },
        )
        .unwrap();
        insert_idea(
            &conn,
            &NewIdea {
                project_phase: ProjectPhase::Planning,
                ..new_idea("alpha research", "Infra")
            },
        )
        .unwrap();
        insert_idea(
            &conn,
            &NewIdea {
                project_phase: ProjectPhase::Completed,
                ..new_idea("beta rollout", "Product")
            },
        )
        .unwrap();

        let filter = IdeaFilter {
            project_name: Some("alpha".to_string()),
            project_phase: Some("Completed".to_string()),
            ..Default::default()
        };
        let matches = list_ideas(&conn, &filter).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].project_name, "alpha rollout");
    }

    #[test]
    fn test_list_phase_filter_exact() {
        let conn = open_conn();
        for (name, phase) in [
            ("a", ProjectPhase::Planning),
            ("b", ProjectPhase::InProgress),
            ("c", ProjectPhase::OnHold),
            ("d", ProjectPhase::Completed),
            ("e", ProjectPhase::Completed),
        ] {
            insert_idea(
                &conn,
                &NewIdea {
                    project_phase: phase,
                    ..new_idea(name, "General")
                },
            )
            .unwrap();
        }

        let filter = IdeaFilter {
            project_phase: Some("Completed".to_string()),
            ..Default::default()
        };
        let completed = list_ideas(&conn, &filter).unwrap();
        assert_eq!(completed.len(), 2);
        assert!(completed
            .iter()
            .all(|i| i.project_phase == ProjectPhase::Completed));
    }

    #[test]
    fn test_substring_match_is_case_sensitive() {
        let conn = open_conn();
        insert_idea(&conn, &new_idea("Apollo launch", "Space")).unwrap();

        let lower = IdeaFilter {
            project_name: Some("apollo".to_string()),
            ..Default::default()
        };
        assert!(list_ideas(&conn, &lower).unwrap().is_empty());

        let exact = IdeaFilter {
            project_name: Some("Apollo".to_string()),
            ..Default::default()
        };
        assert_eq!(list_ideas(&conn, &exact).unwrap().len(), 1);
    }

    #[test]
    fn test_out_of_range_tier_filter_matches_nothing() {
        let conn = open_conn();
        insert_idea(&conn, &new_idea("a", "General")).unwrap();

        let filter = IdeaFilter {
            project_tier: Some(7),
            ..Default::default()
        };
        // The query path does not reject out-of-range values, it just finds
        // no rows.
        assert!(list_ideas(&conn, &filter).unwrap().is_empty());
    }

    #[test]
    fn test_prioritized_ordering_and_stability() {
        let conn = open_conn();
        // Same priority, different totals
        insert_idea(&conn, &scored_idea("low", 2, 1, 1, 1, 1)).unwrap();
        insert_idea(&conn, &scored_idea("high", 2, 3, 4, 3, 3)).unwrap();
        // Higher priority, lower total
        insert_idea(&conn, &scored_idea("urgent", 4, 1, 1, 1, 1)).unwrap();
        // Full tie with "low"
        insert_idea(&conn, &scored_idea("low-twin", 2, 1, 1, 1, 1)).unwrap();

        let first = list_ideas_prioritized(&conn).unwrap();
        let names: Vec<&str> = first.iter().map(|i| i.project_name.as_str()).collect();
        assert_eq!(names, vec!["urgent", "high", "low", "low-twin"]);

        // Repeat call against unchanged data keeps the same relative order
        let second = list_ideas_prioritized(&conn).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_on_empty_store() {
        let conn = open_conn();
        let summary = portfolio_summary(&conn).unwrap();
        assert_eq!(summary.total_projects, 0);
        assert_eq!(summary.high_priority_projects, 0);
        assert_eq!(summary.average_score, 0.0);
        assert!(summary.by_category.is_empty());
        assert!(summary.by_phase.is_empty());
    }

    #[test]
    fn test_summary_counts_and_average() {
        let conn = open_conn();
        // totals 5 and 15 -> average 10
        insert_idea(&conn, &scored_idea("small", 1, 1, 1, 1, 1)).unwrap();
        insert_idea(
            &conn,
            &NewIdea {
                project_phase: ProjectPhase::InProgress,
                resource_type: 2,
                ..scored_idea("big", 4, 2, 4, 2, 3)
            },
        )
        .unwrap();

        let summary = portfolio_summary(&conn).unwrap();
        assert_eq!(summary.total_projects, 2);
        assert_eq!(summary.high_priority_projects, 1);
        assert_eq!(summary.average_score, 10.0);
        assert_eq!(summary.by_category.get("General"), Some(&2));
        assert_eq!(summary.by_phase.get("Planning"), Some(&1));
        assert_eq!(summary.by_phase.get("In Progress"), Some(&1));
        assert_eq!(summary.by_risk_level.get("1"), Some(&1));
        assert_eq!(summary.by_risk_level.get("3"), Some(&1));
        assert_eq!(summary.by_resource_type.get("Internal"), Some(&1));
        assert_eq!(summary.by_resource_type.get("External"), Some(&1));
    }
}
