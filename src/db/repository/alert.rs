use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

fn parse_datetime(s: &str) -> Result<NaiveDateTime, DatabaseError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .map_err(|e| DatabaseError::ConstraintViolation(format!("Invalid timestamp {s}: {e}")))
}

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

/// Insert a contraindication alert.
pub fn insert_contraindication_alert(
    conn: &Connection,
    alert: &ContraindicationAlert,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO contraindication_alerts
         (id, client_id, condition, severity, detected_date, notes,
          action_taken, is_resolved, resolved_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            alert.id.to_string(),
            alert.client_id.to_string(),
            alert.condition.as_str(),
            alert.severity.as_str(),
            format_datetime(&alert.detected_date),
            alert.notes,
            alert.action_taken,
            alert.is_resolved as i32,
            alert.resolved_date.as_ref().map(format_datetime),
        ],
    )?;
    Ok(())
}

/// Overwrite every mutable column of an existing contraindication alert.
pub fn update_contraindication_alert(
    conn: &Connection,
    alert: &ContraindicationAlert,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE contraindication_alerts SET client_id = ?1, condition = ?2, severity = ?3,
         detected_date = ?4, notes = ?5, action_taken = ?6, is_resolved = ?7,
         resolved_date = ?8
         WHERE id = ?9",
        params![
            alert.client_id.to_string(),
            alert.condition.as_str(),
            alert.severity.as_str(),
            format_datetime(&alert.detected_date),
            alert.notes,
            alert.action_taken,
            alert.is_resolved as i32,
            alert.resolved_date.as_ref().map(format_datetime),
            alert.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "contraindication_alert".into(),
            id: alert.id.to_string(),
        });
    }
    Ok(())
}

/// Load every contraindication alert, resolved ones included.
pub fn load_contraindication_alerts(
    conn: &Connection,
) -> Result<Vec<ContraindicationAlert>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, condition, severity, detected_date, notes,
                action_taken, is_resolved, resolved_date
         FROM contraindication_alerts ORDER BY detected_date",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, String>(5)?,
            row.get::<_, Option<String>>(6)?,
            row.get::<_, i32>(7)?,
            row.get::<_, Option<String>>(8)?,
        ))
    })?;

    let mut alerts = Vec::new();
    for row in rows {
        let (
            id, client_id, condition, severity, detected_date, notes,
            action_taken, is_resolved, resolved_date,
        ) = row?;
        alerts.push(ContraindicationAlert {
            id: parse_uuid(&id)?,
            client_id: parse_uuid(&client_id)?,
            condition: ContraindicationCondition::from_str(&condition)?,
            severity: ContraindicationSeverity::from_str(&severity)?,
            detected_date: parse_datetime(&detected_date)?,
            notes,
            action_taken,
            is_resolved: is_resolved != 0,
            resolved_date: resolved_date.as_deref().map(parse_datetime).transpose()?,
        });
    }
    Ok(alerts)
}

/// Insert a red-flag alert.
pub fn insert_red_flag_alert(conn: &Connection, alert: &RedFlagAlert) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO red_flag_alerts
         (id, client_id, symptom, detected_date, notes, referral_made, referral_details)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            alert.id.to_string(),
            alert.client_id.to_string(),
            alert.symptom.as_str(),
            format_datetime(&alert.detected_date),
            alert.notes,
            alert.referral_made as i32,
            alert.referral_details,
        ],
    )?;
    Ok(())
}

pub fn update_red_flag_alert(conn: &Connection, alert: &RedFlagAlert) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE red_flag_alerts SET client_id = ?1, symptom = ?2, detected_date = ?3,
         notes = ?4, referral_made = ?5, referral_details = ?6
         WHERE id = ?7",
        params![
            alert.client_id.to_string(),
            alert.symptom.as_str(),
            format_datetime(&alert.detected_date),
            alert.notes,
            alert.referral_made as i32,
            alert.referral_details,
            alert.id.to_string(),
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "red_flag_alert".into(),
            id: alert.id.to_string(),
        });
    }
    Ok(())
}

pub fn load_red_flag_alerts(conn: &Connection) -> Result<Vec<RedFlagAlert>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, client_id, symptom, detected_date, notes, referral_made, referral_details
         FROM red_flag_alerts ORDER BY detected_date",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i32>(5)?,
            row.get::<_, Option<String>>(6)?,
        ))
    })?;

    let mut alerts = Vec::new();
    for row in rows {
        let (id, client_id, symptom, detected_date, notes, referral_made, referral_details) = row?;
        alerts.push(RedFlagAlert {
            id: parse_uuid(&id)?,
            client_id: parse_uuid(&client_id)?,
            symptom: RedFlagSymptom::from_str(&symptom)?,
            detected_date: parse_datetime(&detected_date)?,
            notes,
            referral_made: referral_made != 0,
            referral_details,
        });
    }
    Ok(alerts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn contraindication_insert_and_load() {
        let conn = open_memory_database().unwrap();
        let alert = ContraindicationAlert::new(
            Uuid::new_v4(),
            ContraindicationCondition::Cancer,
            "Detected from medical history: stage 2 breast cancer",
        );
        insert_contraindication_alert(&conn, &alert).unwrap();

        let loaded = load_contraindication_alerts(&conn).unwrap();
        assert_eq!(loaded, vec![alert]);
    }

    #[test]
    fn contraindication_update_persists_resolution() {
        let conn = open_memory_database().unwrap();
        let alert = ContraindicationAlert::new(
            Uuid::new_v4(),
            ContraindicationCondition::Fever,
            "38.9C",
        );
        insert_contraindication_alert(&conn, &alert).unwrap();

        let resolved = alert.resolved("rescheduled", chrono::Local::now().naive_local());
        update_contraindication_alert(&conn, &resolved).unwrap();

        let loaded = load_contraindication_alerts(&conn).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].is_resolved);
        assert_eq!(loaded[0].resolved_date, resolved.resolved_date);
        assert_eq!(loaded[0].action_taken.as_deref(), Some("rescheduled"));
    }

    #[test]
    fn update_missing_contraindication_is_not_found() {
        let conn = open_memory_database().unwrap();
        let alert = ContraindicationAlert::new(
            Uuid::new_v4(),
            ContraindicationCondition::Arthritis,
            "",
        );
        match update_contraindication_alert(&conn, &alert) {
            Err(DatabaseError::NotFound { entity_type, .. }) => {
                assert_eq!(entity_type, "contraindication_alert")
            }
            other => panic!("Expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn red_flag_referral_round_trip() {
        let conn = open_memory_database().unwrap();
        let mut flag = RedFlagAlert::new(
            Uuid::new_v4(),
            RedFlagSymptom::CalfPainSwelling,
            "Left calf warm and swollen",
        );
        insert_red_flag_alert(&conn, &flag).unwrap();

        flag.referral_made = true;
        flag.referral_details = Some("Sent to urgent care".into());
        update_red_flag_alert(&conn, &flag).unwrap();

        let loaded = load_red_flag_alerts(&conn).unwrap();
        assert_eq!(loaded, vec![flag]);
    }

    #[test]
    fn unknown_condition_key_fails_load() {
        let conn = open_memory_database().unwrap();
        conn.execute(
            "INSERT INTO contraindication_alerts
             (id, client_id, condition, severity, detected_date)
             VALUES (?1, ?2, 'sunstroke', 'caution', '2026-01-01 09:00:00')",
            params![Uuid::new_v4().to_string(), Uuid::new_v4().to_string()],
        )
        .unwrap();

        let result = load_contraindication_alerts(&conn);
        assert!(matches!(result, Err(DatabaseError::InvalidEnum { .. })));
    }
}
