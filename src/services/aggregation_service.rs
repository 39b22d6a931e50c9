//! Motor de agregación
//!
//! Consultas de agrupado/resumen de solo lectura sobre las bitácoras.
//! Funciones puras sobre slices de eventos: una bitácora vacía produce
//! un resultado vacío, nunca un error. Los rangos de fechas son
//! inclusivos en ambos extremos y se comparan por día calendario.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::movement_event::MovementEvent;
use crate::models::quarry_event::{QuarryAggregateEvent, QuarryLogType};
use crate::models::vehicle::LogType;

/// Resumen diario de la bitácora por vehículo
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MovementDayStat {
    pub date: NaiveDate,
    pub log_type: LogType,
    pub count: u64,
}

/// Resumen por tipo de la bitácora agregada de canteras
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuarryLogStat {
    pub log_type: QuarryLogType,
    pub total_trucks: u64,
    pub total_logs: u64,
}

fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
}

/// Agrupar eventos de movimiento por (día, tipo) y sumar filas,
/// ordenado por día descendente.
pub fn aggregate_movements(
    events: &[MovementEvent],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<MovementDayStat> {
    let mut groups: BTreeMap<(NaiveDate, LogType), u64> = BTreeMap::new();

    for event in events {
        let date = event.log_date.date_naive();
        if !in_range(date, start, end) {
            continue;
        }
        *groups.entry((date, event.log_type)).or_insert(0) += 1;
    }

    let mut stats: Vec<MovementDayStat> = groups
        .into_iter()
        .map(|((date, log_type), count)| MovementDayStat {
            date,
            log_type,
            count,
        })
        .collect();
    stats.sort_by(|a, b| b.date.cmp(&a.date));
    stats
}

/// Agrupar eventos agregados de cantera por tipo: suma de camiones
/// (`truck_count`) y conteo de filas, con filtro opcional por cantera.
pub fn aggregate_quarry_events(
    events: &[QuarryAggregateEvent],
    quarry_id: Option<Uuid>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<QuarryLogStat> {
    let mut groups: BTreeMap<QuarryLogType, (u64, u64)> = BTreeMap::new();

    for event in events {
        if quarry_id.map_or(false, |q| event.quarry_id != q) {
            continue;
        }
        if !in_range(event.log_date.date_naive(), start, end) {
            continue;
        }
        let entry = groups.entry(event.log_type).or_insert((0, 0));
        entry.0 += u64::from(event.truck_count);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(log_type, (total_trucks, total_logs))| QuarryLogStat {
            log_type,
            total_trucks,
            total_logs,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Utc};

    fn movement(day: u32, log_type: LogType) -> MovementEvent {
        MovementEvent {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            plate_number: "ABC123".to_string(),
            brand: "Isuzu".to_string(),
            company: "Norte SA".to_string(),
            log_type,
            log_date: Utc.with_ymd_and_hms(2025, 3, day, 10, 0, 0).unwrap(),
            log_time: "10:00:00 AM".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn quarry_event(quarry_id: Uuid, log_type: QuarryLogType, trucks: u32) -> QuarryAggregateEvent {
        QuarryAggregateEvent {
            id: Uuid::new_v4(),
            quarry_id,
            log_type,
            truck_count: trucks,
            notes: None,
            logged_by: Uuid::new_v4(),
            log_date: Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_ledger_yields_empty_stats() {
        assert!(aggregate_movements(&[], None, None).is_empty());
        assert!(aggregate_quarry_events(&[], None, None, None).is_empty());
    }

    #[test]
    fn test_groups_by_day_and_type_ordered_desc() {
        let events = vec![
            movement(10, LogType::In),
            movement(10, LogType::In),
            movement(10, LogType::Out),
            movement(12, LogType::In),
        ];

        let stats = aggregate_movements(&events, None, None);

        assert_eq!(stats.len(), 3);
        // Día más reciente primero
        assert_eq!(stats[0].date, NaiveDate::from_ymd_opt(2025, 3, 12).unwrap());
        assert_eq!(stats[0].count, 1);

        let day10_in = stats
            .iter()
            .find(|s| s.date.day0() == 9 && s.log_type == LogType::In)
            .unwrap();
        assert_eq!(day10_in.count, 2);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let events = vec![
            movement(9, LogType::In),
            movement(10, LogType::In),
            movement(11, LogType::In),
            movement(12, LogType::In),
        ];

        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        let stats = aggregate_movements(&events, Some(start), Some(end));

        let days: Vec<u32> = stats.iter().map(|s| s.date.day()).collect();
        assert_eq!(days, vec![11, 10]);
    }

    #[test]
    fn test_quarry_stats_sum_truck_counts() {
        let quarry = Uuid::new_v4();
        let other = Uuid::new_v4();
        let events = vec![
            quarry_event(quarry, QuarryLogType::In, 4),
            quarry_event(quarry, QuarryLogType::In, 6),
            quarry_event(quarry, QuarryLogType::Out, 2),
            quarry_event(other, QuarryLogType::In, 50),
        ];

        let stats = aggregate_quarry_events(&events, Some(quarry), None, None);

        assert_eq!(stats.len(), 2);
        let ins = stats.iter().find(|s| s.log_type == QuarryLogType::In).unwrap();
        assert_eq!(ins.total_trucks, 10);
        assert_eq!(ins.total_logs, 2);
        let outs = stats.iter().find(|s| s.log_type == QuarryLogType::Out).unwrap();
        assert_eq!(outs.total_trucks, 2);
        assert_eq!(outs.total_logs, 1);
    }
}
