use chrono::{NaiveDate, NaiveTime};

use super::*;

fn slot(id: i64, plazas: u32) -> Slot {
    Slot {
        id,
        instalacion_id: 1,
        fecha: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        hora_inicio: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        hora_fin: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        capacidad: 10,
        plazas_disponibles: plazas,
    }
}

#[test]
fn a_booking_decrements_only_the_target_slot() {
    let mut slots = vec![slot(1, 3), slot(2, 5)];

    apply_local_decrement(&mut slots, 1);

    assert_eq!(slots[0].plazas_disponibles, 2);
    assert_eq!(slots[1].plazas_disponibles, 5);
}

#[test]
fn the_decrement_floors_at_zero() {
    let mut slots = vec![slot(1, 0)];

    apply_local_decrement(&mut slots, 1);

    assert_eq!(slots[0].plazas_disponibles, 0);
}

#[test]
fn a_stale_id_changes_nothing() {
    let mut slots = vec![slot(1, 3)];

    apply_local_decrement(&mut slots, 99);

    assert_eq!(slots[0].plazas_disponibles, 3);
}

#[test]
fn sold_out_slots_are_not_reservable() {
    assert!(!can_reserve(&slot(1, 0)));
    assert!(can_reserve(&slot(1, 3)));
}
