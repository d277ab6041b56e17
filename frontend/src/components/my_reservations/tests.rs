use chrono::{NaiveDate, NaiveTime};

use super::*;

fn reservation(id: i64, instalacion_id: i64) -> Reservation {
    Reservation {
        id,
        usuario_id: 1,
        instalacion_id,
        franja_id: 10 + id,
        fecha: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        hora_inicio: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        hora_fin: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        estado: None,
    }
}

fn facility(id: i64, nombre: &str) -> Facility {
    Facility {
        id,
        nombre: nombre.to_string(),
        tipo: None,
        aforo: None,
        activo: true,
    }
}

#[test]
fn the_relabel_targets_one_booking() {
    let mut items = vec![reservation(1, 1), reservation(2, 1)];

    mark_cancelled(&mut items, 2);

    assert_eq!(items[0].estado(), ReservationStatus::Activa);
    assert_eq!(items[1].estado(), ReservationStatus::Cancelada);
}

#[test]
fn relabelling_an_unknown_id_changes_nothing() {
    let mut items = vec![reservation(1, 1)];

    mark_cancelled(&mut items, 99);

    assert_eq!(items[0].estado(), ReservationStatus::Activa);
}

#[test]
fn facility_names_index_by_id() {
    let names = facility_names(&[facility(1, "Pista 1"), facility(2, "Piscina")]);

    assert_eq!(names.get(&1).map(String::as_str), Some("Pista 1"));
    assert_eq!(names.get(&2).map(String::as_str), Some("Piscina"));
    assert_eq!(names.get(&3), None);
}
