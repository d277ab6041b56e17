//! Endpoint paths of the reservation API.
//!
//! Every path literal the client can hit lives here next to the query
//! builders that produce it, so the wire contract stays in one place.

use crate::ReservationStatus;
use chrono::NaiveDate;

pub const LOGIN: &str = "/auth/login";
pub const ME: &str = "/auth/me";
pub const FACILITIES: &str = "/facilities";
pub const RESERVATIONS: &str = "/reservations";
pub const MY_RESERVATIONS: &str = "/reservations/my";
pub const ADMIN_RESERVATIONS: &str = "/admin/reservations";

/// The backend rejects page sizes above this with a validation error.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// `/slots/by-facility/{id}?fecha=YYYY-MM-DD&available_only=bool`
pub fn slots_by_facility(instalacion_id: i64, fecha: NaiveDate, available_only: bool) -> String {
    format!(
        "/slots/by-facility/{}?fecha={}&available_only={}",
        instalacion_id,
        fecha.format("%Y-%m-%d"),
        available_only
    )
}

/// `/reservations/{id}`
pub fn reservation(id: i64) -> String {
    format!("{RESERVATIONS}/{id}")
}

/// `/admin/reservations/{id}`
pub fn admin_reservation(id: i64) -> String {
    format!("{ADMIN_RESERVATIONS}/{id}")
}

/// Filters of the admin reservation listing.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminReservationQuery {
    pub usuario_id: Option<i64>,
    pub instalacion_id: Option<i64>,
    pub fecha: Option<NaiveDate>,
    pub estado: Option<ReservationStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for AdminReservationQuery {
    fn default() -> Self {
        Self {
            usuario_id: None,
            instalacion_id: None,
            fecha: None,
            estado: None,
            limit: MAX_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl AdminReservationQuery {
    pub fn with_estado(estado: Option<ReservationStatus>) -> Self {
        Self {
            estado,
            ..Self::default()
        }
    }

    /// Renders `/admin/reservations?...` with only the filters that are set.
    pub fn to_path(&self) -> String {
        let mut params: Vec<String> = Vec::new();
        if let Some(id) = self.usuario_id {
            params.push(format!("usuario_id={id}"));
        }
        if let Some(id) = self.instalacion_id {
            params.push(format!("instalacion_id={id}"));
        }
        if let Some(fecha) = self.fecha {
            params.push(format!("fecha={}", fecha.format("%Y-%m-%d")));
        }
        if let Some(estado) = self.estado {
            params.push(format!("estado={estado}"));
        }
        params.push(format!("limit={}", self.limit));
        params.push(format!("offset={}", self.offset));
        format!("{ADMIN_RESERVATIONS}?{}", params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn slots_path_matches_backend_route() {
        assert_eq!(
            slots_by_facility(1, date("2024-01-01"), false),
            "/slots/by-facility/1?fecha=2024-01-01&available_only=false"
        );
    }

    #[test]
    fn reservation_paths_embed_id() {
        assert_eq!(reservation(42), "/reservations/42");
        assert_eq!(admin_reservation(42), "/admin/reservations/42");
    }

    #[test]
    fn admin_query_defaults_to_first_full_page() {
        assert_eq!(
            AdminReservationQuery::default().to_path(),
            "/admin/reservations?limit=100&offset=0"
        );
    }

    #[test]
    fn admin_query_renders_set_filters_only() {
        let query = AdminReservationQuery {
            usuario_id: Some(4),
            fecha: Some(date("2024-01-01")),
            estado: Some(ReservationStatus::Cancelada),
            ..Default::default()
        };
        assert_eq!(
            query.to_path(),
            "/admin/reservations?usuario_id=4&fecha=2024-01-01&estado=cancelada&limit=100&offset=0"
        );
    }
}
