//! Wire types of the Reserva Sport REST API.
//!
//! Field names follow the backend contract (Spanish column names), so every
//! struct here serializes byte-for-byte the way the server expects.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// Identity & authentication
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cliente,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cliente => "cliente",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `/auth/me` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub rol: Role,
}

/// The slice of the account the client keeps in memory and across reloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub nombre: String,
    pub rol: Role,
}

impl SessionUser {
    pub fn is_admin(&self) -> bool {
        self.rol.is_admin()
    }
}

impl From<UserAccount> for SessionUser {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            nombre: account.nombre,
            rol: account.rol,
        }
    }
}

/// Successful `/auth/login` exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Password-grant credentials. The backend takes them url-encoded, not as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Renders the `application/x-www-form-urlencoded` body.
    pub fn form_body(&self) -> String {
        format!(
            "username={}&password={}&grant_type=password",
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password)
        )
    }
}

// =========================================================
// Facilities & slots
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub aforo: Option<i64>,
    // Older deployments omit the flag; treat those facilities as active.
    #[serde(default = "default_activo")]
    pub activo: bool,
}

fn default_activo() -> bool {
    true
}

/// A bookable time window within a facility.
///
/// `plazas_disponibles` is server-authoritative; the client only ever applies
/// a local decrement after a confirmed booking and re-fetches to reconcile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: i64,
    pub instalacion_id: i64,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub capacidad: u32,
    pub plazas_disponibles: u32,
}

impl Slot {
    pub fn is_full(&self) -> bool {
        self.plazas_disponibles == 0
    }
}

// =========================================================
// Reservations
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Activa,
    Cancelada,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Activa => "activa",
            ReservationStatus::Cancelada => "cancelada",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub instalacion_id: i64,
    pub franja_id: i64,
}

/// A reservation as the member endpoints return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub usuario_id: i64,
    pub instalacion_id: i64,
    pub franja_id: i64,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    // The member endpoints omit this column; absent means the booking is live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<ReservationStatus>,
}

impl Reservation {
    pub fn estado(&self) -> ReservationStatus {
        self.estado.unwrap_or(ReservationStatus::Activa)
    }
}

/// Admin listing row: the reservation joined with owner and facility columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminReservation {
    pub id: i64,
    pub usuario_id: i64,
    pub usuario_nombre: String,
    pub usuario_email: String,
    pub instalacion_id: i64,
    pub instalacion_nombre: String,
    pub franja_id: i64,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub hora_fin: NaiveTime,
    pub estado: ReservationStatus,
}

impl AdminReservation {
    pub fn is_cancelled(&self) -> bool {
        self.estado == ReservationStatus::Cancelada
    }
}

/// Paged envelope of `GET /admin/reservations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationPage {
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
    pub items: Vec<AdminReservation>,
}

// =========================================================
// Unit tests
// =========================================================
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn role_parses_lowercase() {
        let admin: Role = serde_json::from_value(json!("admin")).unwrap();
        let cliente: Role = serde_json::from_value(json!("cliente")).unwrap();
        assert!(admin.is_admin());
        assert!(!cliente.is_admin());
        assert!(serde_json::from_value::<Role>(json!("superuser")).is_err());
    }

    #[test]
    fn session_user_from_account_drops_email() {
        let account: UserAccount = serde_json::from_value(json!({
            "id": 1, "nombre": "Admin", "email": "admin@test.local.es", "rol": "admin"
        }))
        .unwrap();
        let session = SessionUser::from(account);
        assert_eq!(session.id, 1);
        assert_eq!(session.nombre, "Admin");
        assert!(session.is_admin());
    }

    #[test]
    fn login_form_encodes_reserved_characters() {
        let form = LoginForm::new("admin@test.local.es", "Admin1234");
        assert_eq!(
            form.form_body(),
            "username=admin%40test.local.es&password=Admin1234&grant_type=password"
        );
    }

    #[test]
    fn facility_activo_defaults_to_true() {
        let facility: Facility =
            serde_json::from_value(json!({ "id": 3, "nombre": "Pista central" })).unwrap();
        assert!(facility.activo);
        assert_eq!(facility.tipo, None);
        assert_eq!(facility.aforo, None);
    }

    #[test]
    fn slot_parses_backend_shape() {
        let slot: Slot = serde_json::from_value(json!({
            "id": 7,
            "instalacion_id": 1,
            "fecha": "2024-01-01",
            "hora_inicio": "09:00:00",
            "hora_fin": "10:00:00",
            "capacidad": 10,
            "plazas_disponibles": 0
        }))
        .unwrap();
        assert!(slot.is_full());
        assert_eq!(slot.fecha.to_string(), "2024-01-01");
        assert_eq!(slot.hora_inicio.format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn reservation_without_estado_is_active() {
        let reservation: Reservation = serde_json::from_value(json!({
            "id": 12,
            "usuario_id": 4,
            "instalacion_id": 1,
            "franja_id": 7,
            "fecha": "2024-01-01",
            "hora_inicio": "09:00:00",
            "hora_fin": "10:00:00"
        }))
        .unwrap();
        assert_eq!(reservation.estado(), ReservationStatus::Activa);

        let cancelled = Reservation {
            estado: Some(ReservationStatus::Cancelada),
            ..reservation
        };
        assert_eq!(cancelled.estado(), ReservationStatus::Cancelada);
    }

    #[test]
    fn admin_page_parses_envelope() {
        let page: ReservationPage = serde_json::from_value(json!({
            "total": 1,
            "limit": 100,
            "offset": 0,
            "items": [{
                "id": 12,
                "usuario_id": 4,
                "usuario_nombre": "Laura",
                "usuario_email": "laura@test.local.es",
                "instalacion_id": 1,
                "instalacion_nombre": "Pista central",
                "franja_id": 7,
                "fecha": "2024-01-01",
                "hora_inicio": "09:00:00",
                "hora_fin": "10:00:00",
                "estado": "cancelada"
            }]
        }))
        .unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items[0].is_cancelled());
    }
}
