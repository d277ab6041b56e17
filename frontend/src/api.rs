//! Typed client for the reservation backend.
//!
//! One method per endpoint; every call funnels through the gateway
//! envelope. Collection endpoints tolerate an empty reply, object endpoints
//! require a payload.

use chrono::NaiveDate;
use leptos::prelude::use_context;

use crate::gateway::{Gateway, GatewayError};
use reserva_shared::protocol::{self, AdminReservationQuery};
use reserva_shared::{
    Facility, LoginForm, Reservation, ReservationCreate, ReservationPage, Slot, TokenResponse,
    UserAccount,
};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct ReservaApi {
    gateway: Gateway,
}

impl ReservaApi {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Exchanges credentials for a bearer token. Does not store it.
    pub async fn login(&self, credentials: &LoginForm) -> Result<TokenResponse, GatewayError> {
        let grant = self
            .gateway
            .post_form(protocol::LOGIN, credentials.form_body())
            .await?;
        require_payload(grant)
    }

    /// Account behind the current token.
    pub async fn me(&self) -> Result<UserAccount, GatewayError> {
        require_payload(self.gateway.get(protocol::ME).await?)
    }

    /// Active facilities.
    pub async fn facilities(&self) -> Result<Vec<Facility>, GatewayError> {
        Ok(self
            .gateway
            .get(protocol::FACILITIES)
            .await?
            .unwrap_or_default())
    }

    /// Slots of one facility on one date. `available_only = false` keeps
    /// full slots in the listing so they can render as sold out.
    pub async fn slots_by_facility(
        &self,
        instalacion_id: i64,
        fecha: NaiveDate,
        available_only: bool,
    ) -> Result<Vec<Slot>, GatewayError> {
        let path = protocol::slots_by_facility(instalacion_id, fecha, available_only);
        Ok(self.gateway.get(&path).await?.unwrap_or_default())
    }

    pub async fn create_reservation(
        &self,
        body: &ReservationCreate,
    ) -> Result<Reservation, GatewayError> {
        require_payload(self.gateway.post(protocol::RESERVATIONS, body).await?)
    }

    /// The signed-in user's own bookings, newest first as the server sends
    /// them.
    pub async fn my_reservations(&self) -> Result<Vec<Reservation>, GatewayError> {
        Ok(self
            .gateway
            .get(protocol::MY_RESERVATIONS)
            .await?
            .unwrap_or_default())
    }

    /// Cancels one of the user's bookings; the server answers 204.
    pub async fn cancel_reservation(&self, id: i64) -> Result<(), GatewayError> {
        self.gateway
            .delete::<serde_json::Value>(&protocol::reservation(id))
            .await?;
        Ok(())
    }

    /// Paged cross-user listing, admin only.
    pub async fn admin_reservations(
        &self,
        query: &AdminReservationQuery,
    ) -> Result<ReservationPage, GatewayError> {
        require_payload(self.gateway.get(&query.to_path()).await?)
    }

    /// Admin-side cancel. Idempotent on the server, so repeating it for an
    /// already-cancelled booking still resolves.
    pub async fn admin_cancel_reservation(&self, id: i64) -> Result<(), GatewayError> {
        self.gateway
            .delete::<serde_json::Value>(&protocol::admin_reservation(id))
            .await?;
        Ok(())
    }
}

/// Object endpoints must answer with a body; an unexpected 204 reads as a
/// decode failure.
fn require_payload<T>(value: Option<T>) -> Result<T, GatewayError> {
    value.ok_or_else(|| GatewayError::Decode("respuesta vacía del servidor".to_string()))
}

pub fn use_api() -> ReservaApi {
    use_context::<ReservaApi>().expect("ReservaApi not found in context. Ensure App provides it.")
}
