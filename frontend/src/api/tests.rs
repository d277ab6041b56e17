use serde_json::json;

use super::*;
use crate::gateway::tests::{BASE, setup_env};
use crate::web::{HttpBody, HttpMethod};
use reserva_shared::{ReservationStatus, Role};

fn api() -> (crate::gateway::tests::TestEnv, ReservaApi) {
    let env = setup_env();
    let api = ReservaApi::new(env.gateway.clone());
    (env, api)
}

#[tokio::test]
async fn login_posts_the_encoded_form() {
    let (env, api) = api();
    env.transport.mock_response(
        &format!("{BASE}/auth/login"),
        200,
        json!({"access_token": "t1", "token_type": "bearer"}),
    );

    let grant = api
        .login(&LoginForm::new("admin@test.local.es", "Admin1234"))
        .await
        .unwrap();

    assert_eq!(grant.access_token, "t1");

    let requests = env.transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(
        requests[0].header_value("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    let body = match &requests[0].body {
        Some(HttpBody::Text(text)) => text.clone(),
        _ => panic!("expected a text body"),
    };
    assert_eq!(
        body,
        "username=admin%40test.local.es&password=Admin1234&grant_type=password"
    );
}

#[tokio::test]
async fn me_returns_the_account() {
    let (env, api) = api();
    env.transport.mock_response(
        &format!("{BASE}/auth/me"),
        200,
        json!({"id": 1, "nombre": "Admin", "email": "admin@test.local.es", "rol": "admin"}),
    );

    let account = api.me().await.unwrap();

    assert_eq!(account.id, 1);
    assert_eq!(account.rol, Role::Admin);
}

#[tokio::test]
async fn an_unexpected_empty_me_reply_is_a_decode_error() {
    let (env, api) = api();
    env.transport
        .mock_text_response(&format!("{BASE}/auth/me"), 204, "");

    let result = api.me().await;

    assert!(matches!(result, Err(GatewayError::Decode(_))));
}

#[tokio::test]
async fn collection_endpoints_default_to_empty_on_no_content() {
    let (env, api) = api();
    env.transport
        .mock_text_response(&format!("{BASE}/facilities"), 204, "");
    env.transport
        .mock_text_response(&format!("{BASE}/reservations/my"), 204, "");

    assert_eq!(api.facilities().await.unwrap(), Vec::new());
    assert_eq!(api.my_reservations().await.unwrap(), Vec::new());
}

#[tokio::test]
async fn slots_by_facility_hits_the_documented_route() {
    let (env, api) = api();
    let url = format!("{BASE}/slots/by-facility/1?fecha=2024-01-01&available_only=false");
    env.transport.mock_response(
        &url,
        200,
        json!([
            {
                "id": 10, "instalacion_id": 1, "fecha": "2024-01-01",
                "hora_inicio": "09:00:00", "hora_fin": "10:00:00",
                "capacidad": 10, "plazas_disponibles": 0
            },
            {
                "id": 11, "instalacion_id": 1, "fecha": "2024-01-01",
                "hora_inicio": "10:00:00", "hora_fin": "11:00:00",
                "capacidad": 10, "plazas_disponibles": 3
            }
        ]),
    );

    let fecha = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let slots = api.slots_by_facility(1, fecha, false).await.unwrap();

    assert_eq!(env.transport.requests.lock().unwrap()[0].url, url);
    assert_eq!(slots.len(), 2);
    assert!(slots[0].is_full());
    assert!(!slots[1].is_full());
}

#[tokio::test]
async fn create_reservation_posts_the_typed_body() {
    let (env, api) = api();
    env.transport.mock_response(
        &format!("{BASE}/reservations"),
        201,
        json!({
            "id": 55, "usuario_id": 1, "instalacion_id": 2, "franja_id": 7,
            "fecha": "2024-01-05", "hora_inicio": "09:00:00", "hora_fin": "10:00:00"
        }),
    );

    let created = api
        .create_reservation(&ReservationCreate {
            instalacion_id: 2,
            franja_id: 7,
        })
        .await
        .unwrap();

    assert_eq!(created.id, 55);
    // Missing estado reads as an active booking.
    assert_eq!(created.estado(), ReservationStatus::Activa);

    let requests = env.transport.requests.lock().unwrap();
    let body = match &requests[0].body {
        Some(HttpBody::Text(text)) => text.clone(),
        _ => panic!("expected a text body"),
    };
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, json!({"instalacion_id": 2, "franja_id": 7}));
}

#[tokio::test]
async fn cancel_reservation_resolves_on_no_content() {
    let (env, api) = api();
    env.transport
        .mock_text_response(&format!("{BASE}/reservations/12"), 204, "");

    api.cancel_reservation(12).await.unwrap();

    let requests = env.transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].url, format!("{BASE}/reservations/12"));
}

#[tokio::test]
async fn admin_reservations_sends_the_filters() {
    let (env, api) = api();
    let url = format!("{BASE}/admin/reservations?estado=cancelada&limit=100&offset=0");
    env.transport.mock_response(
        &url,
        200,
        json!({
            "total": 1, "limit": 100, "offset": 0,
            "items": [{
                "id": 3, "usuario_id": 9, "usuario_nombre": "Ana",
                "usuario_email": "ana@test.es", "instalacion_id": 1,
                "instalacion_nombre": "Pista 1", "franja_id": 4,
                "fecha": "2024-02-02", "hora_inicio": "18:00:00",
                "hora_fin": "19:00:00", "estado": "cancelada"
            }]
        }),
    );

    let query = AdminReservationQuery::with_estado(Some(ReservationStatus::Cancelada));
    let page = api.admin_reservations(&query).await.unwrap();

    assert_eq!(env.transport.requests.lock().unwrap()[0].url, url);
    assert_eq!(page.total, 1);
    assert!(page.items[0].is_cancelled());
}

#[tokio::test]
async fn admin_cancel_hits_the_admin_route() {
    let (env, api) = api();
    env.transport
        .mock_text_response(&format!("{BASE}/admin/reservations/3"), 204, "");

    api.admin_cancel_reservation(3).await.unwrap();

    assert_eq!(
        env.transport.requests.lock().unwrap()[0].url,
        format!("{BASE}/admin/reservations/3")
    );
}
