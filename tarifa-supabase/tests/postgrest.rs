use chrono::NaiveDate;
use httpmock::prelude::*;
use rust_decimal_macros::dec;
use serde_json::json;
use tarifa_core::connector::StoreConnector;
use tarifa_core::{ObservationId, PriceKind, PropertyRef, TarifaError};
use tarifa_supabase::{SupabaseConfig, SupabaseStore};

fn store(server: &MockServer) -> SupabaseStore {
    SupabaseStore::new(SupabaseConfig::new(server.base_url(), "anon-key").with_user_jwt("jwt-1"))
        .expect("valid config")
}

#[tokio::test]
async fn lists_observations_by_name_with_auth_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/hotel_usuario")
                .query_param("select", "*")
                .query_param("hotel_name", "eq.Grand Hotel")
                .query_param("order", "checkin_date.asc")
                .header("apikey", "anon-key")
                .header("authorization", "Bearer jwt-1");
            then.status(200).json_body(json!([
                {"id": 1, "hotel_name": "Grand Hotel", "checkin_date": "2024-05-10",
                 "room_type": "Doble", "price": "$1,200"},
                {"id": 2, "nombre": "Grand Hotel", "fecha": "2024-05-10",
                 "room_type": "Suite", "precio": 1100.50, "tipo": "predicho"}
            ]));
        })
        .await;

    let s = store(&server);
    let rows = s
        .as_observation_provider()
        .unwrap()
        .list_observations(&PropertyRef::Name("Grand Hotel".into()))
        .await
        .expect("rows");
    mock.assert_async().await;

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].price.as_deref(), Some("$1,200"));
    assert_eq!(rows[1].id.as_str(), "2");
    assert_eq!(rows[1].kind, PriceKind::Predicted);
    assert_eq!(rows[1].checkin_date, NaiveDate::from_ymd_opt(2024, 5, 10));
}

#[tokio::test]
async fn lookup_and_order_columns_follow_the_config() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/hotel_usuario")
                .query_param("nombre", "eq.Hostal Sol")
                .query_param("order", "fecha.asc");
            then.status(200).json_body(json!([
                {"id": 9, "nombre": "Hostal Sol", "fecha": "2024-03-15", "precio": "45"}
            ]));
        })
        .await;

    let cfg = SupabaseConfig::new(server.base_url(), "anon-key")
        .with_observation_columns("nombre", "fecha");
    let rows = SupabaseStore::new(cfg)
        .expect("valid config")
        .as_observation_provider()
        .unwrap()
        .list_observations(&PropertyRef::Name("Hostal Sol".into()))
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(rows[0].property_name, "Hostal Sol");
    assert_eq!(rows[0].checkin_date, NaiveDate::from_ymd_opt(2024, 3, 15));
}

#[tokio::test]
async fn lists_observations_by_property_id_column() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/rest/v1/hotel_usuario")
                .query_param("user_id", "eq.u-42");
            then.status(200).json_body(json!([
                {"id": "a", "hotel_name": "Hostal Sol", "user_id": "u-42"}
            ]));
        })
        .await;

    let rows = store(&server)
        .as_observation_provider()
        .unwrap()
        .list_observations(&PropertyRef::Id("u-42".into()))
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(rows[0].property_id.as_deref(), Some("u-42"));
}

#[tokio::test]
async fn events_are_filtered_by_location_client_side() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/events");
            then.status(200).json_body(json!([
                {"id": 1, "nombre": "Feria", "lugar": "IFEMA", "location": "Madrid",
                 "fecha_inicio": "2024-05-09", "fecha_fin": "2024-05-10"},
                {"id": 2, "name": "Fallas", "venue": "Plaza", "location": "Valencia",
                 "date": "2024-03-19"}
            ]));
        })
        .await;

    let ep_store = store(&server);
    let ep = ep_store.as_event_provider().unwrap();
    let madrid = ep.list_events(Some("MADRID")).await.unwrap();
    assert_eq!(madrid.len(), 1);
    assert_eq!(madrid[0].name, "Feria");
    assert_eq!(ep.list_events(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn patch_writes_price_text_and_requests_representation() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PATCH)
                .path("/rest/v1/hotel_usuario")
                .query_param("id", "eq.17")
                .header("prefer", "return=representation")
                .json_body(json!({"price": "1380.30"}));
            then.status(200).json_body(json!([{"id": 17, "price": "1380.30"}]));
        })
        .await;

    store(&server)
        .as_price_writer()
        .unwrap()
        .update_observation_price(&ObservationId::new("17"), dec!(1380.30))
        .await
        .expect("patched");
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_patch_representation_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PATCH).path("/rest/v1/hotel_usuario");
            then.status(200).json_body(json!([]));
        })
        .await;

    let err = store(&server)
        .as_price_writer()
        .unwrap()
        .update_observation_price(&ObservationId::new("404"), dec!(1))
        .await
        .expect_err("no row");
    assert!(matches!(err, TarifaError::NotFound { .. }));
}

#[tokio::test]
async fn http_errors_are_normalized() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/missing_table");
            then.status(404).body("relation does not exist");
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/rest/v1/events");
            then.status(500).body("boom");
        })
        .await;

    let cfg = SupabaseConfig::new(server.base_url(), "k").with_observations_table("missing_table");
    let s = SupabaseStore::new(cfg).unwrap();
    let err = s
        .as_observation_provider()
        .unwrap()
        .list_observations(&PropertyRef::Name("X".into()))
        .await
        .expect_err("404");
    assert!(matches!(err, TarifaError::NotFound { .. }));

    let err = s
        .as_event_provider()
        .unwrap()
        .list_events(None)
        .await
        .expect_err("500");
    match err {
        TarifaError::Store { store, msg } => {
            assert_eq!(store, "tarifa-supabase");
            assert!(msg.contains("500"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn incomplete_config_is_rejected() {
    assert!(matches!(
        SupabaseStore::new(SupabaseConfig::new("", "k")),
        Err(TarifaError::InvalidArg(_))
    ));
    assert!(SupabaseStore::new(SupabaseConfig::new("https://x.supabase.co", " ")).is_err());
    assert!(SupabaseStore::new(SupabaseConfig::new("ftp://x", "k")).is_err());
    assert!(
        SupabaseStore::new(
            SupabaseConfig::new("https://x.supabase.co", "k").with_observation_columns("", "fecha")
        )
        .is_err()
    );
}

#[test]
fn config_deserializes_with_default_tables() {
    let cfg: SupabaseConfig =
        serde_json::from_value(json!({"base_url": "https://x.supabase.co", "api_key": "k"}))
            .unwrap();
    assert_eq!(cfg.observations_table, "hotel_usuario");
    assert_eq!(cfg.events_table, "events");
    assert_eq!(cfg.property_name_column, "hotel_name");
    assert_eq!(cfg.order_column, "checkin_date");
    assert!(cfg.user_jwt.is_none());
}
