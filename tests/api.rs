//! HTTP-level tests: routes, JSON bodies and error status codes.

use actix_web::{http::StatusCode, test, web::Data, App};
use karate_bracket_web::{api, EntityStore, MemStore};
use serde_json::{json, Value};
use std::sync::Arc;

macro_rules! init_app {
    () => {{
        let store: Arc<dyn EntityStore> = Arc::new(MemStore::new());
        test::init_service(
            App::new()
                .app_data(Data::from(store))
                .configure(api::configure),
        )
        .await
    }};
}

/// Call the service and return the status with the JSON body (`null` when empty).
macro_rules! send {
    ($app:expr, $req:expr $(,)?) => {{
        let resp = test::call_service($app, $req.to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, json_body(&body))
    }};
}

/// Create a kumite tournament with `names` registered and its bracket generated.
macro_rules! started {
    ($app:expr, $names:expr) => {{
        let names: &[&str] = $names;
        let (status, t) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/tournaments")
                .set_json(json!({ "name": "City Open", "type": "kumite", "size": names.len() }))
        );
        assert_eq!(status, StatusCode::OK);
        let id = t["id"].as_str().unwrap().to_string();

        for name in names {
            let (status, _) = send!(
                $app,
                test::TestRequest::post()
                    .uri(&format!("/api/tournaments/{id}/players"))
                    .set_json(json!({ "name": name }))
            );
            assert_eq!(status, StatusCode::OK);
        }

        let (status, matches) = send!(
            $app,
            test::TestRequest::post().uri(&format!("/api/tournaments/{id}/generate-bracket"))
        );
        assert_eq!(status, StatusCode::OK);
        (id, matches.as_array().unwrap().clone())
    }};
}

fn json_body(body: &[u8]) -> Value {
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(body).unwrap()
    }
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = init_app!();
    let (status, body) = send!(&app, test::TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
}

#[actix_web::test]
async fn final_decides_the_champion() {
    let app = init_app!();
    let (id, matches) = started!(&app, &["Aiko", "Ren"]);
    assert_eq!(matches.len(), 1);
    let final_match = &matches[0];
    let match_id = final_match["id"].as_str().unwrap();

    let (status, t) = send!(&app, test::TestRequest::get().uri(&format!("/api/tournaments/{id}")));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(t["status"], json!("active"));
    assert_eq!(t["type"], json!("kumite"));

    let (_, champion) = send!(
        &app,
        test::TestRequest::get().uri(&format!("/api/tournaments/{id}/champion")),
    );
    assert_eq!(champion, Value::Null);

    let (status, scored) = send!(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/matches/{match_id}/score"))
            .set_json(json!({ "player2_wazari": 1 })),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scored["status"], json!("in_progress"));
    assert_eq!(scored["player2_score"], json!(2.0));

    let (status, done) = send!(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/matches/{match_id}/complete"))
            .set_json(json!({
                "winner_id": final_match["player1_id"],
                "player1_ippon": 1,
            })),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], json!("completed"));
    assert_eq!(done["winner_id"], final_match["player1_id"]);

    let (_, champion) = send!(
        &app,
        test::TestRequest::get().uri(&format!("/api/tournaments/{id}/champion")),
    );
    assert_eq!(champion["name"], json!("Aiko"));

    let (status, again) = send!(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/matches/{match_id}/complete"))
            .set_json(json!({
                "winner_id": final_match["player1_id"],
                "player1_ippon": 1,
            })),
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(again["error"].is_string());
}

#[actix_web::test]
async fn tie_without_senshu_is_a_bad_request() {
    let app = init_app!();
    let (id, matches) = started!(&app, &["Aiko", "Ren", "Sora", "Hana"]);
    let first = &matches[0];
    let match_id = first["id"].as_str().unwrap();

    let (status, body) = send!(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/matches/{match_id}/complete"))
            .set_json(json!({
                "winner_id": first["player1_id"],
                "player1_yuko": 2,
                "player2_yuko": 2,
            })),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, round_one) = send!(
        &app,
        test::TestRequest::get().uri(&format!("/api/tournaments/{id}/matches/round/1")),
    );
    assert_eq!(status, StatusCode::OK);
    assert!(round_one
        .as_array()
        .unwrap()
        .iter()
        .all(|m| m["status"] == json!("pending")));
}

#[actix_web::test]
async fn unknown_ids_are_not_found() {
    let app = init_app!();
    let missing = uuid::Uuid::new_v4();

    for uri in [
        format!("/api/tournaments/{missing}"),
        format!("/api/tournaments/{missing}/players"),
        format!("/api/matches/{missing}"),
    ] {
        let (status, body) = send!(&app, test::TestRequest::get().uri(&uri));
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].is_string());
    }

    let (status, _) = send!(
        &app,
        test::TestRequest::delete().uri(&format!("/api/players/{missing}")),
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn invalid_size_is_a_bad_request() {
    let app = init_app!();
    let (status, body) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(json!({ "name": "Tiny", "size": 1 })),
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn csv_import_and_delete() {
    let app = init_app!();
    let (status, t) = send!(
        &app,
        test::TestRequest::post()
            .uri("/api/tournaments")
            .set_json(json!({ "name": "Kata Cup", "type": "kata", "size": 3 })),
    );
    assert_eq!(status, StatusCode::OK);
    let id = t["id"].as_str().unwrap();

    let (status, added) = send!(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/players/import"))
            .insert_header(("content-type", "text/csv"))
            .set_payload("name,belt_color\nAiko,blue\nRen,\nSora,\n"),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added.as_array().unwrap().len(), 3);
    assert_eq!(added[1]["belt_color"], json!("blue"));

    let (status, _) = send!(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/players"))
            .set_json(json!({ "name": "Late" })),
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send!(
        &app,
        test::TestRequest::delete().uri(&format!("/api/tournaments/{id}")),
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    let (status, _) = send!(&app, test::TestRequest::get().uri(&format!("/api/tournaments/{id}")));
    assert_eq!(status, StatusCode::NOT_FOUND);
}
