use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::json;

use teampool_be::store::models::{Carpool, NotificationKind, TripState};

mod common;
use common::*;

#[actix_web::test]
async fn test_offer_ride_starts_empty_and_unplanned() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    let team = create_test_team(&ctx).await;
    let driver = create_roster_entry(&ctx, team.id, true, 4, home(47.60)).await;
    let event = create_test_event(&ctx, team.id, false).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/events/{}/carpools", event.id))
        .set_json(json!({ "driverId": driver.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let carpool: Carpool = read_data(&test::read_body(resp).await);
    assert_eq!(carpool.state, TripState::Unplanned);
    assert_eq!(carpool.capacity, 3);
    assert!(carpool.passengers.is_empty());
    assert!(carpool.plan.is_none());
}

#[actix_web::test]
async fn test_second_offer_for_same_event_is_a_conflict() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    let team = create_test_team(&ctx).await;
    let driver = create_roster_entry(&ctx, team.id, true, 4, home(47.60)).await;
    let event = create_test_event(&ctx, team.id, false).await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/events/{}/carpools", event.id))
            .set_json(json!({ "driverId": driver.id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }
}

#[actix_web::test]
async fn test_offer_from_non_driver_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    let team = create_test_team(&ctx).await;
    let rider = create_roster_entry(&ctx, team.id, false, 0, None).await;
    let event = create_test_event(&ctx, team.id, false).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/events/{}/carpools", event.id))
        .set_json(json!({ "driverId": rider.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_ride_request_is_idempotent() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    let team = create_test_team(&ctx).await;
    let driver = create_roster_entry(&ctx, team.id, true, 4, home(47.60)).await;
    let rider = create_roster_entry(&ctx, team.id, false, 0, home(47.62)).await;
    let event = create_test_event(&ctx, team.id, false).await;
    let carpool = ctx
        .carpools
        .create_carpool(&event, &driver)
        .await
        .expect("carpool created");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/carpools/{}/requests", carpool.id))
        .set_json(json!({ "riderId": rider.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Same request again: conflict, and still exactly one passenger entry.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/carpools/{}/requests", carpool.id))
        .set_json(json!({ "riderId": rider.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let stored = ctx
        .carpools
        .get_carpool_by_id(carpool.id)
        .await
        .expect("carpool exists");
    assert_eq!(stored.passengers.len(), 1);
    assert_eq!(stored.passengers[0].rider_id, rider.id);
}

#[actix_web::test]
async fn test_ride_request_on_full_carpool_reports_capacity() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    let team = create_test_team(&ctx).await;
    // Two total seats: one passenger seat once the driver's player is in.
    let driver = create_roster_entry(&ctx, team.id, true, 2, home(47.60)).await;
    let first = create_roster_entry(&ctx, team.id, false, 0, home(47.61)).await;
    let second = create_roster_entry(&ctx, team.id, false, 0, home(47.62)).await;
    let event = create_test_event(&ctx, team.id, false).await;
    let carpool = ctx
        .carpools
        .create_carpool(&event, &driver)
        .await
        .expect("carpool created");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/carpools/{}/requests", carpool.id))
        .set_json(json!({ "riderId": first.id }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/carpools/{}/requests", carpool.id))
        .set_json(json!({ "riderId": second.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let message = read_error(&test::read_body(resp).await);
    assert!(message.contains("seats"), "unexpected message: {message}");

    // Passenger list unchanged by the refused request.
    let stored = ctx
        .carpools
        .get_carpool_by_id(carpool.id)
        .await
        .expect("carpool exists");
    assert_eq!(stored.passengers.len(), 1);
    assert_eq!(stored.passengers[0].rider_id, first.id);
}

#[actix_web::test]
async fn test_confirmed_ride_notifies_the_rider() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    let team = create_test_team(&ctx).await;
    let driver = create_roster_entry(&ctx, team.id, true, 4, home(47.60)).await;
    let rider = create_roster_entry(&ctx, team.id, false, 0, home(47.62)).await;
    let event = create_test_event(&ctx, team.id, false).await;
    let carpool = ctx
        .carpools
        .create_carpool(&event, &driver)
        .await
        .expect("carpool created");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/carpools/{}/requests", carpool.id))
        .set_json(json!({ "riderId": rider.id }))
        .to_request();
    test::call_service(&app, req).await;

    let feed = ctx
        .notifications
        .get_notifications_for_team(team.id, Some(rider.id))
        .await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, NotificationKind::RideConfirmed);
    assert_eq!(feed[0].target_rider_id, Some(rider.id));
    assert!(!feed[0].read);
}

#[actix_web::test]
async fn test_cancel_ride_releases_the_seat() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    let team = create_test_team(&ctx).await;
    let driver = create_roster_entry(&ctx, team.id, true, 2, home(47.60)).await;
    let first = create_roster_entry(&ctx, team.id, false, 0, home(47.61)).await;
    let second = create_roster_entry(&ctx, team.id, false, 0, home(47.62)).await;
    let event = create_test_event(&ctx, team.id, false).await;
    let carpool = ctx
        .carpools
        .create_carpool(&event, &driver)
        .await
        .expect("carpool created");
    ctx.carpools
        .add_passenger(carpool.id, &first)
        .await
        .expect("seat taken");

    let req = test::TestRequest::delete()
        .uri(&format!(
            "/api/v1/carpools/{}/requests/{}",
            carpool.id, first.id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The freed seat can be taken by someone else.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/carpools/{}/requests", carpool.id))
        .set_json(json!({ "riderId": second.id }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );
}

#[actix_web::test]
async fn test_mark_notification_read() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;
    let team = create_test_team(&ctx).await;
    let driver = create_roster_entry(&ctx, team.id, true, 4, home(47.60)).await;
    let rider = create_roster_entry(&ctx, team.id, false, 0, home(47.62)).await;
    let event = create_test_event(&ctx, team.id, false).await;
    let carpool = ctx
        .carpools
        .create_carpool(&event, &driver)
        .await
        .expect("carpool created");
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/carpools/{}/requests", carpool.id))
        .set_json(json!({ "riderId": rider.id }))
        .to_request();
    test::call_service(&app, req).await;

    let feed = ctx
        .notifications
        .get_notifications_for_team(team.id, Some(rider.id))
        .await;
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/notifications/{}/read", feed[0].id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let feed = ctx
        .notifications
        .get_notifications_for_team(team.id, Some(rider.id))
        .await;
    assert!(feed[0].read);
}
