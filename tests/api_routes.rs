mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use library_access::access::Role;
use library_access::database::models::{Collection, Item, ItemType, Organization};

use common::TestServer;

struct Library {
    org: Organization,
    collection: Collection,
    item: Item,
    admin: Uuid,
    manager: Uuid,
    reader: Uuid,
    subscriber: Uuid,
}

async fn seed(server: &TestServer) -> Library {
    let admin = Uuid::new_v4();
    let manager = Uuid::new_v4();
    let reader = Uuid::new_v4();
    let subscriber = Uuid::new_v4();

    let store = &server.store;
    let org = store.add_organization("Acme Library", "acme", admin).await;
    store.add_member(admin, org.id, Role::Admin).await;
    store.add_member(manager, org.id, Role::StaffManager).await;
    store.add_member(reader, org.id, Role::Consumer).await;
    store.add_member(subscriber, org.id, Role::Consumer).await;
    store.add_subscription(subscriber, org.id, "active", None).await;
    let collection = store.add_collection(org.id, "Onboarding").await;
    let item = store
        .add_item(org.id, collection.id, "Welcome video", ItemType::Video, 0)
        .await;
    store
        .add_event(org.id, "Office hours", Utc::now() + Duration::days(7))
        .await;

    Library {
        org,
        collection,
        item,
        admin,
        manager,
        reader,
        subscriber,
    }
}

#[tokio::test]
async fn health_reports_store_state() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    server.store.set_unavailable(true);
    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_bearer_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    seed(&server).await;

    let res = server.client.get(server.url("/api/org/acme")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server
        .client
        .get(server.url("/api/org/acme"))
        .bearer_auth("not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn whoami_echoes_token_subject() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = Uuid::new_v4();

    let (status, body) = server.get_as(user, "/api/auth/whoami").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_id"], user.to_string());
    Ok(())
}

#[tokio::test]
async fn unknown_organization_is_not_found() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;

    let (status, body) = server.get_as(lib.admin, "/api/org/nowhere/collections").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Organization not found");
    Ok(())
}

#[tokio::test]
async fn user_organizations_include_role() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;

    let (status, body) = server.get_as(lib.manager, "/api/user/organizations").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["slug"], "acme");
    assert_eq!(body["data"][0]["role"], "staff_manager");
    Ok(())
}

#[tokio::test]
async fn collections_are_gated_by_staff_or_subscription() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;
    let path = "/api/org/acme/collections";

    let (status, body) = server.get_as(lib.manager, path).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Onboarding");

    let (status, _) = server.get_as(lib.subscriber, path).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server.get_as(lib.reader, path).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Subscription required");

    let (status, body) = server.get_as(Uuid::new_v4(), path).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden");
    Ok(())
}

#[tokio::test]
async fn access_report_describes_caller() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;

    let (status, body) = server.get_as(lib.reader, "/api/org/acme/access").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "consumer");
    assert_eq!(body["data"]["has_active_subscription"], false);
    assert_eq!(body["data"]["gated_access"], "subscription_required");
    assert_eq!(body["data"]["granted"], false);

    let (_, body) = server.get_as(lib.subscriber, "/api/org/acme/access").await?;
    assert_eq!(body["data"]["subscription"]["status"], "active");
    assert_eq!(body["data"]["gated_access"], "subscriber");
    assert_eq!(body["data"]["granted"], true);
    Ok(())
}

#[tokio::test]
async fn member_listing_requires_staff_manager() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;

    let (status, body) = server.get_as(lib.manager, "/api/org/acme/members").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(4));

    let (status, _) = server.get_as(lib.subscriber, "/api/org/acme/members").await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn admin_changes_member_role() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;
    let path = format!("/api/org/acme/members/{}", lib.reader);

    let (status, body) = server.patch_as(lib.admin, &path, json!({ "role": "staff_admin" })).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "staff_admin");

    // Promotion takes effect on the very next check.
    let (status, _) = server.get_as(lib.reader, "/api/org/acme/collections").await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn role_change_validates_input_and_caller() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;
    let path = format!("/api/org/acme/members/{}", lib.reader);

    let (status, body) = server.patch_as(lib.admin, &path, json!({})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Role is required");

    let (status, body) = server.patch_as(lib.admin, &path, json!({ "role": "owner" })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid role provided");

    let (status, _) = server.patch_as(lib.manager, &path, json!({ "role": "consumer" })).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let stranger = format!("/api/org/acme/members/{}", Uuid::new_v4());
    let (status, body) = server.patch_as(lib.admin, &stranger, json!({ "role": "consumer" })).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Membership not found");
    Ok(())
}

#[tokio::test]
async fn admin_cannot_demote_self() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;
    let path = format!("/api/org/acme/members/{}", lib.admin);

    let (status, body) = server.patch_as(lib.admin, &path, json!({ "role": "staff_admin" })).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Cannot demote yourself from admin");

    let (_, body) = server.get_as(lib.admin, "/api/org/acme/access").await?;
    assert_eq!(body["data"]["role"], "admin");
    Ok(())
}

#[tokio::test]
async fn admin_removes_member_but_not_self() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;

    let own = format!("/api/org/acme/members/{}", lib.admin);
    let (status, body) = server.delete_as(lib.admin, &own).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Cannot remove yourself from the organization");

    let other = format!("/api/org/acme/members/{}", lib.subscriber);
    let (status, body) = server.delete_as(lib.admin, &other).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Member removed successfully");

    // Removed members lose gated access even with an active subscription.
    let (status, body) = server.get_as(lib.subscriber, "/api/org/acme/collections").await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden");

    let (status, _) = server.delete_as(lib.admin, &other).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn store_outage_is_not_a_denial() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;
    server.store.set_unavailable(true);

    let (status, body) = server.get_as(lib.subscriber, "/api/org/acme/collections").await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    Ok(())
}

#[tokio::test]
async fn collection_content_is_gated_like_the_listing() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;
    let paths = [
        format!("/api/org/acme/collections/{}", lib.collection.id),
        format!("/api/org/acme/collections/{}/items", lib.collection.id),
        format!("/api/org/acme/collections/{}/items/{}", lib.collection.id, lib.item.id),
        "/api/org/acme/events".to_string(),
    ];

    for path in &paths {
        let (status, _) = server.get_as(lib.subscriber, path).await?;
        assert_eq!(status, StatusCode::OK, "{}", path);

        let (status, _) = server.get_as(lib.manager, path).await?;
        assert_eq!(status, StatusCode::OK, "{}", path);

        let (status, body) = server.get_as(lib.reader, path).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", path);
        assert_eq!(body["message"], "Subscription required");

        let (status, body) = server.get_as(Uuid::new_v4(), path).await?;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", path);
        assert_eq!(body["message"], "Forbidden");
    }
    Ok(())
}

#[tokio::test]
async fn collection_content_bodies_and_missing_rows() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;

    let (_, body) = server
        .get_as(lib.subscriber, &format!("/api/org/acme/collections/{}", lib.collection.id))
        .await?;
    assert_eq!(body["data"]["name"], "Onboarding");

    let (_, body) = server
        .get_as(lib.subscriber, &format!("/api/org/acme/collections/{}/items", lib.collection.id))
        .await?;
    assert_eq!(body["data"][0]["title"], "Welcome video");
    assert_eq!(body["data"][0]["type"], "video");

    let (_, body) = server.get_as(lib.subscriber, "/api/org/acme/events").await?;
    assert_eq!(body["data"][0]["name"], "Office hours");

    let (status, body) = server
        .get_as(lib.subscriber, &format!("/api/org/acme/collections/{}", Uuid::new_v4()))
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Collection not found");

    let (status, body) = server
        .get_as(
            lib.subscriber,
            &format!("/api/org/acme/collections/{}/items/{}", lib.collection.id, Uuid::new_v4()),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Item not found");
    Ok(())
}

#[tokio::test]
async fn subscription_lapse_closes_collection_items() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;
    let path = format!("/api/org/acme/collections/{}/items", lib.collection.id);

    let subscription = server.store.add_subscription(lib.reader, lib.org.id, "active", None).await;
    let (status, _) = server.get_as(lib.reader, &path).await?;
    assert_eq!(status, StatusCode::OK);

    server.store.set_subscription_status(subscription.id, "canceled").await;
    let (status, body) = server.get_as(lib.reader, &path).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Subscription required");
    Ok(())
}

#[tokio::test]
async fn malformed_requests_use_error_envelope() -> Result<()> {
    let server = TestServer::spawn().await?;
    let lib = seed(&server).await;

    let (status, body) = server
        .patch_as(lib.admin, "/api/org/acme/members/not-a-uuid", json!({ "role": "consumer" }))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = server.delete_as(lib.admin, "/api/org/acme/members/42").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, body) = server
        .get_as(lib.subscriber, "/api/org/acme/collections/nope/items")
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let res = server
        .client
        .patch(server.url(&format!("/api/org/acme/members/{}", lib.reader)))
        .bearer_auth(server.token_for(lib.admin))
        .header("content-type", "application/json")
        .body("{\"role\":")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "BAD_REQUEST");
    Ok(())
}
