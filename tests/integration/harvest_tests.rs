use crate::common::{
    harvester_with, listing_body, mount_delayed_product, mount_html, mount_product, mount_status,
    requested_paths, test_harvester,
};
use shop_harvest::config::HarvesterConfig;
use shop_harvest::HarvestError;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_harvest_reference_storefront() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/collections/all",
        200,
        &listing_body(&["a1", "a2", "a3"]),
    )
    .await;
    mount_product(&server, "a1", "T1", &["img1.jpg"]).await;
    mount_product(&server, "a2", "T2", &[]).await;
    mount_status(&server, "/products/a3.json", 500).await;
    mount_html(
        &server,
        "/",
        200,
        r#"<html><body>
            <a href="mailto:shop@a.com">Email us</a>
            <a href="https://facebook.com/shopA">Facebook</a>
        </body></html>"#,
    )
    .await;

    let storefront = server.uri();
    let result = test_harvester().harvest(&storefront).await.unwrap();

    assert_eq!(result.get("email"), Some("shop@a.com"));
    assert_eq!(result.get("facebook"), Some("https://facebook.com/shopa"));
    assert_eq!(result.get("twitter"), None);
    assert_eq!(result.get("title_1"), Some("T1"));
    assert_eq!(result.get("image_1"), Some("img1.jpg"));
    assert_eq!(result.get("title_2"), Some("T2"));
    assert_eq!(result.get("image_2"), None);
    assert_eq!(result.get("title_3"), None);
    assert_eq!(result.get("url"), Some(storefront.as_str()));

    // The failed third product still occupies its slot
    assert_eq!(result.products().len(), 3);
    assert!(result.products()[2].is_none());
}

#[tokio::test]
async fn test_listing_error_status_yields_no_products() {
    let server = MockServer::start().await;

    mount_status(&server, "/collections/all", 503).await;
    mount_html(
        &server,
        "/",
        200,
        r#"<a href="https://twitter.com/Shop">Twitter</a>"#,
    )
    .await;

    let result = test_harvester().harvest(&server.uri()).await.unwrap();

    assert!(result.products().is_empty());
    assert_eq!(result.get("twitter"), Some("https://twitter.com/shop"));
    assert_eq!(result.field_count(), 4);
}

#[tokio::test]
async fn test_all_contact_pages_absent() {
    let server = MockServer::start().await;

    // Nothing mounted: every request gets a 404
    let result = test_harvester().harvest(&server.uri()).await.unwrap();

    assert!(result.contacts().is_empty());
    assert!(result.products().is_empty());

    let contact_probes: Vec<String> = requested_paths(&server)
        .await
        .into_iter()
        .filter(|p| p != "/collections/all")
        .collect();
    assert_eq!(
        contact_probes,
        vec![
            "/",
            "/",
            "/pages/about",
            "/pages/about-us",
            "/pages/contact",
            "/pages/contact-us"
        ]
    );
}

#[tokio::test]
async fn test_first_existing_contact_page_is_used() {
    let server = MockServer::start().await;

    mount_status(&server, "/", 404).await;
    mount_status(&server, "/pages/about", 500).await;
    mount_html(
        &server,
        "/pages/about-us",
        200,
        r#"<a href="mailto:about@shop.example">Mail</a>"#,
    )
    .await;
    mount_html(
        &server,
        "/pages/contact",
        200,
        r#"<a href="mailto:contact@shop.example">Mail</a>"#,
    )
    .await;

    let result = test_harvester().harvest(&server.uri()).await.unwrap();
    assert_eq!(result.get("email"), Some("about@shop.example"));

    let paths = requested_paths(&server).await;
    assert!(!paths.iter().any(|p| p == "/pages/contact"));
}

#[tokio::test]
async fn test_contact_page_without_matches() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        200,
        r#"<a href="/collections/all">Shop</a><a href="tel:5550100">Call</a>"#,
    )
    .await;

    let result = test_harvester().harvest(&server.uri()).await.unwrap();
    assert!(result.contacts().is_empty());
}

#[tokio::test]
async fn test_listing_transport_failure_aborts_storefront() {
    // Nothing listens on port 1
    let result = test_harvester().harvest("http://127.0.0.1:1").await;
    assert!(matches!(result, Err(HarvestError::Http { .. })));
}

#[tokio::test]
async fn test_contact_transport_failure_aborts_storefront() {
    let server = MockServer::start().await;

    mount_html(&server, "/collections/all", 200, &listing_body(&["a1"])).await;
    mount_product(&server, "a1", "T1", &[]).await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<a href=\"mailto:late@shop.example\">Mail</a>")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    let harvester =
        shop_harvest::crawler::Harvester::with_client(client, HarvesterConfig::default());

    let result = harvester.harvest(&server.uri()).await;
    assert!(matches!(result, Err(HarvestError::Http { .. })));
}

#[tokio::test]
async fn test_malformed_product_only_empties_its_slot() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/collections/all",
        200,
        &listing_body(&["good-1", "broken", "good-2"]),
    )
    .await;
    mount_product(&server, "good-1", "First", &["one.jpg", "two.jpg"]).await;
    mount_html(&server, "/products/broken.json", 200, "<html>oops</html>").await;
    mount_product(&server, "good-2", "Third", &["three.jpg"]).await;

    let result = test_harvester().harvest(&server.uri()).await.unwrap();

    assert_eq!(result.get("title_1"), Some("First"));
    assert_eq!(result.get("image_1"), Some("one.jpg"));
    assert_eq!(result.get("title_2"), None);
    assert_eq!(result.get("title_3"), Some("Third"));
    assert_eq!(result.get("image_3"), Some("three.jpg"));
}

#[tokio::test]
async fn test_product_index_follows_discovery_not_completion() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/collections/all",
        200,
        &listing_body(&["slow", "fast"]),
    )
    .await;
    mount_delayed_product(&server, "slow", "Slow", Duration::from_millis(300)).await;
    mount_product(&server, "fast", "Fast", &[]).await;

    let result = test_harvester().harvest(&server.uri()).await.unwrap();

    assert_eq!(result.get("title_1"), Some("Slow"));
    assert_eq!(result.get("title_2"), Some("Fast"));
}

#[tokio::test]
async fn test_product_details_are_fetched_concurrently() {
    let server = MockServer::start().await;
    let delay = Duration::from_millis(400);

    let handles = ["d1", "d2", "d3", "d4"];
    mount_html(&server, "/collections/all", 200, &listing_body(&handles)).await;
    for handle in handles {
        mount_delayed_product(&server, handle, &handle.to_uppercase(), delay).await;
    }

    let started = Instant::now();
    let result = test_harvester().harvest(&server.uri()).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(result.products().len(), 4);
    assert!(result.products().iter().all(Option::is_some));
    // Sequential fetches would need at least 4 x 400ms
    assert!(
        elapsed < delay * 3,
        "product details took {:?}, expected them to overlap",
        elapsed
    );
}

#[tokio::test]
async fn test_product_cap_limits_detail_requests() {
    let server = MockServer::start().await;

    let handles = ["p1", "p2", "p3", "p4", "p5", "p6", "p7"];
    mount_html(&server, "/collections/all", 200, &listing_body(&handles)).await;
    for handle in handles {
        mount_product(&server, handle, &handle.to_uppercase(), &[]).await;
    }

    let settings = HarvesterConfig {
        max_products: 3,
        max_concurrent_products: Some(1),
        ..HarvesterConfig::default()
    };
    let result = harvester_with(settings).harvest(&server.uri()).await.unwrap();

    assert_eq!(result.products().len(), 3);
    assert_eq!(result.get("title_3"), Some("P3"));
    assert_eq!(result.get("title_4"), None);

    let detail_requests = requested_paths(&server)
        .await
        .into_iter()
        .filter(|p| p.ends_with(".json"))
        .count();
    assert_eq!(detail_requests, 3);
}

#[tokio::test]
async fn test_custom_paths_and_template() {
    let server = MockServer::start().await;

    mount_status(&server, "/", 404).await;
    mount_html(&server, "/collections/frontpage", 200, &listing_body(&["mug"])).await;
    Mock::given(method("GET"))
        .and(path("/api/mug"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(crate::common::product_json("Mug", &["mug.png"])),
        )
        .mount(&server)
        .await;
    mount_html(
        &server,
        "/help/contact",
        200,
        r#"<a href="mailto:help@shop.example">Help</a>"#,
    )
    .await;

    let settings = HarvesterConfig {
        contact_paths: vec!["help/contact".to_string()],
        listing_path: "collections/frontpage".to_string(),
        product_url_template: "{shop}/api/{handle}".to_string(),
        ..HarvesterConfig::default()
    };
    let result = harvester_with(settings).harvest(&server.uri()).await.unwrap();

    assert_eq!(result.get("email"), Some("help@shop.example"));
    assert_eq!(result.get("title_1"), Some("Mug"));
    assert_eq!(result.get("image_1"), Some("mug.png"));
}

#[tokio::test]
async fn test_invalid_storefront_address() {
    let result = test_harvester().harvest("ftp://shop.example").await;
    assert!(matches!(result, Err(HarvestError::UrlError(_))));
}
