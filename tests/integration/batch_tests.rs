use crate::common::{listing_body, mount_html, mount_product, mount_status, test_harvester};
use shop_harvest::config::{ColumnPolicy, Config};
use shop_harvest::crawler::{run_batch, BatchRunner};
use shop_harvest::input::read_storefronts;
use shop_harvest::output::{write_report, write_report_to_path};
use shop_harvest::StorefrontOutcome;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts a storefront with one product and an email contact
async fn healthy_storefront(email: &str, title: &str) -> MockServer {
    let server = MockServer::start().await;
    mount_html(&server, "/collections/all", 200, &listing_body(&["item"])).await;
    mount_product(&server, "item", title, &[]).await;
    mount_html(
        &server,
        "/",
        200,
        &format!(r#"<a href="mailto:{}">Mail</a>"#, email),
    )
    .await;
    server
}

fn read_report(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

#[tokio::test]
async fn test_one_failing_storefront_does_not_sink_batch() {
    let first = healthy_storefront("one@shop.example", "One").await;
    let third = healthy_storefront("three@shop.example", "Three").await;

    let storefronts = vec![
        first.uri(),
        // Nothing listens on port 1, so the handle scan fails
        "http://127.0.0.1:1".to_string(),
        third.uri(),
    ];

    let runner = BatchRunner::with_harvester(test_harvester(), None);
    let outcome = runner.run(storefronts.clone()).await;

    assert_eq!(outcome.len(), 3);
    assert_eq!(outcome.successes().count(), 2);
    assert!(matches!(
        &outcome.slots()[1],
        StorefrontOutcome::Failed { url } if url == "http://127.0.0.1:1"
    ));

    // Slots keep input order
    let urls: Vec<&str> = outcome.slots().iter().map(|s| s.url()).collect();
    assert_eq!(urls, storefronts.iter().map(String::as_str).collect::<Vec<_>>());

    let mut buffer = Vec::new();
    let summary = write_report(&mut buffer, &outcome, ColumnPolicy::Widest).unwrap();
    assert_eq!(summary.rows, 2);

    let (headers, rows) = read_report(&buffer);
    assert_eq!(headers, vec!["email", "facebook", "twitter", "title_1", "url"]);
    assert_eq!(rows[0][0], "one@shop.example");
    assert_eq!(rows[1][0], "three@shop.example");
    assert_eq!(rows[1][3], "Three");
}

#[tokio::test]
async fn test_bounded_batch_keeps_order() {
    let servers = vec![
        healthy_storefront("a@shop.example", "A").await,
        healthy_storefront("b@shop.example", "B").await,
        healthy_storefront("c@shop.example", "C").await,
    ];
    let storefronts: Vec<String> = servers.iter().map(|s| s.uri()).collect();

    let runner = BatchRunner::with_harvester(test_harvester(), Some(1));
    let outcome = runner.run(storefronts).await;

    let titles: Vec<&str> = outcome
        .successes()
        .map(|r| r.get("title_1").unwrap())
        .collect();
    assert_eq!(titles, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_unbounded_batch_runs_storefronts_concurrently() {
    let delay = Duration::from_millis(400);
    let mut servers = Vec::new();
    for _ in 0..4 {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections/all"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_body(&[]))
                    .set_delay(delay),
            )
            .mount(&server)
            .await;
        servers.push(server);
    }
    let storefronts: Vec<String> = servers.iter().map(|s| s.uri()).collect();

    let runner = BatchRunner::with_harvester(test_harvester(), None);
    let started = Instant::now();
    let outcome = runner.run(storefronts).await;
    let elapsed = started.elapsed();

    assert_eq!(outcome.successes().count(), 4);
    // One storefront at a time would need at least 4 x 400ms
    assert!(
        elapsed < delay * 3,
        "batch took {:?}, expected storefronts to overlap",
        elapsed
    );
}

#[tokio::test]
async fn test_listing_outage_still_reports_contacts() {
    let healthy = healthy_storefront("ok@shop.example", "Item").await;

    let outage = MockServer::start().await;
    mount_status(&outage, "/collections/all", 503).await;
    mount_html(
        &outage,
        "/",
        200,
        r#"<a href="mailto:down@shop.example">Mail</a>"#,
    )
    .await;

    let runner = BatchRunner::with_harvester(test_harvester(), None);
    let outcome = runner.run(vec![healthy.uri(), outage.uri()]).await;

    assert_eq!(outcome.successes().count(), 2);
    let outage_result = outcome.slots()[1].result().unwrap();
    assert!(outage_result.products().is_empty());
    assert_eq!(outage_result.get("email"), Some("down@shop.example"));
}

#[tokio::test]
async fn test_empty_batch() {
    let runner = BatchRunner::with_harvester(test_harvester(), None);
    let outcome = runner.run(Vec::new()).await;
    assert!(outcome.is_empty());
}

#[tokio::test]
async fn test_end_to_end_csv_to_csv() {
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
    mount_status(&server, "/products/a3.json", 404).await;
    mount_html(
        &server,
        "/",
        200,
        r#"<a href="mailto:shop@a.com">Mail</a><a href="https://facebook.com/shopA">FB</a>"#,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("stores.csv");
    let output_path = dir.path().join("parsed_stores_data.csv");
    std::fs::write(
        &input_path,
        format!("url,name\n{},Shop A\nhttp://127.0.0.1:1,Gone\n", server.uri()),
    )
    .unwrap();

    let storefronts = read_storefronts(&input_path).unwrap();
    let outcome = run_batch(&Config::default(), storefronts).await.unwrap();
    let summary = write_report_to_path(&output_path, &outcome, ColumnPolicy::Widest).unwrap();
    assert_eq!(summary.rows, 1);

    let content = std::fs::read(&output_path).unwrap();
    let (headers, rows) = read_report(&content);
    assert_eq!(
        headers,
        vec!["email", "facebook", "twitter", "title_1", "image_1", "title_2", "url"]
    );
    assert_eq!(
        rows,
        vec![vec![
            "shop@a.com".to_string(),
            "https://facebook.com/shopa".to_string(),
            String::new(),
            "T1".to_string(),
            "img1.jpg".to_string(),
            "T2".to_string(),
            server.uri(),
        ]]
    );
}
