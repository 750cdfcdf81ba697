use std::time::Duration;

use anyhow::Result;
use investment_report::models::Id;
use investment_report::upstream::{
    build_http_client, CompaniesServiceClient, CompanySource, ExportSink, InvestmentSource,
    InvestmentsServiceClient,
};
use investment_report::Error;
use rust_decimal::Decimal;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INVESTMENTS_BODY: &str = r#"[
    {
        "userId": "1",
        "firstName": "Billy",
        "lastName": "Bob",
        "investmentTotal": 1400,
        "date": "2020-01-01",
        "holdings": [
            {"id": "2", "investmentPercentage": 1}
        ]
    },
    {
        "userId": "2",
        "firstName": "Sheila",
        "lastName": "Aussie",
        "investmentTotal": 20000,
        "date": "2020-01-01",
        "holdings": [
            {"id": "1", "investmentPercentage": 0.5},
            {"id": "2", "investmentPercentage": 0.5}
        ]
    }
]"#;

const COMPANIES_BODY: &str = r#"[
    {"id": "1", "name": "The Big Investment Company", "address": "14 Square Place"},
    {"id": "2", "name": "The Small Investment Company", "address": "38 Some Street"}
]"#;

/// Address with nothing listening on it.
async fn closed_port_url() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn investments_client_decodes_collection() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/investments"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(INVESTMENTS_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = InvestmentsServiceClient::new(server.uri());
    let investments = client.fetch_investments().await?;

    assert_eq!(investments.len(), 2);
    assert_eq!(investments[0].user_id, Id::from("1"));
    assert_eq!(investments[1].investment_total, Decimal::from(20000));
    assert_eq!(investments[1].holdings.len(), 2);
    assert_eq!(
        investments[1].holdings[0].investment_percentage,
        Decimal::new(5, 1)
    );

    Ok(())
}

#[tokio::test]
async fn companies_client_decodes_collection_with_trailing_slash_base() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(COMPANIES_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = CompaniesServiceClient::new(format!("{}/", server.uri()));
    let companies = client.fetch_companies().await?;

    let names: Vec<&str> = companies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["The Big Investment Company", "The Small Investment Company"]
    );

    Ok(())
}

#[tokio::test]
async fn error_status_is_source_unavailable() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&server)
        .await;

    let err = CompaniesServiceClient::new(server.uri())
        .fetch_companies()
        .await
        .expect_err("expected failure");

    match err {
        Error::SourceUnavailable { name, reason } => {
            assert_eq!(name, "companies");
            assert!(reason.contains("503"), "reason was {reason}");
        }
        other => panic!("unexpected error: {other}"),
    }

    Ok(())
}

#[tokio::test]
async fn malformed_payload_is_source_unavailable() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/investments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"not": "a list"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = InvestmentsServiceClient::new(server.uri())
        .fetch_investments()
        .await
        .expect_err("expected decode failure");

    assert!(matches!(
        err,
        Error::SourceUnavailable { name: "investments", .. }
    ));

    Ok(())
}

#[tokio::test]
async fn transport_failure_is_source_unavailable() -> Result<()> {
    let err = InvestmentsServiceClient::new(closed_port_url().await?)
        .fetch_investments()
        .await
        .expect_err("expected connection failure");

    assert!(matches!(
        err,
        Error::SourceUnavailable { name: "investments", .. }
    ));

    Ok(())
}

#[tokio::test]
async fn timeout_is_source_unavailable() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(COMPANIES_BODY, "application/json")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = CompaniesServiceClient::new(server.uri())
        .with_client(build_http_client(Duration::from_millis(100))?);
    let err = client
        .fetch_companies()
        .await
        .expect_err("expected timeout");

    assert!(matches!(
        err,
        Error::SourceUnavailable { name: "companies", .. }
    ));

    Ok(())
}

#[tokio::test]
async fn export_posts_json_envelope() -> Result<()> {
    let server = MockServer::start().await;
    let csv = "User,First Name,Last Name,Date,Holding,Value\n1,Billy,Bob,2020-01-01,Acme,1400";

    Mock::given(method("POST"))
        .and(path("/investments/export"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({ "csv": csv })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    InvestmentsServiceClient::new(server.uri()).export(csv).await?;

    Ok(())
}

#[tokio::test]
async fn export_error_status_is_forwarding_failure() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/investments/export"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = InvestmentsServiceClient::new(server.uri())
        .export("User")
        .await
        .expect_err("expected export failure");

    assert!(matches!(err, Error::ExportForwardingFailed(_)));

    Ok(())
}

#[tokio::test]
async fn raw_lookup_relays_status_body_and_content_type() -> Result<()> {
    let server = MockServer::start().await;
    let body = r#"{"userId":"1","firstName":"Billy"}"#;

    Mock::given(method("GET"))
        .and(path("/investments/1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/investments/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such investment"))
        .mount(&server)
        .await;

    let client = InvestmentsServiceClient::new(server.uri());

    let found = client.fetch_investment_raw("1").await?;
    assert_eq!(found.status, 200);
    assert_eq!(found.content_type.as_deref(), Some("application/json"));
    assert_eq!(found.body, body.as_bytes());

    let missing = client.fetch_investment_raw("404").await?;
    assert_eq!(missing.status, 404);
    assert_eq!(missing.body, b"no such investment");

    Ok(())
}

#[tokio::test]
async fn raw_lookup_transport_failure_is_proxy_failure() -> Result<()> {
    let err = InvestmentsServiceClient::new(closed_port_url().await?)
        .fetch_investment_raw("1")
        .await
        .expect_err("expected connection failure");

    assert!(matches!(err, Error::ProxyUpstreamFailed(_)));

    Ok(())
}
