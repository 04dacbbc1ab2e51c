use oncomanda_api::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_ok() {
    let body = health_check().await;
    assert_eq!(body.0.status, "ok");
}
